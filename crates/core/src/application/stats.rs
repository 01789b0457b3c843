// Application Statistics

use crate::domain::{Application, ApplicationStatus};
use serde::{Deserialize, Serialize};

/// Per-status counts over one owner's list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationStats {
    pub total: usize,
    pub applied: usize,
    pub interview: usize,
    pub offer: usize,
    pub rejected: usize,
}

impl ApplicationStats {
    pub fn from_applications(applications: &[Application]) -> Self {
        applications
            .iter()
            .fold(Self::default(), |mut stats, app| {
                stats.total += 1;
                match app.status {
                    ApplicationStatus::Applied => stats.applied += 1,
                    ApplicationStatus::Interview => stats.interview += 1,
                    ApplicationStatus::Offer => stats.offer += 1,
                    ApplicationStatus::Rejected => stats.rejected += 1,
                }
                stats
            })
    }

    pub fn count(&self, status: ApplicationStatus) -> usize {
        match status {
            ApplicationStatus::Applied => self.applied,
            ApplicationStatus::Interview => self.interview,
            ApplicationStatus::Offer => self.offer,
            ApplicationStatus::Rejected => self.rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewApplication;

    fn with_status(status: ApplicationStatus) -> Application {
        NewApplication {
            owner: "alice".to_string(),
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            status,
            date_applied: 0,
            notes: None,
        }
        .into_application("id")
    }

    #[test]
    fn test_empty_stats() {
        assert_eq!(ApplicationStats::from_applications(&[]), ApplicationStats::default());
    }

    #[test]
    fn test_counts_sum_to_total() {
        let apps = vec![
            with_status(ApplicationStatus::Applied),
            with_status(ApplicationStatus::Rejected),
            with_status(ApplicationStatus::Rejected),
            with_status(ApplicationStatus::Offer),
        ];

        let stats = ApplicationStats::from_applications(&apps);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.count(ApplicationStatus::Rejected), 2);
        assert_eq!(stats.count(ApplicationStatus::Interview), 0);

        let sum: usize = ApplicationStatus::ALL.iter().map(|s| stats.count(*s)).sum();
        assert_eq!(sum, stats.total);
    }
}
