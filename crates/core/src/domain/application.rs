// Application Domain Model

use crate::domain::error::{DomainError, Result};
use crate::domain::Identity;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Application ID (UUID v4, assigned by the store)
pub type ApplicationId = String;

/// Application status. The wire form is the lowercase variant name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Interview,
    Offer,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interview,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| DomainError::InvalidStatus(s.to_string()))
    }
}

/// Application Entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    /// Identity subject of the creator; never changes after insert
    pub owner: String,
    pub company: String,
    pub role: String,
    pub status: ApplicationStatus,
    pub date_applied: i64, // epoch ms
    pub notes: Option<String>,
}

impl Application {
    /// Whether `identity` is the owner of this record
    pub fn is_owned_by(&self, identity: &Identity) -> bool {
        self.owner == identity.subject()
    }
}

/// Application fields as handed to the store for insertion.
///
/// The store assigns the id; everything else is fixed by the create use case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub owner: String,
    pub company: String,
    pub role: String,
    pub status: ApplicationStatus,
    pub date_applied: i64,
    pub notes: Option<String>,
}

impl NewApplication {
    /// Attach the store-assigned id
    pub fn into_application(self, id: impl Into<ApplicationId>) -> Application {
        Application {
            id: id.into(),
            owner: self.owner,
            company: self.company,
            role: self.role,
            status: self.status,
            date_applied: self.date_applied,
            notes: self.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_accepts_all_variants() {
        for status in ApplicationStatus::ALL {
            assert_eq!(status.as_str().parse::<ApplicationStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_status_parse_is_case_insensitive_and_trims() {
        assert_eq!(
            " Interview ".parse::<ApplicationStatus>(),
            Ok(ApplicationStatus::Interview)
        );
        assert_eq!("OFFER".parse::<ApplicationStatus>(), Ok(ApplicationStatus::Offer));
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        let err = "bogus".parse::<ApplicationStatus>().unwrap_err();
        assert_eq!(err, DomainError::InvalidStatus("bogus".to_string()));
        assert!("".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_status_default_is_applied() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Applied);
    }

    #[test]
    fn test_status_serde_uses_lowercase() {
        let json = serde_json::to_string(&ApplicationStatus::Rejected).unwrap();
        assert_eq!(json, "\"rejected\"");

        let parsed: ApplicationStatus = serde_json::from_str("\"offer\"").unwrap();
        assert_eq!(parsed, ApplicationStatus::Offer);
        assert!(serde_json::from_str::<ApplicationStatus>("\"bogus\"").is_err());
    }

    #[test]
    fn test_ownership_check() {
        let app = NewApplication {
            owner: "user_a".to_string(),
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            status: ApplicationStatus::Applied,
            date_applied: 1000,
            notes: None,
        }
        .into_application("app-1");

        assert!(app.is_owned_by(&Identity::new("user_a").unwrap()));
        assert!(!app.is_owned_by(&Identity::new("user_b").unwrap()));
    }
}
