// Caller Identity

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Authenticated caller, as resolved by an identity provider.
///
/// Only the stable `subject` claim is consumed. Operations receive the
/// identity as an explicit argument; there is no ambient session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    subject: String,
}

impl Identity {
    pub fn new(subject: impl Into<String>) -> Result<Self> {
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(DomainError::InvalidSubject(
                "subject cannot be empty".to_string(),
            ));
        }
        Ok(Self { subject })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_rejects_blank_subject() {
        assert!(Identity::new("").is_err());
        assert!(Identity::new("   ").is_err());
    }

    #[test]
    fn test_identity_keeps_subject() {
        let identity = Identity::new("user_2abc").unwrap();
        assert_eq!(identity.subject(), "user_2abc");
        assert_eq!(identity.to_string(), "user_2abc");
    }
}
