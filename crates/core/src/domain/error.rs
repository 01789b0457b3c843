// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid application status: {0} (expected one of applied, interview, offer, rejected)")]
    InvalidStatus(String),

    #[error("Invalid identity subject: {0}")]
    InvalidSubject(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
