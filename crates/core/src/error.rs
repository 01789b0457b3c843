// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    /// No resolvable identity for an operation that requires one
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Target record is missing or owned by another identity.
    /// Both cases share one message, so other users' ids are never revealed.
    #[error("Application not found or not owned by caller: {0}")]
    NotFoundOrUnauthorized(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Note: sqlx::Error conversion is handled in infra-sqlite crate
// by converting to AppError::Database(String)
