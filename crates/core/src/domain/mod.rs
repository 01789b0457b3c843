// Domain Layer - Pure business logic and entities

pub mod application;
pub mod error;
pub mod identity;

// Re-exports
pub use application::{Application, ApplicationId, ApplicationStatus, NewApplication};
pub use error::DomainError;
pub use identity::Identity;
