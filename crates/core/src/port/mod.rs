// Port Layer - Interfaces for external dependencies

pub mod application_repository;
pub mod id_provider; // For deterministic testing
pub mod identity_provider;
pub mod time_provider;

// Re-exports
pub use application_repository::ApplicationRepository;
pub use id_provider::IdProvider;
pub use identity_provider::IdentityProvider;
pub use time_provider::TimeProvider;
