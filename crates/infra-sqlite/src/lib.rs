// Stage Tracker Infrastructure - SQLite Adapter
// Implements: ApplicationRepository

mod application_repository;
mod connection;
mod migration;

pub use application_repository::SqliteApplicationRepository;
pub use connection::create_pool;
pub use migration::run_migrations;

// Note: sqlx::Error conversion is handled by a helper in application_repository
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
