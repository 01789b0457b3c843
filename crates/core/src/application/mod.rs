// Application Layer - Use Cases and Business Logic

pub mod export;
pub mod live_query;
pub mod stats;
pub mod tracker;

// Re-exports
pub use export::{export_csv, EXPORT_FILENAME};
pub use live_query::{ApplicationSubscription, LiveQueryHub};
pub use stats::ApplicationStats;
pub use tracker::{ApplicationService, CreateRequest};
