//! Stage Tracker SDK - Rust Client Library
//!
//! Provides a convenient client for the Stage Tracker daemon.
//!
//! # Example
//!
//! ```no_run
//! use stage_tracker_sdk::{CreateRequest, StageTrackerClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StageTrackerClient::connect("http://127.0.0.1:9640")
//!         .await?
//!         .with_token("my-token");
//!
//!     let created = client.create(CreateRequest::new("Acme", "Engineer")).await?;
//!     client.update_status(&created.id, "interview").await?;
//!
//!     for app in client.list().await?.applications {
//!         println!("{} - {} ({})", app.company, app.role, app.status);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::StageTrackerClient;
pub use jsonrpsee::core::client::Subscription;
pub use error::{code, Result, SdkError};
pub use types::{
    ApplicationView, CreateRequest, CreateResponse, DeleteResponse, ExportResponse, ListResponse,
    StatsResponse, UpdateStatusResponse,
};
