//! RPC Request/Response Types
//!
//! Every request carries an optional `auth_token`; the identity provider turns
//! it into the caller identity.

use serde::{Deserialize, Serialize};
use stage_tracker_core::application::ApplicationStats;
use stage_tracker_core::domain::Application;

fn default_status() -> String {
    "applied".to_string()
}

/// Application as returned to clients (owner omitted: it is always the caller)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplicationView {
    pub id: String,
    pub company: String,
    pub role: String,
    pub status: String,
    pub date_applied: i64,
    pub notes: Option<String>,
}

impl From<Application> for ApplicationView {
    fn from(app: Application) -> Self {
        Self {
            id: app.id,
            company: app.company,
            role: app.role,
            status: app.status.to_string(),
            date_applied: app.date_applied,
            notes: app.notes,
        }
    }
}

/// Requests that carry nothing but the credential
/// (list, stats, export, subscribe)
#[derive(Debug, Default, Deserialize)]
pub struct AuthOnlyRequest {
    #[serde(default)]
    pub auth_token: Option<String>,
}

/// applications.list.v1
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub applications: Vec<ApplicationView>,
}

/// applications.create.v1
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    pub auth_token: Option<String>,
    pub company: String,
    pub role: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateResponse {
    pub id: String,
    pub status: String,
}

/// applications.update_status.v1
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub auth_token: Option<String>,
    pub id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateStatusResponse {
    pub id: String,
    pub status: String,
}

/// applications.delete.v1
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub auth_token: Option<String>,
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}

/// applications.stats.v1
pub type StatsResponse = ApplicationStats;

/// applications.export.v1
#[derive(Debug, Clone, Serialize)]
pub struct ExportResponse {
    pub filename: String,
    pub csv: String,
}
