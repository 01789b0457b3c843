//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC types from api-rpc crate. The credential is not part
//! of these requests; the client attaches it to every call.

use serde::{Deserialize, Serialize};

/// One tracked application, as the daemon reports it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApplicationView {
    pub id: String,
    pub company: String,
    pub role: String,
    pub status: String,
    /// Milliseconds since the Unix epoch
    pub date_applied: i64,
    pub notes: Option<String>,
}

/// Response from list operation
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    pub applications: Vec<ApplicationView>,
}

/// Request to record a new application
#[derive(Debug, Clone, Serialize)]
pub struct CreateRequest {
    pub company: String,
    pub role: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateRequest {
    /// New request with the default `applied` status and no notes
    pub fn new(company: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            role: role.into(),
            status: "applied".to_string(),
            notes: None,
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Response from create operation
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResponse {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdateStatusRequest {
    pub id: String,
    pub status: String,
}

/// Response from update_status operation
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusResponse {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DeleteRequest {
    pub id: String,
}

/// Response from delete operation
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}

/// Per-status counts of the caller's applications
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct StatsResponse {
    pub total: usize,
    pub applied: usize,
    pub interview: usize,
    pub offer: usize,
    pub rejected: usize,
}

/// Response from export operation
#[derive(Debug, Clone, Deserialize)]
pub struct ExportResponse {
    /// Suggested file name for the download
    pub filename: String,
    pub csv: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_builder() {
        let req = CreateRequest::new("Acme", "Engineer")
            .status("interview")
            .notes("phone screen");
        assert_eq!(req.status, "interview");

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["company"], "Acme");
        assert_eq!(value["notes"], "phone screen");
    }

    #[test]
    fn test_create_request_omits_missing_notes() {
        let value = serde_json::to_value(CreateRequest::new("Acme", "Engineer")).unwrap();
        assert_eq!(value["status"], "applied");
        assert!(value.get("notes").is_none());
    }

    #[test]
    fn test_list_response_accepts_null_notes() {
        let json = r#"{"applications":[{"id":"a1","company":"Acme","role":"Engineer",
            "status":"offer","date_applied":1705276800000,"notes":null}]}"#;
        let resp: ListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.applications.len(), 1);
        assert!(resp.applications[0].notes.is_none());
    }
}
