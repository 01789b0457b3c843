// Create Use Case

use crate::domain::{ApplicationId, ApplicationStatus, Identity, NewApplication};
use crate::error::{AppError, Result};
use crate::port::{ApplicationRepository, TimeProvider};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MAX_COMPANY_LEN: usize = 200;
pub const MAX_ROLE_LEN: usize = 200;
pub const MAX_NOTES_LEN: usize = 5_000;

/// Create request as received from the boundary (status still unparsed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequest {
    pub company: String,
    pub role: String,
    pub status: String,

    #[serde(default)]
    pub notes: Option<String>,
}

/// Fields that passed validation, before owner and timestamp are attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidatedCreate {
    pub company: String,
    pub role: String,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
}

/// Validate a create request. Runs before any persistence attempt.
pub(crate) fn validate_request(req: &CreateRequest) -> Result<ValidatedCreate> {
    let company = required_text("company", &req.company, MAX_COMPANY_LEN)?;
    let role = required_text("role", &req.role, MAX_ROLE_LEN)?;
    let status: ApplicationStatus = req.status.parse()?;

    // Blank notes are stored as absent; anything else is kept verbatim
    let notes = match req.notes.as_deref() {
        Some(n) if !n.trim().is_empty() => {
            if n.chars().count() > MAX_NOTES_LEN {
                return Err(AppError::Validation(format!(
                    "notes too long (max {} characters)",
                    MAX_NOTES_LEN
                )));
            }
            Some(n.to_string())
        }
        _ => None,
    };

    Ok(ValidatedCreate {
        company,
        role,
        status,
        notes,
    })
}

fn required_text(field: &str, value: &str, max_len: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} cannot be empty", field)));
    }
    if trimmed.chars().count() > max_len {
        return Err(AppError::Validation(format!(
            "{} too long (max {} characters)",
            field, max_len
        )));
    }
    Ok(trimmed.to_string())
}

/// Execute create use case
///
/// # Arguments
///
/// * `repo` - Application repository (assigns the id)
/// * `time_provider` - Clock for `date_applied` (injected for determinism)
/// * `identity` - Caller; required
/// * `req` - Create request
pub async fn execute(
    repo: &dyn ApplicationRepository,
    time_provider: &dyn TimeProvider,
    identity: Option<&Identity>,
    req: CreateRequest,
) -> Result<ApplicationId> {
    let identity = identity.ok_or(AppError::Unauthenticated)?;
    let fields = validate_request(&req)?;

    let new_app = NewApplication {
        owner: identity.subject().to_string(),
        company: fields.company,
        role: fields.role,
        status: fields.status,
        date_applied: time_provider.now_millis(),
        notes: fields.notes,
    };

    let id = repo.insert(&new_app).await?;
    debug!(application_id = %id, owner = %identity, "Application created");

    Ok(id)
}
