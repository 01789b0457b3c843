// Update-Status Use Case

use super::load_owned;
use crate::domain::{ApplicationStatus, Identity};
use crate::error::{AppError, Result};
use crate::port::ApplicationRepository;
use tracing::debug;

/// Execute update-status use case. Only the status column is touched.
pub async fn execute(
    repo: &dyn ApplicationRepository,
    identity: Option<&Identity>,
    id: &str,
    status: ApplicationStatus,
) -> Result<()> {
    let identity = identity.ok_or(AppError::Unauthenticated)?;
    load_owned(repo, identity, id).await?;

    // Row may have been deleted since the ownership check
    if !repo.update_status(id, status).await? {
        return Err(AppError::NotFoundOrUnauthorized(id.to_string()));
    }

    debug!(application_id = %id, status = %status, "Application status updated");
    Ok(())
}
