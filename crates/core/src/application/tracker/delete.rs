// Delete Use Case

use super::load_owned;
use crate::domain::Identity;
use crate::error::{AppError, Result};
use crate::port::ApplicationRepository;
use tracing::debug;

/// Execute delete use case. Removal is permanent.
pub async fn execute(
    repo: &dyn ApplicationRepository,
    identity: Option<&Identity>,
    id: &str,
) -> Result<()> {
    let identity = identity.ok_or(AppError::Unauthenticated)?;
    load_owned(repo, identity, id).await?;

    if !repo.delete(id).await? {
        return Err(AppError::NotFoundOrUnauthorized(id.to_string()));
    }

    debug!(application_id = %id, "Application deleted");
    Ok(())
}
