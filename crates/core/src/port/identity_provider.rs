// Identity Provider Port

use crate::domain::Identity;
use crate::error::Result;
use async_trait::async_trait;

/// Resolves a request credential into a caller identity.
///
/// Absence of identity is a normal outcome (`Ok(None)`), not an error:
/// each operation decides whether it requires one.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, credential: Option<&str>) -> Result<Option<Identity>>;
}
