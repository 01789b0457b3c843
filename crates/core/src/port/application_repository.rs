// Application Repository Port (Interface)

use crate::domain::{Application, ApplicationId, ApplicationStatus, NewApplication};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for Application persistence.
///
/// Each mutation is atomic per record. There is no cross-record transaction
/// and no version check: concurrent status patches are last-write-wins.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Insert a new application and return the store-generated id
    async fn insert(&self, application: &NewApplication) -> Result<ApplicationId>;

    /// Point lookup by id
    async fn find_by_id(&self, id: &str) -> Result<Option<Application>>;

    /// All applications of `owner`, newest first (date_applied DESC, then
    /// insertion order DESC)
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Application>>;

    /// Patch only the status column. Returns false if no row matched.
    async fn update_status(&self, id: &str, status: ApplicationStatus) -> Result<bool>;

    /// Hard delete. Returns false if no row matched.
    async fn delete(&self, id: &str) -> Result<bool>;
}
