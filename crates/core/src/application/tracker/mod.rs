// Application Tracker Service - ownership-scoped access layer

pub mod create;
pub mod delete;
pub mod update_status;


pub use create::CreateRequest;

use crate::application::export::export_csv;
use crate::application::live_query::{ApplicationSubscription, LiveQueryHub};
use crate::application::stats::ApplicationStats;
use crate::domain::{Application, ApplicationId, ApplicationStatus, Identity};
use crate::error::{AppError, Result};
use crate::port::{ApplicationRepository, TimeProvider};
use std::sync::Arc;
use tracing::{debug, warn};

/// Load `id` and check that `identity` owns it.
///
/// Missing and foreign records produce the same error.
pub(crate) async fn load_owned(
    repo: &dyn ApplicationRepository,
    identity: &Identity,
    id: &str,
) -> Result<Application> {
    match repo.find_by_id(id).await? {
        Some(app) if app.is_owned_by(identity) => Ok(app),
        _ => Err(AppError::NotFoundOrUnauthorized(id.to_string())),
    }
}

/// Access layer over the application store.
///
/// Every operation takes the caller identity explicitly. Read paths treat a
/// missing identity as "no data"; write paths reject it.
pub struct ApplicationService {
    repo: Arc<dyn ApplicationRepository>,
    time_provider: Arc<dyn TimeProvider>,
    live: Arc<LiveQueryHub>,
}

impl ApplicationService {
    pub fn new(
        repo: Arc<dyn ApplicationRepository>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self::with_hub(repo, time_provider, Arc::new(LiveQueryHub::new()))
    }

    /// Build with a shared hub (several service handles, one set of subscribers)
    pub fn with_hub(
        repo: Arc<dyn ApplicationRepository>,
        time_provider: Arc<dyn TimeProvider>,
        live: Arc<LiveQueryHub>,
    ) -> Self {
        Self {
            repo,
            time_provider,
            live,
        }
    }

    pub fn hub(&self) -> &Arc<LiveQueryHub> {
        &self.live
    }

    /// List the caller's applications, newest first.
    ///
    /// Unauthenticated callers get an empty list, never an error.
    pub async fn list(&self, identity: Option<&Identity>) -> Result<Vec<Application>> {
        match identity {
            Some(identity) => self.repo.list_by_owner(identity.subject()).await,
            None => Ok(Vec::new()),
        }
    }

    /// Create an application owned by the caller
    pub async fn create(
        &self,
        identity: Option<&Identity>,
        req: CreateRequest,
    ) -> Result<ApplicationId> {
        let id = create::execute(
            self.repo.as_ref(),
            self.time_provider.as_ref(),
            identity,
            req,
        )
        .await?;

        if let Some(identity) = identity {
            self.refresh(identity).await;
        }
        Ok(id)
    }

    /// Change the status of one of the caller's applications
    pub async fn update_status(
        &self,
        identity: Option<&Identity>,
        id: &str,
        status: ApplicationStatus,
    ) -> Result<()> {
        update_status::execute(self.repo.as_ref(), identity, id, status).await?;

        if let Some(identity) = identity {
            self.refresh(identity).await;
        }
        Ok(())
    }

    /// Permanently remove one of the caller's applications
    pub async fn delete(&self, identity: Option<&Identity>, id: &str) -> Result<()> {
        delete::execute(self.repo.as_ref(), identity, id).await?;

        if let Some(identity) = identity {
            self.refresh(identity).await;
        }
        Ok(())
    }

    /// Aggregate counts over the caller's applications
    pub async fn stats(&self, identity: Option<&Identity>) -> Result<ApplicationStats> {
        let apps = self.list(identity).await?;
        Ok(ApplicationStats::from_applications(&apps))
    }

    /// CSV rendering of the caller's list, in list order
    pub async fn export_csv(&self, identity: Option<&Identity>) -> Result<String> {
        let apps = self.list(identity).await?;
        export_csv(&apps)
    }

    /// Subscribe to the caller's list.
    ///
    /// The subscription starts with the current list and yields a refreshed
    /// list after each mutation of the caller's records.
    pub async fn watch(&self, identity: Option<&Identity>) -> Result<ApplicationSubscription> {
        match identity {
            Some(identity) => {
                // A mutation committing meanwhile refreshes after we register
                let _guard = self.live.snapshot_guard().await;
                let initial = self.repo.list_by_owner(identity.subject()).await?;
                Ok(self.live.subscribe(identity.subject(), initial).await)
            }
            None => Ok(ApplicationSubscription::empty()),
        }
    }

    /// Push the owner's refreshed list to live subscribers.
    ///
    /// The mutation has already committed, so a failed re-query is logged
    /// rather than returned.
    async fn refresh(&self, identity: &Identity) {
        let owner = identity.subject();
        let _guard = self.live.snapshot_guard().await;
        if !self.live.has_subscribers(owner).await {
            self.live.prune(owner).await;
            return;
        }

        match self.repo.list_by_owner(owner).await {
            Ok(apps) => {
                debug!(owner = %owner, count = apps.len(), "Publishing live query refresh");
                self.live.publish(owner, apps).await;
            }
            Err(e) => warn!(owner = %owner, error = %e, "Live query refresh failed"),
        }
    }
}
