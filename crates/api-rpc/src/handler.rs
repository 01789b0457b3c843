//! RPC Method Handlers
//!
//! Resolves the caller identity, then delegates to the application service.

use crate::error::to_rpc_error;
use crate::types::{
    ApplicationView, AuthOnlyRequest, CreateRequest, CreateResponse, DeleteRequest,
    DeleteResponse, ExportResponse, ListResponse, StatsResponse, UpdateStatusRequest,
    UpdateStatusResponse,
};
use jsonrpsee::types::ErrorObjectOwned;
use stage_tracker_core::application::{
    tracker, ApplicationService, ApplicationSubscription, EXPORT_FILENAME,
};
use stage_tracker_core::domain::{ApplicationStatus, Identity};
use stage_tracker_core::error::AppError;
use stage_tracker_core::port::IdentityProvider;
use std::sync::Arc;
use tracing::info;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    service: Arc<ApplicationService>,
    identity_provider: Arc<dyn IdentityProvider>,
}

impl RpcHandler {
    pub fn new(
        service: Arc<ApplicationService>,
        identity_provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            service,
            identity_provider,
        }
    }

    async fn identify(&self, token: Option<&str>) -> Result<Option<Identity>, ErrorObjectOwned> {
        self.identity_provider
            .resolve(token)
            .await
            .map_err(to_rpc_error)
    }

    fn parse_status(status: &str) -> Result<ApplicationStatus, ErrorObjectOwned> {
        status
            .parse()
            .map_err(|e| to_rpc_error(AppError::Domain(e)))
    }

    /// applications.list.v1
    pub async fn list(&self, params: AuthOnlyRequest) -> Result<ListResponse, ErrorObjectOwned> {
        let identity = self.identify(params.auth_token.as_deref()).await?;
        let apps = self
            .service
            .list(identity.as_ref())
            .await
            .map_err(to_rpc_error)?;

        Ok(ListResponse {
            applications: apps.into_iter().map(ApplicationView::from).collect(),
        })
    }

    /// applications.create.v1
    pub async fn create(&self, params: CreateRequest) -> Result<CreateResponse, ErrorObjectOwned> {
        let identity = self.identify(params.auth_token.as_deref()).await?;

        let req = tracker::CreateRequest {
            company: params.company,
            role: params.role,
            status: params.status,
            notes: params.notes,
        };
        let id = self
            .service
            .create(identity.as_ref(), req.clone())
            .await
            .map_err(to_rpc_error)?;

        info!(application_id = %id, "Application created via RPC");

        // Validation already succeeded, so the status parses
        let status = Self::parse_status(&req.status)?;
        Ok(CreateResponse {
            id,
            status: status.to_string(),
        })
    }

    /// applications.update_status.v1
    pub async fn update_status(
        &self,
        params: UpdateStatusRequest,
    ) -> Result<UpdateStatusResponse, ErrorObjectOwned> {
        let identity = self.identify(params.auth_token.as_deref()).await?;
        let status = Self::parse_status(&params.status)?;

        self.service
            .update_status(identity.as_ref(), &params.id, status)
            .await
            .map_err(to_rpc_error)?;

        Ok(UpdateStatusResponse {
            id: params.id,
            status: status.to_string(),
        })
    }

    /// applications.delete.v1
    pub async fn delete(&self, params: DeleteRequest) -> Result<DeleteResponse, ErrorObjectOwned> {
        let identity = self.identify(params.auth_token.as_deref()).await?;

        self.service
            .delete(identity.as_ref(), &params.id)
            .await
            .map_err(to_rpc_error)?;

        info!(application_id = %params.id, "Application deleted via RPC");

        Ok(DeleteResponse {
            id: params.id,
            deleted: true,
        })
    }

    /// applications.stats.v1
    pub async fn stats(&self, params: AuthOnlyRequest) -> Result<StatsResponse, ErrorObjectOwned> {
        let identity = self.identify(params.auth_token.as_deref()).await?;
        self.service
            .stats(identity.as_ref())
            .await
            .map_err(to_rpc_error)
    }

    /// applications.export.v1
    pub async fn export(&self, params: AuthOnlyRequest) -> Result<ExportResponse, ErrorObjectOwned> {
        let identity = self.identify(params.auth_token.as_deref()).await?;
        let csv = self
            .service
            .export_csv(identity.as_ref())
            .await
            .map_err(to_rpc_error)?;

        Ok(ExportResponse {
            filename: EXPORT_FILENAME.to_string(),
            csv,
        })
    }

    /// applications.subscribe.v1
    pub async fn watch(
        &self,
        params: AuthOnlyRequest,
    ) -> Result<ApplicationSubscription, ErrorObjectOwned> {
        let identity = self.identify(params.auth_token.as_deref()).await?;
        self.service
            .watch(identity.as_ref())
            .await
            .map_err(to_rpc_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenIdentityProvider;
    use crate::error::code;
    use stage_tracker_core::port::id_provider::UuidProvider;
    use stage_tracker_core::port::time_provider::SystemTimeProvider;
    use stage_tracker_infra_sqlite::{create_pool, run_migrations, SqliteApplicationRepository};

    async fn setup_handler() -> RpcHandler {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        let repo = Arc::new(SqliteApplicationRepository::new(pool, Arc::new(UuidProvider)));
        let service = Arc::new(ApplicationService::new(repo, Arc::new(SystemTimeProvider)));
        let identities =
            StaticTokenIdentityProvider::from_pairs("tok-alice=alice,tok-bob=bob").unwrap();
        RpcHandler::new(service, Arc::new(identities))
    }

    fn auth(token: Option<&str>) -> AuthOnlyRequest {
        AuthOnlyRequest {
            auth_token: token.map(str::to_string),
        }
    }

    fn create(token: Option<&str>, status: &str) -> CreateRequest {
        CreateRequest {
            auth_token: token.map(str::to_string),
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            status: status.to_string(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let handler = setup_handler().await;

        let created = handler.create(create(Some("tok-alice"), "applied")).await.unwrap();
        assert_eq!(created.status, "applied");

        let listed = handler.list(auth(Some("tok-alice"))).await.unwrap();
        assert_eq!(listed.applications.len(), 1);
        assert_eq!(listed.applications[0].id, created.id);

        let anonymous = handler.list(auth(None)).await.unwrap();
        assert!(anonymous.applications.is_empty());
    }

    #[tokio::test]
    async fn test_create_without_token_is_unauthenticated() {
        let handler = setup_handler().await;
        let err = handler.create(create(None, "applied")).await.unwrap_err();
        assert_eq!(err.code(), code::UNAUTHENTICATED);

        let err = handler
            .create(create(Some("stolen"), "applied"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), code::UNAUTHENTICATED);
    }

    #[tokio::test]
    async fn test_create_bogus_status_is_validation_error() {
        let handler = setup_handler().await;
        let err = handler
            .create(create(Some("tok-alice"), "bogus"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), code::VALIDATION_ERROR);
    }

    #[tokio::test]
    async fn test_foreign_update_and_delete_are_rejected() {
        let handler = setup_handler().await;
        let created = handler.create(create(Some("tok-alice"), "applied")).await.unwrap();

        let err = handler
            .update_status(UpdateStatusRequest {
                auth_token: Some("tok-bob".to_string()),
                id: created.id.clone(),
                status: "offer".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), code::NOT_FOUND_OR_UNAUTHORIZED);

        let err = handler
            .delete(DeleteRequest {
                auth_token: Some("tok-bob".to_string()),
                id: created.id.clone(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), code::NOT_FOUND_OR_UNAUTHORIZED);

        let updated = handler
            .update_status(UpdateStatusRequest {
                auth_token: Some("tok-alice".to_string()),
                id: created.id.clone(),
                status: "offer".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(updated.status, "offer");
    }

    #[tokio::test]
    async fn test_stats_and_export() {
        let handler = setup_handler().await;
        handler.create(create(Some("tok-alice"), "interview")).await.unwrap();

        let stats = handler.stats(auth(Some("tok-alice"))).await.unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.interview, 1);

        let export = handler.export(auth(Some("tok-alice"))).await.unwrap();
        assert_eq!(export.filename, "internship_applications.csv");
        assert_eq!(export.csv.lines().count(), 2);
        assert!(export.csv.contains(r#""Acme","Engineer","interview""#));
    }
}
