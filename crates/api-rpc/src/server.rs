//! JSON-RPC Server
//!
//! HTTP + WebSocket JSON-RPC 2.0 on localhost. Subscriptions need the
//! WebSocket transport.

use crate::handler::RpcHandler;
use crate::types::{AuthOnlyRequest, ListResponse};
use jsonrpsee::core::SubscriptionResult;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::types::{ErrorObjectOwned, Params};
use jsonrpsee::{PendingSubscriptionSink, RpcModule, SubscriptionMessage, SubscriptionSink};
use serde::de::DeserializeOwned;
use stage_tracker_core::application::ApplicationService;
use stage_tracker_core::domain::Application;
use stage_tracker_core::port::IdentityProvider;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_RPC_HOST: &str = "127.0.0.1";
pub const DEFAULT_RPC_PORT: u16 = 9640;

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// Parse params for methods whose fields are all optional; absent params
/// mean "no credential".
fn parse_optional<T>(params: &Params<'_>) -> Result<T, ErrorObjectOwned>
where
    T: DeserializeOwned + Default,
{
    if params.as_str().is_none() {
        return Ok(T::default());
    }
    params.parse()
}

async fn send_snapshot(sink: &SubscriptionSink, apps: Vec<Application>) -> SubscriptionResult {
    let response = ListResponse {
        applications: apps.into_iter().map(Into::into).collect(),
    };
    let msg = SubscriptionMessage::from_json(&response)?;
    sink.send(msg).await?;
    Ok(())
}

/// Forward live-query refreshes to one subscriber until either side goes away
async fn pipe_applications(
    handler: Arc<RpcHandler>,
    params: Params<'static>,
    pending: PendingSubscriptionSink,
) -> SubscriptionResult {
    let req: AuthOnlyRequest = match parse_optional(&params) {
        Ok(req) => req,
        Err(e) => {
            pending.reject(e).await;
            return Ok(());
        }
    };

    let mut subscription = match handler.watch(req).await {
        Ok(sub) => sub,
        Err(e) => {
            pending.reject(e).await;
            return Ok(());
        }
    };

    let sink = pending.accept().await?;
    debug!(subscription_id = ?sink.subscription_id(), "Live list subscription accepted");

    send_snapshot(&sink, subscription.current()).await?;

    loop {
        tokio::select! {
            _ = sink.closed() => break,
            next = subscription.changed() => match next {
                Some(apps) => send_snapshot(&sink, apps).await?,
                // Unauthenticated callers never get refreshes; hold until they leave
                None => {
                    sink.closed().await;
                    break;
                }
            },
        }
    }

    debug!(subscription_id = ?sink.subscription_id(), "Live list subscription closed");
    Ok(())
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(
        config: RpcServerConfig,
        service: Arc<ApplicationService>,
        identity_provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(service, identity_provider)),
        }
    }

    /// Build the method table
    pub fn module(&self) -> Result<RpcModule<()>, String> {
        let mut module = RpcModule::new(());

        let handler = self.handler.clone();
        module
            .register_async_method("applications.list.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: AuthOnlyRequest = parse_optional(&params)?;
                    handler.list(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("applications.create.v1", move |params, _, _| {
                let handler = handler.clone();
                async move { handler.create(params.parse()?).await }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("applications.update_status.v1", move |params, _, _| {
                let handler = handler.clone();
                async move { handler.update_status(params.parse()?).await }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("applications.delete.v1", move |params, _, _| {
                let handler = handler.clone();
                async move { handler.delete(params.parse()?).await }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("applications.stats.v1", move |params, _, _| {
                let handler = handler.clone();
                async move { handler.stats(parse_optional(&params)?).await }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("applications.export.v1", move |params, _, _| {
                let handler = handler.clone();
                async move { handler.export(parse_optional(&params)?).await }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_subscription(
                "applications.subscribe.v1",
                "applications.changed",
                "applications.unsubscribe.v1",
                move |params, pending, _, _| {
                    let handler = handler.clone();
                    async move { pipe_applications(handler, params, pending).await }
                },
            )
            .map_err(|e| e.to_string())?;

        Ok(module)
    }

    /// Start the JSON-RPC server
    ///
    /// Returns the bound address (port 0 picks a free one) and the handle
    /// used for shutdown.
    pub async fn start(self) -> Result<(SocketAddr, ServerHandle), String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;
        let local_addr = server
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {}", e))?;

        let module = self.module()?;
        let handle = server.start(module);

        info!(addr = %local_addr, "JSON-RPC server started");
        Ok((local_addr, handle))
    }
}
