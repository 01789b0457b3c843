//! Stage Tracker Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    CreateRequest, CreateResponse, DeleteRequest, DeleteResponse, ExportResponse, ListResponse,
    StatsResponse, UpdateStatusRequest, UpdateStatusResponse,
};
use jsonrpsee::core::client::{ClientT, Subscription, SubscriptionClientT};
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::ws_client::{WsClient, WsClientBuilder};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::OnceCell;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// WebSocket endpoint served on the same address as HTTP
fn ws_url(url: &str) -> String {
    match url.split_once("://") {
        Some(("https", rest)) => format!("wss://{}", rest),
        Some(("http", rest)) => format!("ws://{}", rest),
        Some(_) => url.to_string(),
        None => format!("ws://{}", url),
    }
}

/// Stage Tracker Client
///
/// Talks to the daemon over HTTP JSON-RPC, and over WebSocket for
/// [`StageTrackerClient::subscribe`]. The bearer token given to
/// [`StageTrackerClient::with_token`] is sent with every call; without one the
/// daemon treats the caller as unauthenticated.
///
/// # Example
///
/// ```no_run
/// use stage_tracker_sdk::StageTrackerClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = StageTrackerClient::connect("http://127.0.0.1:9640")
///     .await?
///     .with_token("my-token");
/// # Ok(())
/// # }
/// ```
pub struct StageTrackerClient {
    client: HttpClient,
    url: String,
    /// Opened on first `subscribe`; subscriptions end when it is dropped
    ws: OnceCell<WsClient>,
    token: Option<String>,
}

impl StageTrackerClient {
    /// Connect to the daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:9640`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(REQUEST_TIMEOUT)
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self {
            client,
            url: url.to_string(),
            ws: OnceCell::new(),
            token: None,
        })
    }

    /// Authenticate subsequent calls with a bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Named params: the request's fields plus `auth_token`
    fn params<T: Serialize>(&self, request: Option<&T>) -> Result<ObjectParams> {
        let mut params = ObjectParams::new();
        if let Some(token) = &self.token {
            params.insert("auth_token", token)?;
        }

        if let Some(request) = request {
            match serde_json::to_value(request)? {
                serde_json::Value::Object(fields) => {
                    for (name, value) in fields {
                        params.insert(&name, value)?;
                    }
                }
                other => {
                    return Err(SdkError::Other(format!(
                        "request must serialize to an object, got {}",
                        other
                    )))
                }
            }
        }

        Ok(params)
    }

    fn auth_params(&self) -> Result<ObjectParams> {
        self.params::<()>(None)
    }

    /// List the caller's applications, newest first
    ///
    /// An unauthenticated caller gets an empty list.
    pub async fn list(&self) -> Result<ListResponse> {
        let response = self
            .client
            .request("applications.list.v1", self.auth_params()?)
            .await?;
        Ok(response)
    }

    /// Record a new application
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use stage_tracker_sdk::{CreateRequest, StageTrackerClient};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = StageTrackerClient::connect("http://127.0.0.1:9640").await?.with_token("t");
    /// let response = client
    ///     .create(CreateRequest::new("Acme", "Backend Intern").notes("referral"))
    ///     .await?;
    /// println!("Application ID: {}", response.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, request: CreateRequest) -> Result<CreateResponse> {
        let response = self
            .client
            .request("applications.create.v1", self.params(Some(&request))?)
            .await?;
        Ok(response)
    }

    /// Move an application to a new status
    pub async fn update_status(
        &self,
        id: impl Into<String>,
        status: impl Into<String>,
    ) -> Result<UpdateStatusResponse> {
        let request = UpdateStatusRequest {
            id: id.into(),
            status: status.into(),
        };
        let response = self
            .client
            .request("applications.update_status.v1", self.params(Some(&request))?)
            .await?;
        Ok(response)
    }

    /// Delete an application
    pub async fn delete(&self, id: impl Into<String>) -> Result<DeleteResponse> {
        let request = DeleteRequest { id: id.into() };
        let response = self
            .client
            .request("applications.delete.v1", self.params(Some(&request))?)
            .await?;
        Ok(response)
    }

    /// Per-status counts
    pub async fn stats(&self) -> Result<StatsResponse> {
        let response = self
            .client
            .request("applications.stats.v1", self.auth_params()?)
            .await?;
        Ok(response)
    }

    /// Live view of the caller's list
    ///
    /// The first item is the current list; each later item is the full list
    /// after a change to the caller's records. Needs the WebSocket transport,
    /// which is opened on first use and shared by later subscriptions.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use stage_tracker_sdk::StageTrackerClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = StageTrackerClient::connect("http://127.0.0.1:9640").await?.with_token("t");
    /// let mut live = client.subscribe().await?;
    /// while let Some(update) = live.next().await {
    ///     println!("{} applications", update?.applications.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn subscribe(&self) -> Result<Subscription<ListResponse>> {
        let ws = self
            .ws
            .get_or_try_init(|| async {
                WsClientBuilder::default()
                    .request_timeout(REQUEST_TIMEOUT)
                    .build(ws_url(&self.url))
                    .await
                    .map_err(|e| {
                        SdkError::Connection(format!("Failed to open WebSocket: {}", e))
                    })
            })
            .await?;

        let subscription = ws
            .subscribe(
                "applications.subscribe.v1",
                self.auth_params()?,
                "applications.unsubscribe.v1",
            )
            .await?;
        Ok(subscription)
    }

    /// CSV export of the caller's applications
    pub async fn export(&self) -> Result<ExportResponse> {
        let response = self
            .client
            .request("applications.export.v1", self.auth_params()?)
            .await?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonrpsee::core::traits::ToRpcParams;

    fn rendered(params: ObjectParams) -> Option<serde_json::Value> {
        params
            .to_rpc_params()
            .unwrap()
            .map(|raw| serde_json::from_str(raw.get()).unwrap())
    }

    #[tokio::test]
    async fn test_params_merge_token_and_fields() {
        let client = StageTrackerClient::connect("http://127.0.0.1:9640")
            .await
            .unwrap()
            .with_token("tok-alice");

        let request = DeleteRequest {
            id: "app-1".to_string(),
        };
        let value = rendered(client.params(Some(&request)).unwrap()).unwrap();
        assert_eq!(value["auth_token"], "tok-alice");
        assert_eq!(value["id"], "app-1");
    }

    #[test]
    fn test_ws_url() {
        assert_eq!(ws_url("http://127.0.0.1:9640"), "ws://127.0.0.1:9640");
        assert_eq!(ws_url("https://tracker.example"), "wss://tracker.example");
        assert_eq!(ws_url("ws://127.0.0.1:9640"), "ws://127.0.0.1:9640");
        assert_eq!(ws_url("127.0.0.1:9640"), "ws://127.0.0.1:9640");
    }

    #[tokio::test]
    async fn test_anonymous_auth_params_are_empty() {
        let client = StageTrackerClient::connect("http://127.0.0.1:9640")
            .await
            .unwrap();
        assert!(rendered(client.auth_params().unwrap()).is_none());
    }
}
