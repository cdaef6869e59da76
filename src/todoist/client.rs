use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{Value, json};
use std::env;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::todoist::error::{ApiError, ApiResult};
use crate::todoist::fields::{Destination, JsonObject, query_pairs};

pub const DEFAULT_API_URL: &str = "https://api.todoist.com/api/v1";
pub const DEFAULT_SYNC_PATH: &str = "/sync";

/// Marker the sync endpoint reports for a command that was applied.
const SYNC_OK: &str = "ok";

/// Operations the tool layer needs from the upstream service.
///
/// `get`, `post` and `delete` address the resource endpoint; `move_task`
/// goes through the command endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoistApi: Send + Sync {
    /// GET `path` with the truthy subset of `query`. Returns JSON `null` on 204.
    async fn get(&self, path: &str, query: JsonObject) -> ApiResult<Value>;

    /// POST `body` as JSON to `path`.
    async fn post(&self, path: &str, body: Value) -> ApiResult<Value>;

    /// DELETE `path`.
    async fn delete(&self, path: &str) -> ApiResult<Value>;

    /// Submit a single `item_move` command and check its sync status.
    async fn move_task(&self, task_id: &str, destination: &Destination) -> ApiResult<Value>;
}

/// HTTP client for the Todoist REST and sync endpoints
#[derive(Clone)]
pub struct TodoistClient {
    base_url: String,
    sync_path: String,
    access_token: String,
    client: Client,
}

impl TodoistClient {
    /// Create a new client authenticated with `access_token`
    ///
    /// Priority for base URL:
    /// 1. Explicit `api_url` parameter
    /// 2. TODOIST_API_URL environment variable
    /// 3. Default: https://api.todoist.com/api/v1
    pub fn new(access_token: impl Into<String>, api_url: Option<String>) -> Self {
        let base_url = api_url
            .or_else(|| env::var("TODOIST_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            sync_path: DEFAULT_SYNC_PATH.to_string(),
            access_token: access_token.into(),
            client: Client::new(),
        }
    }

    /// Override the command endpoint path (relative to the base URL)
    pub fn with_sync_path(mut self, sync_path: impl Into<String>) -> Self {
        self.sync_path = sync_path.into();
        self
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn sync_url(&self) -> String {
        self.url(&self.sync_path)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.access_token)
    }

    /// Handle an upstream response with standardized error handling
    ///
    /// Returns the decoded body on success (JSON `null` for an empty body),
    /// or `ApiError::Upstream` carrying the status and raw text otherwise.
    pub async fn handle_response(response: Response) -> ApiResult<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = status.as_u16(), body = %body, "todoist request failed");
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// Check the per-command outcome reported by the sync endpoint
///
/// HTTP success only means the batch was accepted; the command itself
/// succeeded only if `sync_status[uuid]` is the literal `"ok"`.
pub fn check_sync_status(response: &Value, uuid: &str) -> ApiResult<()> {
    match response.get("sync_status").and_then(|map| map.get(uuid)) {
        Some(Value::String(s)) if s == SYNC_OK => Ok(()),
        Some(other) => Err(ApiError::Move {
            status: other.to_string(),
        }),
        None => Err(ApiError::Move {
            status: "missing".to_string(),
        }),
    }
}

#[async_trait]
impl TodoistApi for TodoistClient {
    #[instrument(skip(self, query))]
    async fn get(&self, path: &str, query: JsonObject) -> ApiResult<Value> {
        let url = self.url(path);
        let pairs = query_pairs(&query);
        debug!(method = "GET", url = %url, query = ?pairs, "todoist request");

        let response = self
            .authorized(self.client.get(&url))
            .query(&pairs)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    #[instrument(skip(self, body))]
    async fn post(&self, path: &str, body: Value) -> ApiResult<Value> {
        let url = self.url(path);
        debug!(method = "POST", url = %url, body = %body, "todoist request");

        let response = self
            .authorized(self.client.post(&url))
            .json(&body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &str) -> ApiResult<Value> {
        let url = self.url(path);
        debug!(method = "DELETE", url = %url, "todoist request");

        let response = self.authorized(self.client.delete(&url)).send().await?;
        Self::handle_response(response).await
    }

    #[instrument(skip(self, destination))]
    async fn move_task(&self, task_id: &str, destination: &Destination) -> ApiResult<Value> {
        let uuid = Uuid::new_v4().to_string();
        let commands = json!([{
            "type": "item_move",
            "uuid": uuid,
            "args": destination.move_args(task_id),
        }]);
        let url = self.sync_url();
        debug!(method = "POST", url = %url, body = %commands, "todoist sync command");

        let response = self
            .authorized(self.client.post(&url))
            .form(&[("commands", commands.to_string())])
            .send()
            .await?;
        let result = Self::handle_response(response).await?;

        check_sync_status(&result, &uuid)?;
        Ok(result)
    }
}
