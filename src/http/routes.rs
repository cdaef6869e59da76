//! HTTP route configuration.

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::mcp::{AuthContext, ToolSetConfig, create_mcp_service};
use crate::todoist::TodoistApi;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[instrument]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Create the router: `/health` plus the MCP service under `/mcp`
pub fn create_router(
    api: Arc<dyn TodoistApi>,
    auth: Arc<AuthContext>,
    tools: ToolSetConfig,
    cancellation_token: CancellationToken,
) -> Router {
    let mcp_service = create_mcp_service(api, auth, tools, cancellation_token);

    Router::new()
        .route("/health", get(health))
        .nest_service("/mcp", mcp_service)
}
