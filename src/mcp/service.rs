//! MCP Streamable HTTP service creation
//!
//! This module provides functions to create the MCP service
//! that can be integrated with an Axum router.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::mcp::auth::AuthContext;
use crate::mcp::config::ToolSetConfig;
use crate::todoist::TodoistApi;

use super::server::McpServer;

/// Create MCP Streamable HTTP service
///
/// Every session gets its own `McpServer`, built from the same
/// configuration, so every session sees the same tool table.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use todoist_mcp::mcp::{AuthContext, ToolSetConfig, create_mcp_service};
/// # use todoist_mcp::todoist::TodoistClient;
///
/// let api = Arc::new(TodoistClient::new("token", None));
/// let auth = Arc::new(AuthContext::new("token", "ada@example.com", "Ada"));
/// let ct = CancellationToken::new();
/// let mcp_service = create_mcp_service(api, auth, ToolSetConfig::minimal(), ct);
///
/// let app: Router = Router::new().nest_service("/mcp", mcp_service);
/// ```
pub fn create_mcp_service(
    api: Arc<dyn TodoistApi>,
    auth: Arc<AuthContext>,
    config: ToolSetConfig,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer, LocalSessionManager> {
    // Service factory: creates new McpServer instance per session
    // Note: Returns io::Error to match rmcp's expected signature
    let service_factory = move || -> Result<McpServer, std::io::Error> {
        Ok(McpServer::new(Arc::clone(&api), Arc::clone(&auth), &config))
    };

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        service_config(cancellation_token),
    )
}

/// Stateful sessions with rmcp's default SSE keep-alive and retry settings.
pub(crate) fn service_config(cancellation_token: CancellationToken) -> StreamableHttpServerConfig {
    let mut config = StreamableHttpServerConfig::default();
    config.stateful_mode = true;
    config.cancellation_token = cancellation_token;
    config
}
