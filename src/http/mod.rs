//! Server entry points: Streamable HTTP (axum) or stdio.

mod routes;


use std::net::IpAddr;
use std::sync::Arc;

use miette::Diagnostic;
use rmcp::ServiceExt;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::mcp::{AuthContext, McpServer, ToolSetConfig};
use crate::todoist::TodoistApi;

pub use routes::create_router;

#[derive(Error, Diagnostic, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(todoist_mcp::server::bind),
        help("Is another process already listening on this port? Try --port.")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server I/O error: {0}")]
    #[diagnostic(code(todoist_mcp::server::io))]
    Io(#[from] std::io::Error),

    #[error("MCP transport error: {0}")]
    #[diagnostic(code(todoist_mcp::server::transport))]
    Transport(String),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Which tools each session registers
    pub tools: ToolSetConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            tools: ToolSetConfig::default(),
        }
    }
}

/// Initialize tracing subscriber with env filter
///
/// Logs go to stderr so stdio mode keeps stdout for protocol messages.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todoist_mcp=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Serve MCP over Streamable HTTP until Ctrl-C
pub async fn run(
    config: Config,
    api: Arc<dyn TodoistApi>,
    auth: Arc<AuthContext>,
) -> Result<(), ServerError> {
    let ct = CancellationToken::new();
    let app = create_router(api, auth, config.tools.clone(), ct.clone())
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(
        minimal = config.tools.minimal,
        "MCP server listening on http://{}/mcp", addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
            ct.cancel();
        })
        .await?;
    Ok(())
}

/// Serve a single MCP session over stdin/stdout
pub async fn run_stdio(
    tools: ToolSetConfig,
    api: Arc<dyn TodoistApi>,
    auth: Arc<AuthContext>,
) -> Result<(), ServerError> {
    let server = McpServer::new(api, auth, &tools);
    info!(
        registered = server.registered().len(),
        "MCP server starting on stdio"
    );

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| ServerError::Transport(e.to_string()))?;

    service
        .waiting()
        .await
        .map_err(|e| ServerError::Transport(e.to_string()))?;
    Ok(())
}
