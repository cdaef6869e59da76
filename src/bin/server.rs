//! Todoist MCP server binary.
//!
//! Builds the upstream client and the authorization context, then hands both
//! to the HTTP or stdio server. Token acquisition (OAuth) happens elsewhere;
//! this binary only consumes the resulting access token.

use std::net::IpAddr;
use std::sync::Arc;

use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use todoist_mcp::http::{self, Config, ServerError};
use todoist_mcp::mcp::{AuthContext, ToolSetConfig};
use todoist_mcp::todoist::{ApiError, TodoistApi, TodoistClient};
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Could not resolve the Todoist user: {0}")]
    #[diagnostic(
        code(todoist_mcp::binary::identity),
        help("Check that TODOIST_API_TOKEN is valid, or pass --email and --full-name.")
    )]
    Identity(#[from] ApiError),

    #[error("Server error: {0}")]
    #[diagnostic(code(todoist_mcp::binary::server))]
    Server(#[from] ServerError),
}

#[derive(Parser)]
#[command(name = "todoist-mcp")]
#[command(author, version, about = "Todoist MCP server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Todoist access token obtained through OAuth or the integrations settings
    #[arg(long, env = "TODOIST_API_TOKEN", hide_env_values = true)]
    token: String,

    /// Email of the authorized user (looked up via the API when omitted)
    #[arg(long, env = "TODOIST_USER_EMAIL")]
    email: Option<String>,

    /// Display name of the authorized user (looked up via the API when omitted)
    #[arg(long, env = "TODOIST_USER_FULL_NAME")]
    full_name: Option<String>,

    /// Override the Todoist API base URL
    #[arg(long, env = "TODOIST_API_URL")]
    api_url: Option<String>,

    /// Register only the essential tools
    #[arg(long, env = "TODOIST_MINIMAL_TOOL_SET")]
    minimal: bool,

    /// Serve a single session over stdin/stdout instead of HTTP
    #[arg(long)]
    stdio: bool,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();
    http::init_tracing();
    let _ = rustls::crypto::ring::default_provider().install_default();

    let client = TodoistClient::new(cli.token.clone(), cli.api_url);
    info!(api_url = client.base_url(), "using Todoist API");
    let api: Arc<dyn TodoistApi> = Arc::new(client);

    let auth = AuthContext::resolve(api.as_ref(), cli.token, cli.email, cli.full_name).await?;
    info!(email = auth.email(), "authorized");
    let auth = Arc::new(auth);

    let tools = ToolSetConfig::default().with_minimal(cli.minimal);

    if cli.stdio {
        http::run_stdio(tools, api, auth).await?;
    } else {
        http::run(
            Config {
                host: cli.host,
                port: cli.port,
                tools,
            },
            api,
            auth,
        )
        .await?;
    }

    Ok(())
}
