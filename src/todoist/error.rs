use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Todoist API error ({status}): {body}")]
    #[diagnostic(code(todoist_mcp::todoist::upstream))]
    Upstream { status: u16, body: String },

    #[error("Move command was not applied (sync status: {status})")]
    #[diagnostic(
        code(todoist_mcp::todoist::move_failed),
        help("The sync endpoint accepted the request but rejected the item_move command.")
    )]
    Move { status: String },

    #[error("Failed to connect to Todoist: {source}")]
    #[diagnostic(
        code(todoist_mcp::todoist::connection_failed),
        help("Check network access, or set TODOIST_API_URL to point to the correct server.")
    )]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from Todoist: {message}")]
    #[diagnostic(code(todoist_mcp::todoist::invalid_response))]
    InvalidResponse { message: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() || e.is_request() {
            ApiError::Transport { source: e }
        } else {
            ApiError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
