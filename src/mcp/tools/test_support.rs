//! Helpers shared by the tool tests.

use std::sync::Arc;

use rmcp::model::{CallToolResult, RawContent};
use serde_json::Value;

use crate::mcp::auth::AuthContext;
use crate::mcp::registry::{ToolContext, invoke};
use crate::mcp::tools;
use crate::todoist::{ApiError, MockTodoistApi};

pub fn auth() -> Arc<AuthContext> {
    Arc::new(AuthContext::new(
        "test-token",
        "ada@example.com",
        "Ada Lovelace",
    ))
}

pub fn context(mock: MockTodoistApi) -> ToolContext {
    ToolContext::new(Arc::new(mock), auth())
}

/// Call a catalogue tool by name with JSON arguments.
pub async fn call(mock: MockTodoistApi, name: &str, arguments: Value) -> CallToolResult {
    let descriptor = tools::find(name).unwrap_or_else(|| panic!("unknown tool {}", name));
    let arguments = match arguments {
        Value::Object(map) => Some(map),
        _ => None,
    };
    invoke(descriptor, arguments, context(mock))
        .await
        .expect("tool call should produce a result")
}

pub fn text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    }
}

pub fn json(result: &CallToolResult) -> Value {
    serde_json::from_str(text(result)).expect("tool output should be JSON")
}

pub fn is_error(result: &CallToolResult) -> bool {
    result.is_error.unwrap_or(false)
}

pub fn upstream_error() -> ApiError {
    ApiError::Upstream {
        status: 404,
        body: "Task not found".to_string(),
    }
}
