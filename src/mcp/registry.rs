//! Tool descriptors, registration filtering and the call pipeline.
//!
//! A [`ToolDescriptor`] is static data: name, description, generated input
//! schema and a handler returning a plain payload or a [`ToolError`]. Handlers
//! never build the result envelope; [`invoke`] runs the handler and owns the
//! conversion of every outcome into a `CallToolResult`.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, Tool},
    schemars::{self, JsonSchema},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

use crate::mcp::auth::AuthContext;
use crate::mcp::config::ToolSetConfig;
use crate::todoist::{ApiError, JsonObject, TodoistApi};

#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A cross-field requirement failed before any upstream call.
    #[error("{0}")]
    Precondition(String),

    /// Arguments did not match the declared schema.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ToolResult<T> = Result<T, ToolError>;

/// What a handler produced on success.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// Rendered as pretty-printed JSON.
    Json(Value),
    /// Rendered verbatim.
    Message(String),
}

impl ToolOutput {
    /// The upstream payload, or `message` when the upstream returned no content.
    pub fn or_message(value: Value, message: impl Into<String>) -> Self {
        if value.is_null() {
            ToolOutput::Message(message.into())
        } else {
            ToolOutput::Json(value)
        }
    }

    pub fn into_text(self) -> ToolResult<String> {
        match self {
            ToolOutput::Json(value) => Ok(serde_json::to_string_pretty(&value)?),
            ToolOutput::Message(message) => Ok(message),
        }
    }
}

/// Everything a handler may use during one call.
#[derive(Clone)]
pub struct ToolContext {
    pub api: Arc<dyn TodoistApi>,
    pub auth: Arc<AuthContext>,
}

impl ToolContext {
    pub fn new(api: Arc<dyn TodoistApi>, auth: Arc<AuthContext>) -> Self {
        Self { api, auth }
    }
}

pub type ToolHandler = fn(ToolContext, JsonObject) -> BoxFuture<'static, ToolResult<ToolOutput>>;

/// Static declaration of one callable tool.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    /// Gerund phrase used in error text, e.g. "creating task".
    pub action: &'static str,
    pub input_schema: Arc<JsonObject>,
    pub handler: ToolHandler,
    /// Registered whatever the tool set configuration says.
    pub always_registered: bool,
}

impl ToolDescriptor {
    pub fn to_tool(&self) -> Tool {
        Tool::new(self.name, self.description, Arc::clone(&self.input_schema))
    }
}

/// JSON schema object for a parameter struct.
pub fn schema_for<P: JsonSchema>() -> Arc<JsonObject> {
    match serde_json::to_value(schemars::schema_for!(P)) {
        Ok(Value::Object(mut schema)) => {
            schema.remove("$schema");
            Arc::new(schema)
        }
        _ => {
            let mut schema = JsonObject::new();
            schema.insert("type".into(), Value::String("object".into()));
            Arc::new(schema)
        }
    }
}

/// Deserialize raw call arguments into a parameter struct.
pub fn parse_params<P: DeserializeOwned>(arguments: JsonObject) -> ToolResult<P> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ToolError::InvalidParams(e.to_string()))
}

/// Registration predicate, evaluated once per descriptor per session.
pub fn should_register(descriptor: &ToolDescriptor, config: &ToolSetConfig) -> bool {
    descriptor.always_registered || !config.minimal || config.is_essential(descriptor.name)
}

/// Tools a server session accepts calls for.
#[derive(Debug, Clone, Default)]
pub struct RegisteredToolTable {
    tools: BTreeMap<&'static str, &'static ToolDescriptor>,
}

impl RegisteredToolTable {
    pub fn build(catalog: &'static [ToolDescriptor], config: &ToolSetConfig) -> Self {
        let tools: BTreeMap<_, _> = catalog
            .iter()
            .filter(|descriptor| should_register(descriptor, config))
            .map(|descriptor| (descriptor.name, descriptor))
            .collect();

        debug!(
            registered = tools.len(),
            catalog = catalog.len(),
            minimal = config.minimal,
            "built tool table"
        );
        Self { tools }
    }

    pub fn get(&self, name: &str) -> Option<&'static ToolDescriptor> {
        self.tools.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tools.keys().copied()
    }

    pub fn tools(&self) -> Vec<Tool> {
        self.tools.values().map(|d| d.to_tool()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Failure envelope: `"Error <action>: <message>"`.
pub fn error_result(action: &str, message: &str) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Error {}: {}", action, message))])
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("Unknown error")
}

/// Run one tool call and normalize its outcome.
///
/// Schema violations come back as `Err(invalid_params)` for the transport to
/// report. Every other failure, including a panicking handler, becomes an
/// `is_error` result.
#[instrument(skip_all, fields(tool = descriptor.name))]
pub async fn invoke(
    descriptor: &ToolDescriptor,
    arguments: Option<JsonObject>,
    context: ToolContext,
) -> Result<CallToolResult, McpError> {
    let call = (descriptor.handler)(context, arguments.unwrap_or_default());

    let outcome = match AssertUnwindSafe(call).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(panic = message, "tool handler panicked");
            return Ok(error_result(descriptor.action, message));
        }
    };

    match outcome.and_then(ToolOutput::into_text) {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(ToolError::InvalidParams(message)) => {
            debug!(%message, "rejected tool arguments");
            Err(McpError::invalid_params(message, None))
        }
        Err(e) => {
            warn!(error = %e, "tool call failed");
            Ok(error_result(descriptor.action, &e.to_string()))
        }
    }
}
