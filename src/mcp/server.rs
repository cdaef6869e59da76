//! MCP server implementation
//!
//! One `McpServer` is created per session. It owns the session's
//! authorization context and the table of tools registered for it, and
//! routes every `tools/call` through [`invoke`].

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, ListToolsResult, PaginatedRequestParams,
        ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
};
use tracing::debug;

use crate::mcp::auth::AuthContext;
use crate::mcp::config::ToolSetConfig;
use crate::mcp::registry::{RegisteredToolTable, ToolContext, invoke};
use crate::mcp::tools;
use crate::todoist::{JsonObject, TodoistApi};

/// Main MCP server coordinator
#[derive(Clone)]
pub struct McpServer {
    api: Arc<dyn TodoistApi>,
    auth: Arc<AuthContext>,
    tools: Arc<RegisteredToolTable>,
}

impl McpServer {
    /// Create a server session
    ///
    /// # Arguments
    /// * `api` - Upstream client shared by every session
    /// * `auth` - Authorization context of the session's user
    /// * `config` - Decides which part of the catalogue is registered
    pub fn new(api: Arc<dyn TodoistApi>, auth: Arc<AuthContext>, config: &ToolSetConfig) -> Self {
        Self {
            api,
            auth,
            tools: Arc::new(RegisteredToolTable::build(tools::catalog(), config)),
        }
    }

    /// Tools this session accepts calls for
    pub fn registered(&self) -> &RegisteredToolTable {
        &self.tools
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Dispatch one call by tool name
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let Some(descriptor) = self.tools.get(name) else {
            debug!(tool = name, "call for unregistered tool");
            return Err(McpError::invalid_params(
                format!("tool not found: {}", name),
                None,
            ));
        };

        let context = ToolContext::new(Arc::clone(&self.api), Arc::clone(&self.auth));
        invoke(descriptor, arguments, context).await
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.instructions = Some(
            "Todoist MCP Server - Manage Todoist projects, sections, tasks, labels and comments"
                .to_string(),
        );
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(&request.name, request.arguments).await
    }
}
