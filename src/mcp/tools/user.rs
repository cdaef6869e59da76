//! Identity of the authorized user.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::mcp::registry::{ToolContext, ToolDescriptor, ToolOutput, ToolResult};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetUserInfoParams {}

/// Answered from the session's authorization context, without an upstream call.
pub async fn get_user_info(ctx: ToolContext, _params: GetUserInfoParams) -> ToolResult<ToolOutput> {
    Ok(ToolOutput::Json(json!({
        "email": ctx.auth.email(),
        "full_name": ctx.auth.full_name(),
    })))
}

pub fn descriptors() -> Vec<ToolDescriptor> {
    vec![ToolDescriptor {
        always_registered: true,
        ..tool!(
            "get_user_info",
            GetUserInfoParams,
            get_user_info,
            action = "getting user info",
            description = "Get the email address and name of the Todoist user this session is authorized as.",
        )
    }]
}
