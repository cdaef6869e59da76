//! Comment tool implementations

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

use crate::mcp::registry::{ToolContext, ToolDescriptor, ToolOutput, ToolResult};
use crate::mcp::tools::id_path;
use crate::todoist::Fields;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetCommentsParams {
    #[schemars(description = "List comments of this task (one of task_id or project_id)")]
    pub task_id: Option<String>,
    #[schemars(description = "List comments of this project (one of task_id or project_id)")]
    pub project_id: Option<String>,
    #[schemars(description = "Pagination cursor returned by a previous call (optional)")]
    pub cursor: Option<String>,
    #[schemars(
        description = "Maximum number of comments to return (default: 50, max: 200)",
        range(min = 1, max = 200)
    )]
    #[serde(default, deserialize_with = "crate::serde_utils::limit")]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CommentIdParams {
    #[schemars(description = "Comment ID")]
    pub comment_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateCommentParams {
    #[schemars(description = "Comment text (markdown supported)")]
    pub content: String,
    #[schemars(description = "Task to comment on (one of task_id or project_id)")]
    pub task_id: Option<String>,
    #[schemars(description = "Project to comment on (one of task_id or project_id)")]
    pub project_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateCommentParams {
    #[schemars(description = "Comment ID to update")]
    pub comment_id: String,
    #[schemars(description = "New comment text")]
    pub content: String,
}

pub async fn get_comments(ctx: ToolContext, params: GetCommentsParams) -> ToolResult<ToolOutput> {
    let query = Fields::new()
        .with_opt("task_id", params.task_id)
        .with_opt("project_id", params.project_id)
        .with_opt("cursor", params.cursor)
        .with_opt("limit", params.limit)
        .into_query();
    let comments = ctx.api.get("/comments", query).await?;
    Ok(ToolOutput::Json(comments))
}

pub async fn get_comment(ctx: ToolContext, params: CommentIdParams) -> ToolResult<ToolOutput> {
    let path = id_path("comments", &params.comment_id)?;
    let comment = ctx.api.get(&path, Default::default()).await?;
    Ok(ToolOutput::Json(comment))
}

pub async fn create_comment(
    ctx: ToolContext,
    params: CreateCommentParams,
) -> ToolResult<ToolOutput> {
    let body = Fields::new()
        .with("content", params.content)
        .with_opt("task_id", params.task_id)
        .with_opt("project_id", params.project_id)
        .into_body();
    let comment = ctx.api.post("/comments", body).await?;
    Ok(ToolOutput::Json(comment))
}

pub async fn update_comment(
    ctx: ToolContext,
    params: UpdateCommentParams,
) -> ToolResult<ToolOutput> {
    let body = Fields::new().with("content", params.content).into_body();
    let path = id_path("comments", &params.comment_id)?;
    let comment = ctx.api.post(&path, body).await?;
    Ok(ToolOutput::Json(comment))
}

pub async fn delete_comment(ctx: ToolContext, params: CommentIdParams) -> ToolResult<ToolOutput> {
    let path = id_path("comments", &params.comment_id)?;
    let result = ctx.api.delete(&path).await?;
    Ok(ToolOutput::or_message(
        result,
        format!("Comment {} deleted successfully", params.comment_id),
    ))
}

pub fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        tool!(
            "get_comments",
            GetCommentsParams,
            get_comments,
            action = "getting comments",
            description = "List comments on a task or a project. Provide task_id or project_id.",
        ),
        tool!(
            "get_comment",
            CommentIdParams,
            get_comment,
            action = "getting comment",
            description = "Get a single comment by ID.",
        ),
        tool!(
            "create_comment",
            CreateCommentParams,
            create_comment,
            action = "creating comment",
            description = "Add a comment to a task or a project. Provide task_id or project_id.",
        ),
        tool!(
            "update_comment",
            UpdateCommentParams,
            update_comment,
            action = "updating comment",
            description = "Replace the text of a comment.",
        ),
        tool!(
            "delete_comment",
            CommentIdParams,
            delete_comment,
            action = "deleting comment",
            description = "Delete a comment permanently.",
        ),
    ]
}
