//! Label tool implementations
//!
//! Personal labels are addressed by ID. Shared labels only exist as names on
//! tasks in shared projects, so they are addressed by name.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

use crate::mcp::registry::{ToolContext, ToolDescriptor, ToolOutput, ToolResult};
use crate::mcp::tools::{Color, id_path};
use crate::todoist::Fields;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetLabelsParams {
    #[schemars(description = "Pagination cursor returned by a previous call (optional)")]
    pub cursor: Option<String>,
    #[schemars(
        description = "Maximum number of labels to return (default: 50, max: 200)",
        range(min = 1, max = 200)
    )]
    #[serde(default, deserialize_with = "crate::serde_utils::limit")]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LabelIdParams {
    #[schemars(description = "Label ID")]
    pub label_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateLabelParams {
    #[schemars(description = "Label name")]
    pub name: String,
    #[schemars(description = "Position in the label list (optional)")]
    pub order: Option<i64>,
    #[schemars(description = "Label color (optional)")]
    pub color: Option<Color>,
    #[schemars(description = "Mark the label as a favorite (optional)")]
    pub is_favorite: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateLabelParams {
    #[schemars(description = "Label ID to update")]
    pub label_id: String,
    #[schemars(description = "New name (optional)")]
    pub name: Option<String>,
    #[schemars(description = "New position (optional)")]
    pub order: Option<i64>,
    #[schemars(description = "New color (optional)")]
    pub color: Option<Color>,
    #[schemars(description = "Favorite flag (optional)")]
    pub is_favorite: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetSharedLabelsParams {
    #[schemars(description = "Leave out names that are also personal labels (optional)")]
    pub omit_personal: Option<bool>,
    #[schemars(description = "Pagination cursor returned by a previous call (optional)")]
    pub cursor: Option<String>,
    #[schemars(
        description = "Maximum number of labels to return (default: 50, max: 200)",
        range(min = 1, max = 200)
    )]
    #[serde(default, deserialize_with = "crate::serde_utils::limit")]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RenameSharedLabelParams {
    #[schemars(description = "Current shared label name")]
    pub name: String,
    #[schemars(description = "New shared label name")]
    pub new_name: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RemoveSharedLabelParams {
    #[schemars(description = "Shared label name to remove from all active tasks")]
    pub name: String,
}

pub async fn get_labels(ctx: ToolContext, params: GetLabelsParams) -> ToolResult<ToolOutput> {
    let query = Fields::new()
        .with_opt("cursor", params.cursor)
        .with_opt("limit", params.limit)
        .into_query();
    let labels = ctx.api.get("/labels", query).await?;
    Ok(ToolOutput::Json(labels))
}

pub async fn get_label(ctx: ToolContext, params: LabelIdParams) -> ToolResult<ToolOutput> {
    let path = id_path("labels", &params.label_id)?;
    let label = ctx.api.get(&path, Default::default()).await?;
    Ok(ToolOutput::Json(label))
}

pub async fn create_label(ctx: ToolContext, params: CreateLabelParams) -> ToolResult<ToolOutput> {
    let body = Fields::new()
        .with("name", params.name)
        .with_opt("order", params.order)
        .with_opt("color", params.color)
        .with_opt("is_favorite", params.is_favorite)
        .into_body();
    let label = ctx.api.post("/labels", body).await?;
    Ok(ToolOutput::Json(label))
}

pub async fn update_label(ctx: ToolContext, params: UpdateLabelParams) -> ToolResult<ToolOutput> {
    let body = Fields::new()
        .with_opt("name", params.name)
        .with_opt("order", params.order)
        .with_opt("color", params.color)
        .with_opt("is_favorite", params.is_favorite)
        .into_body();
    let path = id_path("labels", &params.label_id)?;
    let label = ctx.api.post(&path, body).await?;
    Ok(ToolOutput::Json(label))
}

pub async fn delete_label(ctx: ToolContext, params: LabelIdParams) -> ToolResult<ToolOutput> {
    let path = id_path("labels", &params.label_id)?;
    let result = ctx.api.delete(&path).await?;
    Ok(ToolOutput::or_message(
        result,
        format!("Label {} deleted successfully", params.label_id),
    ))
}

pub async fn get_shared_labels(
    ctx: ToolContext,
    params: GetSharedLabelsParams,
) -> ToolResult<ToolOutput> {
    let query = Fields::new()
        .with_opt("omit_personal", params.omit_personal)
        .with_opt("cursor", params.cursor)
        .with_opt("limit", params.limit)
        .into_query();
    let labels = ctx.api.get("/labels/shared", query).await?;
    Ok(ToolOutput::Json(labels))
}

pub async fn rename_shared_label(
    ctx: ToolContext,
    params: RenameSharedLabelParams,
) -> ToolResult<ToolOutput> {
    let message = format!(
        "Shared label '{}' renamed to '{}'",
        params.name, params.new_name
    );
    let body = Fields::new()
        .with("name", params.name)
        .with("new_name", params.new_name)
        .into_body();
    let result = ctx.api.post("/labels/shared/rename", body).await?;
    Ok(ToolOutput::or_message(result, message))
}

pub async fn remove_shared_label(
    ctx: ToolContext,
    params: RemoveSharedLabelParams,
) -> ToolResult<ToolOutput> {
    let message = format!("Shared label '{}' removed", params.name);
    let body = Fields::new().with("name", params.name).into_body();
    let result = ctx.api.post("/labels/shared/remove", body).await?;
    Ok(ToolOutput::or_message(result, message))
}

pub fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        tool!(
            "get_labels",
            GetLabelsParams,
            get_labels,
            action = "getting labels",
            description = "List the user's personal labels.",
        ),
        tool!(
            "get_label",
            LabelIdParams,
            get_label,
            action = "getting label",
            description = "Get a personal label by ID.",
        ),
        tool!(
            "create_label",
            CreateLabelParams,
            create_label,
            action = "creating label",
            description = "Create a personal label.",
        ),
        tool!(
            "update_label",
            UpdateLabelParams,
            update_label,
            action = "updating label",
            description = "Update a personal label. Only supplied fields change.",
        ),
        tool!(
            "delete_label",
            LabelIdParams,
            delete_label,
            action = "deleting label",
            description = "Delete a personal label. The name is removed from every task carrying it.",
        ),
        tool!(
            "get_shared_labels",
            GetSharedLabelsParams,
            get_shared_labels,
            action = "getting shared labels",
            description = "List label names used on tasks in shared projects.",
        ),
        tool!(
            "rename_shared_label",
            RenameSharedLabelParams,
            rename_shared_label,
            action = "renaming shared label",
            description = "Rename a shared label on every active task that carries it.",
        ),
        tool!(
            "remove_shared_label",
            RemoveSharedLabelParams,
            remove_shared_label,
            action = "removing shared label",
            description = "Remove a shared label from every active task that carries it.",
        ),
    ]
}
