//! Section tool implementations

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

use crate::mcp::registry::{ToolContext, ToolDescriptor, ToolOutput, ToolResult};
use crate::mcp::tools::id_path;
use crate::todoist::Fields;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetSectionsParams {
    #[schemars(description = "Only return sections of this project (optional)")]
    pub project_id: Option<String>,
    #[schemars(description = "Pagination cursor returned by a previous call (optional)")]
    pub cursor: Option<String>,
    #[schemars(
        description = "Maximum number of sections to return (default: 50, max: 200)",
        range(min = 1, max = 200)
    )]
    #[serde(default, deserialize_with = "crate::serde_utils::limit")]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SectionIdParams {
    #[schemars(description = "Section ID")]
    pub section_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateSectionParams {
    #[schemars(description = "Section name")]
    pub name: String,
    #[schemars(description = "Project the section belongs to")]
    pub project_id: String,
    #[schemars(description = "Position among the project's sections (optional)")]
    pub order: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateSectionParams {
    #[schemars(description = "Section ID to rename")]
    pub section_id: String,
    #[schemars(description = "New section name")]
    pub name: String,
}

pub async fn get_sections(ctx: ToolContext, params: GetSectionsParams) -> ToolResult<ToolOutput> {
    let query = Fields::new()
        .with_opt("project_id", params.project_id)
        .with_opt("cursor", params.cursor)
        .with_opt("limit", params.limit)
        .into_query();
    let sections = ctx.api.get("/sections", query).await?;
    Ok(ToolOutput::Json(sections))
}

pub async fn get_section(ctx: ToolContext, params: SectionIdParams) -> ToolResult<ToolOutput> {
    let path = id_path("sections", &params.section_id)?;
    let section = ctx.api.get(&path, Default::default()).await?;
    Ok(ToolOutput::Json(section))
}

pub async fn create_section(
    ctx: ToolContext,
    params: CreateSectionParams,
) -> ToolResult<ToolOutput> {
    let body = Fields::new()
        .with("name", params.name)
        .with("project_id", params.project_id)
        .with_opt("order", params.order)
        .into_body();
    let section = ctx.api.post("/sections", body).await?;
    Ok(ToolOutput::Json(section))
}

pub async fn update_section(
    ctx: ToolContext,
    params: UpdateSectionParams,
) -> ToolResult<ToolOutput> {
    let body = Fields::new().with("name", params.name).into_body();
    let path = id_path("sections", &params.section_id)?;
    let section = ctx.api.post(&path, body).await?;
    Ok(ToolOutput::Json(section))
}

pub async fn delete_section(ctx: ToolContext, params: SectionIdParams) -> ToolResult<ToolOutput> {
    let path = id_path("sections", &params.section_id)?;
    let result = ctx.api.delete(&path).await?;
    Ok(ToolOutput::or_message(
        result,
        format!("Section {} deleted successfully", params.section_id),
    ))
}

pub fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        tool!(
            "get_sections",
            GetSectionsParams,
            get_sections,
            action = "getting sections",
            description = "List sections, optionally limited to one project.",
        ),
        tool!(
            "get_section",
            SectionIdParams,
            get_section,
            action = "getting section",
            description = "Get a single section by ID.",
        ),
        tool!(
            "create_section",
            CreateSectionParams,
            create_section,
            action = "creating section",
            description = "Create a section inside a project.",
        ),
        tool!(
            "update_section",
            UpdateSectionParams,
            update_section,
            action = "updating section",
            description = "Rename a section.",
        ),
        tool!(
            "delete_section",
            SectionIdParams,
            delete_section,
            action = "deleting section",
            description = "Delete a section and every task in it.",
        ),
    ]
}
