//! Project tool implementations
//!
//! Handles all MCP tools for project management operations.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

use crate::mcp::registry::{ToolContext, ToolDescriptor, ToolOutput, ToolResult};
use crate::mcp::tools::{Color, ViewStyle, id_path};
use crate::todoist::Fields;

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetProjectsParams {
    #[schemars(description = "Pagination cursor returned by a previous call (optional)")]
    pub cursor: Option<String>,
    #[schemars(
        description = "Maximum number of projects to return (default: 50, max: 200)",
        range(min = 1, max = 200)
    )]
    #[serde(default, deserialize_with = "crate::serde_utils::limit")]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ProjectIdParams {
    #[schemars(description = "Project ID")]
    pub project_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateProjectParams {
    #[schemars(description = "Name of the project")]
    pub name: String,
    #[schemars(description = "Project description (optional, markdown supported)")]
    pub description: Option<String>,
    #[schemars(description = "Parent project ID to nest this project under (optional)")]
    pub parent_id: Option<String>,
    #[schemars(description = "Project color (optional)")]
    pub color: Option<Color>,
    #[schemars(description = "Mark the project as a favorite (optional)")]
    pub is_favorite: Option<bool>,
    #[schemars(description = "Layout: 'list', 'board' or 'calendar' (optional)")]
    pub view_style: Option<ViewStyle>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateProjectParams {
    #[schemars(description = "Project ID to update")]
    pub project_id: String,
    #[schemars(description = "New name (optional)")]
    pub name: Option<String>,
    #[schemars(description = "New description (optional)")]
    pub description: Option<String>,
    #[schemars(description = "New color (optional)")]
    pub color: Option<Color>,
    #[schemars(description = "Favorite flag (optional)")]
    pub is_favorite: Option<bool>,
    #[schemars(description = "Layout: 'list', 'board' or 'calendar' (optional)")]
    pub view_style: Option<ViewStyle>,
}

// =============================================================================
// Handlers
// =============================================================================

pub async fn get_projects(ctx: ToolContext, params: GetProjectsParams) -> ToolResult<ToolOutput> {
    let query = Fields::new()
        .with_opt("cursor", params.cursor)
        .with_opt("limit", params.limit)
        .into_query();
    let projects = ctx.api.get("/projects", query).await?;
    Ok(ToolOutput::Json(projects))
}

pub async fn get_project(ctx: ToolContext, params: ProjectIdParams) -> ToolResult<ToolOutput> {
    let path = id_path("projects", &params.project_id)?;
    let project = ctx.api.get(&path, Default::default()).await?;
    Ok(ToolOutput::Json(project))
}

pub async fn create_project(
    ctx: ToolContext,
    params: CreateProjectParams,
) -> ToolResult<ToolOutput> {
    let body = Fields::new()
        .with("name", params.name)
        .with_opt("description", params.description)
        .with_opt("parent_id", params.parent_id)
        .with_opt("color", params.color)
        .with_opt("is_favorite", params.is_favorite)
        .with_opt("view_style", params.view_style)
        .into_body();
    let project = ctx.api.post("/projects", body).await?;
    Ok(ToolOutput::Json(project))
}

pub async fn update_project(
    ctx: ToolContext,
    params: UpdateProjectParams,
) -> ToolResult<ToolOutput> {
    let body = Fields::new()
        .with_opt("name", params.name)
        .with_opt("description", params.description)
        .with_opt("color", params.color)
        .with_opt("is_favorite", params.is_favorite)
        .with_opt("view_style", params.view_style)
        .into_body();
    let path = id_path("projects", &params.project_id)?;
    let project = ctx.api.post(&path, body).await?;
    Ok(ToolOutput::Json(project))
}

pub async fn delete_project(ctx: ToolContext, params: ProjectIdParams) -> ToolResult<ToolOutput> {
    let path = id_path("projects", &params.project_id)?;
    let result = ctx.api.delete(&path).await?;
    Ok(ToolOutput::or_message(
        result,
        format!("Project {} deleted successfully", params.project_id),
    ))
}

pub async fn archive_project(ctx: ToolContext, params: ProjectIdParams) -> ToolResult<ToolOutput> {
    let path = format!("{}/archive", id_path("projects", &params.project_id)?);
    let result = ctx.api.post(&path, Fields::new().into_body()).await?;
    Ok(ToolOutput::or_message(
        result,
        format!("Project {} archived", params.project_id),
    ))
}

pub async fn unarchive_project(
    ctx: ToolContext,
    params: ProjectIdParams,
) -> ToolResult<ToolOutput> {
    let path = format!("{}/unarchive", id_path("projects", &params.project_id)?);
    let result = ctx.api.post(&path, Fields::new().into_body()).await?;
    Ok(ToolOutput::or_message(
        result,
        format!("Project {} unarchived", params.project_id),
    ))
}

pub async fn get_archived_projects(
    ctx: ToolContext,
    params: GetProjectsParams,
) -> ToolResult<ToolOutput> {
    let query = Fields::new()
        .with_opt("cursor", params.cursor)
        .with_opt("limit", params.limit)
        .into_query();
    let projects = ctx.api.get("/projects/archived", query).await?;
    Ok(ToolOutput::Json(projects))
}

pub async fn get_project_collaborators(
    ctx: ToolContext,
    params: ProjectIdParams,
) -> ToolResult<ToolOutput> {
    let path = format!("{}/collaborators", id_path("projects", &params.project_id)?);
    let collaborators = ctx.api.get(&path, Default::default()).await?;
    Ok(ToolOutput::Json(collaborators))
}

pub fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        tool!(
            "get_projects",
            GetProjectsParams,
            get_projects,
            action = "getting projects",
            description = "List all active projects. Returns a page of projects and a next_cursor for pagination.",
        ),
        tool!(
            "get_project",
            ProjectIdParams,
            get_project,
            action = "getting project",
            description = "Get a single project by ID.",
        ),
        tool!(
            "create_project",
            CreateProjectParams,
            create_project,
            action = "creating project",
            description = "Create a new project. Provide parent_id to create a sub-project.",
        ),
        tool!(
            "update_project",
            UpdateProjectParams,
            update_project,
            action = "updating project",
            description = "Update a project's name, description, color, favorite flag or view style. Only supplied fields change.",
        ),
        tool!(
            "delete_project",
            ProjectIdParams,
            delete_project,
            action = "deleting project",
            description = "Delete a project and all of its sections and tasks permanently.",
        ),
        tool!(
            "archive_project",
            ProjectIdParams,
            archive_project,
            action = "archiving project",
            description = "Archive a project. Archived projects are hidden but can be restored with unarchive_project.",
        ),
        tool!(
            "unarchive_project",
            ProjectIdParams,
            unarchive_project,
            action = "unarchiving project",
            description = "Restore an archived project.",
        ),
        tool!(
            "get_archived_projects",
            GetProjectsParams,
            get_archived_projects,
            action = "getting archived projects",
            description = "List archived projects with cursor pagination.",
        ),
        tool!(
            "get_project_collaborators",
            ProjectIdParams,
            get_project_collaborators,
            action = "getting project collaborators",
            description = "List the people a shared project is shared with.",
        ),
    ]
}
