//! MCP tools for Task management.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::mcp::registry::{ToolContext, ToolDescriptor, ToolError, ToolOutput, ToolResult};
use crate::mcp::tools::{DurationUnit, id_path};
use crate::todoist::{Destination, Fields};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetTasksParams {
    #[schemars(description = "Only tasks in this project (optional)")]
    pub project_id: Option<String>,
    #[schemars(description = "Only tasks in this section (optional)")]
    pub section_id: Option<String>,
    #[schemars(description = "Only subtasks of this task (optional)")]
    pub parent_id: Option<String>,
    #[schemars(description = "Only tasks carrying this label name (optional)")]
    pub label: Option<String>,
    #[schemars(description = "Only tasks with these IDs (optional)")]
    pub ids: Option<Vec<String>>,
    #[schemars(description = "Pagination cursor returned by a previous call (optional)")]
    pub cursor: Option<String>,
    #[schemars(
        description = "Maximum number of tasks to return (default: 50, max: 200)",
        range(min = 1, max = 200)
    )]
    #[serde(default, deserialize_with = "crate::serde_utils::limit")]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TaskIdParams {
    #[schemars(description = "Task ID")]
    pub task_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateTaskParams {
    #[schemars(description = "Task content (the title, markdown supported)")]
    pub content: String,
    #[schemars(description = "Longer task description (optional)")]
    pub description: Option<String>,
    #[schemars(description = "Project ID; defaults to the Inbox (optional)")]
    pub project_id: Option<String>,
    #[schemars(description = "Section ID (optional)")]
    pub section_id: Option<String>,
    #[schemars(description = "Parent task ID, making this a subtask (optional)")]
    pub parent_id: Option<String>,
    #[schemars(description = "Position among sibling tasks (optional)")]
    pub order: Option<i64>,
    #[schemars(description = "Label names to attach (optional)")]
    pub labels: Option<Vec<String>>,
    #[schemars(
        description = "Priority from 1 (normal) to 4 (urgent) (optional)",
        range(min = 1, max = 4)
    )]
    #[serde(default, deserialize_with = "crate::serde_utils::priority")]
    pub priority: Option<u8>,
    #[schemars(
        description = "Natural language due date such as 'tomorrow at 5pm' or 'every monday' (optional)"
    )]
    pub due_string: Option<String>,
    #[schemars(description = "Due date as YYYY-MM-DD (optional)")]
    pub due_date: Option<String>,
    #[schemars(description = "Due date and time in RFC 3339 (optional)")]
    pub due_datetime: Option<String>,
    #[schemars(description = "Two-letter language code used to parse due_string (optional)")]
    pub due_lang: Option<String>,
    #[schemars(description = "User ID of the assignee in a shared project (optional)")]
    pub assignee_id: Option<String>,
    #[schemars(
        description = "Duration amount, requires duration_unit (optional)",
        range(min = 1)
    )]
    #[serde(default, deserialize_with = "crate::serde_utils::positive")]
    pub duration: Option<u32>,
    #[schemars(description = "Duration unit: 'minute' or 'day' (optional)")]
    pub duration_unit: Option<DurationUnit>,
    #[schemars(description = "Deadline as YYYY-MM-DD (optional)")]
    pub deadline_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTaskParams {
    #[schemars(description = "Task ID to update")]
    pub task_id: String,
    #[schemars(description = "New content (optional)")]
    pub content: Option<String>,
    #[schemars(description = "New description (optional)")]
    pub description: Option<String>,
    #[schemars(description = "Label names; replaces all existing labels when provided (optional)")]
    pub labels: Option<Vec<String>>,
    #[schemars(
        description = "Priority from 1 (normal) to 4 (urgent) (optional)",
        range(min = 1, max = 4)
    )]
    #[serde(default, deserialize_with = "crate::serde_utils::priority")]
    pub priority: Option<u8>,
    #[schemars(description = "Natural language due date; 'no date' clears it (optional)")]
    pub due_string: Option<String>,
    #[schemars(description = "Due date as YYYY-MM-DD (optional)")]
    pub due_date: Option<String>,
    #[schemars(description = "Due date and time in RFC 3339 (optional)")]
    pub due_datetime: Option<String>,
    #[schemars(description = "Two-letter language code used to parse due_string (optional)")]
    pub due_lang: Option<String>,
    #[schemars(description = "User ID of the assignee (optional)")]
    pub assignee_id: Option<String>,
    #[schemars(
        description = "Duration amount, requires duration_unit (optional)",
        range(min = 1)
    )]
    #[serde(default, deserialize_with = "crate::serde_utils::positive")]
    pub duration: Option<u32>,
    #[schemars(description = "Duration unit: 'minute' or 'day' (optional)")]
    pub duration_unit: Option<DurationUnit>,
    #[schemars(description = "Deadline as YYYY-MM-DD (optional)")]
    pub deadline_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MoveTaskParams {
    #[schemars(description = "Task ID to move")]
    pub task_id: String,
    #[schemars(description = "Destination project ID")]
    pub project_id: Option<String>,
    #[schemars(description = "Destination section ID")]
    pub section_id: Option<String>,
    #[schemars(description = "Destination parent task ID")]
    pub parent_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FilterTasksParams {
    #[schemars(description = "Todoist filter query, e.g. 'today | overdue' or '#Work & p1'")]
    pub query: String,
    #[schemars(description = "Language of the filter query (optional)")]
    pub lang: Option<String>,
    #[schemars(description = "Pagination cursor returned by a previous call (optional)")]
    pub cursor: Option<String>,
    #[schemars(
        description = "Maximum number of tasks to return (default: 50, max: 200)",
        range(min = 1, max = 200)
    )]
    #[serde(default, deserialize_with = "crate::serde_utils::limit")]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct QuickAddTaskParams {
    #[schemars(
        description = "Task text in quick-add syntax, e.g. 'Call mom tomorrow 5pm #Personal @phone p2'"
    )]
    pub text: String,
    #[schemars(description = "Comment to attach to the new task (optional)")]
    pub note: Option<String>,
    #[schemars(description = "Reminder in natural language (optional)")]
    pub reminder: Option<String>,
    #[schemars(description = "Add the default reminder when a due time is set (optional)")]
    pub auto_reminder: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetCompletedTasksParams {
    #[schemars(description = "Start of the completion window (RFC 3339)")]
    pub since: String,
    #[schemars(description = "End of the completion window (RFC 3339)")]
    pub until: String,
    #[schemars(description = "Only tasks from this project (optional)")]
    pub project_id: Option<String>,
    #[schemars(description = "Only tasks from this section (optional)")]
    pub section_id: Option<String>,
    #[schemars(description = "Additional filter query (optional)")]
    pub filter_query: Option<String>,
    #[schemars(description = "Pagination cursor returned by a previous call (optional)")]
    pub cursor: Option<String>,
    #[schemars(
        description = "Maximum number of tasks to return (default: 50, max: 200)",
        range(min = 1, max = 200)
    )]
    #[serde(default, deserialize_with = "crate::serde_utils::limit")]
    pub limit: Option<u32>,
}

// =============================================================================
// Handlers
// =============================================================================

pub async fn get_tasks(ctx: ToolContext, params: GetTasksParams) -> ToolResult<ToolOutput> {
    let query = Fields::new()
        .with_opt("project_id", params.project_id)
        .with_opt("section_id", params.section_id)
        .with_opt("parent_id", params.parent_id)
        .with_opt("label", params.label)
        .with_opt("ids", params.ids)
        .with_opt("cursor", params.cursor)
        .with_opt("limit", params.limit)
        .into_query();
    let tasks = ctx.api.get("/tasks", query).await?;
    Ok(ToolOutput::Json(tasks))
}

pub async fn get_task(ctx: ToolContext, params: TaskIdParams) -> ToolResult<ToolOutput> {
    let path = id_path("tasks", &params.task_id)?;
    let task = ctx.api.get(&path, Default::default()).await?;
    Ok(ToolOutput::Json(task))
}

pub async fn create_task(ctx: ToolContext, params: CreateTaskParams) -> ToolResult<ToolOutput> {
    let body = Fields::new()
        .with("content", params.content)
        .with_opt("description", params.description)
        .with_opt("project_id", params.project_id)
        .with_opt("section_id", params.section_id)
        .with_opt("parent_id", params.parent_id)
        .with_opt("order", params.order)
        .with_opt("labels", params.labels)
        .with_opt("priority", params.priority)
        .with_opt("due_string", params.due_string)
        .with_opt("due_date", params.due_date)
        .with_opt("due_datetime", params.due_datetime)
        .with_opt("due_lang", params.due_lang)
        .with_opt("assignee_id", params.assignee_id)
        .with_opt("duration", params.duration)
        .with_opt("duration_unit", params.duration_unit)
        .with_opt("deadline_date", params.deadline_date)
        .into_body();
    let task = ctx.api.post("/tasks", body).await?;
    Ok(ToolOutput::Json(task))
}

pub async fn update_task(ctx: ToolContext, params: UpdateTaskParams) -> ToolResult<ToolOutput> {
    let body = Fields::new()
        .with_opt("content", params.content)
        .with_opt("description", params.description)
        .with_opt("labels", params.labels)
        .with_opt("priority", params.priority)
        .with_opt("due_string", params.due_string)
        .with_opt("due_date", params.due_date)
        .with_opt("due_datetime", params.due_datetime)
        .with_opt("due_lang", params.due_lang)
        .with_opt("assignee_id", params.assignee_id)
        .with_opt("duration", params.duration)
        .with_opt("duration_unit", params.duration_unit)
        .with_opt("deadline_date", params.deadline_date)
        .into_body();
    let path = id_path("tasks", &params.task_id)?;
    let task = ctx.api.post(&path, body).await?;
    Ok(ToolOutput::Json(task))
}

pub async fn delete_task(ctx: ToolContext, params: TaskIdParams) -> ToolResult<ToolOutput> {
    let path = id_path("tasks", &params.task_id)?;
    let result = ctx.api.delete(&path).await?;
    Ok(ToolOutput::or_message(
        result,
        format!("Task {} deleted successfully", params.task_id),
    ))
}

pub async fn close_task(ctx: ToolContext, params: TaskIdParams) -> ToolResult<ToolOutput> {
    let path = format!("{}/close", id_path("tasks", &params.task_id)?);
    let result = ctx.api.post(&path, Fields::new().into_body()).await?;
    Ok(ToolOutput::or_message(
        result,
        format!("Task {} completed", params.task_id),
    ))
}

pub async fn reopen_task(ctx: ToolContext, params: TaskIdParams) -> ToolResult<ToolOutput> {
    let path = format!("{}/reopen", id_path("tasks", &params.task_id)?);
    let result = ctx.api.post(&path, Fields::new().into_body()).await?;
    Ok(ToolOutput::or_message(
        result,
        format!("Task {} reopened", params.task_id),
    ))
}

/// Moves go through the sync endpoint; the REST update cannot change a
/// task's project, section or parent.
pub async fn move_task(ctx: ToolContext, params: MoveTaskParams) -> ToolResult<ToolOutput> {
    let Some(destination) =
        Destination::from_parts(params.project_id, params.section_id, params.parent_id)
    else {
        return Err(ToolError::Precondition(
            "at least one of project_id, section_id or parent_id is required".to_string(),
        ));
    };

    ctx.api.move_task(&params.task_id, &destination).await?;

    let target = match (&destination.section_id, &destination.parent_id) {
        (_, Some(parent)) => format!("under task {}", parent),
        (Some(section), None) => format!("to section {}", section),
        (None, None) => format!(
            "to project {}",
            destination.project_id.as_deref().unwrap_or_default()
        ),
    };
    Ok(ToolOutput::Message(format!(
        "Task {} moved {}",
        params.task_id, target
    )))
}

/// Reduce a task to the fields an agent needs when scanning filter results.
fn summarize_task(task: &Value) -> Value {
    json!({
        "content": task.get("content").cloned().unwrap_or(Value::Null),
        "description": task.get("description").cloned().unwrap_or(Value::Null),
        "due_date": task
            .get("due")
            .and_then(|due| due.get("date"))
            .cloned()
            .unwrap_or(Value::Null),
    })
}

fn summarize_tasks(response: Value) -> Value {
    match response {
        Value::Array(tasks) => Value::Array(tasks.iter().map(summarize_task).collect()),
        Value::Object(mut page) => {
            let results = page
                .remove("results")
                .and_then(|r| r.as_array().map(|tasks| tasks.iter().map(summarize_task).collect()))
                .unwrap_or_default();
            json!({
                "results": Value::Array(results),
                "next_cursor": page.remove("next_cursor").unwrap_or(Value::Null),
            })
        }
        other => other,
    }
}

pub async fn get_tasks_by_filter(
    ctx: ToolContext,
    params: FilterTasksParams,
) -> ToolResult<ToolOutput> {
    let query = Fields::new()
        .with("query", params.query)
        .with_opt("lang", params.lang)
        .with_opt("cursor", params.cursor)
        .with_opt("limit", params.limit)
        .into_query();
    let tasks = ctx.api.get("/tasks/filter", query).await?;
    Ok(ToolOutput::Json(summarize_tasks(tasks)))
}

pub async fn quick_add_task(
    ctx: ToolContext,
    params: QuickAddTaskParams,
) -> ToolResult<ToolOutput> {
    let body = Fields::new()
        .with("text", params.text)
        .with_opt("note", params.note)
        .with_opt("reminder", params.reminder)
        .with_opt("auto_reminder", params.auto_reminder)
        .into_body();
    let task = ctx.api.post("/tasks/quick", body).await?;
    Ok(ToolOutput::Json(task))
}

pub async fn get_completed_tasks(
    ctx: ToolContext,
    params: GetCompletedTasksParams,
) -> ToolResult<ToolOutput> {
    let query = Fields::new()
        .with("since", params.since)
        .with("until", params.until)
        .with_opt("project_id", params.project_id)
        .with_opt("section_id", params.section_id)
        .with_opt("filter_query", params.filter_query)
        .with_opt("cursor", params.cursor)
        .with_opt("limit", params.limit)
        .into_query();
    let tasks = ctx
        .api
        .get("/tasks/completed/by_completion_date", query)
        .await?;
    Ok(ToolOutput::Json(tasks))
}

pub fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        tool!(
            "get_tasks",
            GetTasksParams,
            get_tasks,
            action = "getting tasks",
            description = "List active tasks. Filter by project, section, parent task, label or IDs. Paginate with cursor and limit.",
        ),
        tool!(
            "get_task",
            TaskIdParams,
            get_task,
            action = "getting task",
            description = "Get a single active task by ID.",
        ),
        tool!(
            "create_task",
            CreateTaskParams,
            create_task,
            action = "creating task",
            description = "Create a task. Without project_id the task goes to the Inbox. Use due_string for natural language dates.",
        ),
        tool!(
            "update_task",
            UpdateTaskParams,
            update_task,
            action = "updating task",
            description = "Update a task's content, description, labels, priority, due date, duration or deadline. Only supplied fields change. Use move_task to change project, section or parent.",
        ),
        tool!(
            "delete_task",
            TaskIdParams,
            delete_task,
            action = "deleting task",
            description = "Delete a task and its subtasks permanently. Prefer close_task to keep history.",
        ),
        tool!(
            "close_task",
            TaskIdParams,
            close_task,
            action = "closing task",
            description = "Complete a task. Recurring tasks move to their next occurrence.",
        ),
        tool!(
            "reopen_task",
            TaskIdParams,
            reopen_task,
            action = "reopening task",
            description = "Reopen a completed task.",
        ),
        tool!(
            "move_task",
            MoveTaskParams,
            move_task,
            action = "moving task",
            description = "Move a task to another project, section or parent task. Provide at least one of project_id, section_id or parent_id.",
        ),
        tool!(
            "get_tasks_by_filter",
            FilterTasksParams,
            get_tasks_by_filter,
            action = "getting tasks by filter",
            description = "Find tasks with a Todoist filter query such as 'today', 'overdue' or '#Work & p1'. Returns content, description and due_date of each task.",
        ),
        tool!(
            "quick_add_task",
            QuickAddTaskParams,
            quick_add_task,
            action = "quick adding task",
            description = "Create a task from quick-add text, parsing dates, #projects, @labels and priorities the way the Todoist apps do.",
        ),
        tool!(
            "get_completed_tasks",
            GetCompletedTasksParams,
            get_completed_tasks,
            action = "getting completed tasks",
            description = "List tasks completed between since and until.",
        ),
    ]
}
