//! Tests for Task MCP tools

use mockall::predicate::*;
use serde_json::{Value, json};

use crate::mcp::tools::tasks::{CreateTaskParams, create_task};
use crate::mcp::tools::test_support::{call, context, is_error, json, text};
use crate::todoist::{ApiError, Destination, MockTodoistApi};

#[tokio::test]
async fn test_create_task_round_trip() {
    let mut mock = MockTodoistApi::new();
    mock.expect_post()
        .with(eq("/tasks"), always())
        .times(1)
        .returning(|_, body| Ok(body));

    let result = call(mock, "create_task", json!({"content": "Buy milk"})).await;

    assert!(!is_error(&result));
    let task = json(&result);
    assert_eq!(task["content"], "Buy milk");
    assert_eq!(task, json!({"content": "Buy milk"}));
}

#[tokio::test]
async fn test_create_task_handler_directly() {
    let mut mock = MockTodoistApi::new();
    mock.expect_post()
        .withf(|_, body| {
            body == &json!({
                "content": "Write report",
                "priority": 4,
                "labels": ["work"],
                "due_string": "tomorrow"
            })
        })
        .times(1)
        .returning(|_, _| Ok(json!({"id": "123", "content": "Write report"})));

    let params = CreateTaskParams {
        content: "Write report".to_string(),
        description: None,
        project_id: None,
        section_id: None,
        parent_id: None,
        order: None,
        labels: Some(vec!["work".to_string()]),
        priority: Some(4),
        due_string: Some("tomorrow".to_string()),
        due_date: None,
        due_datetime: None,
        due_lang: None,
        assignee_id: None,
        duration: None,
        duration_unit: None,
        deadline_date: None,
    };

    let output = create_task(context(mock), params).await.unwrap();
    match output {
        crate::mcp::registry::ToolOutput::Json(task) => assert_eq!(task["id"], "123"),
        other => panic!("Expected JSON output, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_tasks_pagination_passthrough() {
    let mut mock = MockTodoistApi::new();
    mock.expect_get()
        .withf(|path, query| {
            path == "/tasks"
                && query.len() == 2
                && query.get("cursor") == Some(&json!("abc"))
                && query.get("limit") == Some(&json!(10))
        })
        .times(1)
        .returning(|_, _| Ok(json!({"results": [], "next_cursor": null})));

    let result = call(mock, "get_tasks", json!({"cursor": "abc", "limit": 10})).await;

    assert!(!is_error(&result));
    assert_eq!(json(&result)["results"], json!([]));
}

#[tokio::test]
async fn test_get_tasks_forwards_filters() {
    let mut mock = MockTodoistApi::new();
    mock.expect_get()
        .withf(|_, query| {
            query.get("project_id") == Some(&json!("p1"))
                && query.get("label") == Some(&json!("errand"))
                && query.get("ids") == Some(&json!(["1", "2"]))
                && !query.contains_key("cursor")
        })
        .times(1)
        .returning(|_, _| Ok(json!([])));

    let result = call(
        mock,
        "get_tasks",
        json!({"project_id": "p1", "label": "errand", "ids": ["1", "2"]}),
    )
    .await;

    assert!(!is_error(&result));
}

#[tokio::test]
async fn test_update_task_sends_only_supplied_fields() {
    let mut mock = MockTodoistApi::new();
    mock.expect_post()
        .withf(|path, body| path == "/tasks/42" && body == &json!({"description": ""}))
        .times(1)
        .returning(|_, body| Ok(body));

    let result = call(mock, "update_task", json!({"task_id": "42", "description": ""})).await;

    assert!(!is_error(&result));
}

#[tokio::test]
async fn test_close_task_without_content_confirms() {
    let mut mock = MockTodoistApi::new();
    mock.expect_post()
        .with(eq("/tasks/7/close"), always())
        .times(1)
        .returning(|_, _| Ok(Value::Null));

    let result = call(mock, "close_task", json!({"task_id": "7"})).await;

    assert!(!is_error(&result));
    assert_eq!(text(&result), "Task 7 completed");
}

#[tokio::test]
async fn test_delete_task_confirms() {
    let mut mock = MockTodoistApi::new();
    mock.expect_delete()
        .with(eq("/tasks/7"))
        .times(1)
        .returning(|_| Ok(Value::Null));

    let result = call(mock, "delete_task", json!({"task_id": "7"})).await;

    assert_eq!(text(&result), "Task 7 deleted successfully");
}

#[tokio::test]
async fn test_move_task_without_destination_makes_no_call() {
    let mut mock = MockTodoistApi::new();
    mock.expect_move_task().never();
    mock.expect_get().never();
    mock.expect_post().never();
    mock.expect_delete().never();

    let result = call(mock, "move_task", json!({"task_id": "7"})).await;

    assert!(is_error(&result));
    assert!(text(&result).starts_with("Error moving task: "));
    assert!(text(&result).contains("project_id"));
}

#[tokio::test]
async fn test_move_task_to_section() {
    let mut mock = MockTodoistApi::new();
    mock.expect_move_task()
        .withf(|task_id, destination| {
            task_id == "7"
                && *destination
                    == Destination::from_parts(None, Some("s1".to_string()), None).unwrap()
        })
        .times(1)
        .returning(|_, _| Ok(json!({"sync_status": {}})));

    let result = call(mock, "move_task", json!({"task_id": "7", "section_id": "s1"})).await;

    assert!(!is_error(&result));
    assert_eq!(text(&result), "Task 7 moved to section s1");
}

#[tokio::test]
async fn test_move_task_command_rejected() {
    let mut mock = MockTodoistApi::new();
    mock.expect_move_task().times(1).returning(|_, _| {
        Err(ApiError::Move {
            status: r#"{"error":"Invalid parent"}"#.to_string(),
        })
    });

    let result = call(mock, "move_task", json!({"task_id": "7", "parent_id": "7"})).await;

    assert!(is_error(&result));
    assert!(text(&result).contains("Invalid parent"));
}

#[tokio::test]
async fn test_filter_projects_task_fields() {
    let mut mock = MockTodoistApi::new();
    mock.expect_get()
        .withf(|path, query| {
            path == "/tasks/filter" && query.get("query") == Some(&json!("today | overdue"))
        })
        .times(1)
        .returning(|_, _| {
            Ok(json!({
                "results": [
                    {
                        "id": "1",
                        "content": "Pay rent",
                        "description": "Transfer",
                        "priority": 4,
                        "due": {"date": "2026-10-19", "is_recurring": false}
                    },
                    {"id": "2", "content": "Stretch", "description": ""}
                ],
                "next_cursor": "next"
            }))
        });

    let result = call(mock, "get_tasks_by_filter", json!({"query": "today | overdue"})).await;

    assert_eq!(
        json(&result),
        json!({
            "results": [
                {"content": "Pay rent", "description": "Transfer", "due_date": "2026-10-19"},
                {"content": "Stretch", "description": "", "due_date": null}
            ],
            "next_cursor": "next"
        })
    );
}

#[tokio::test]
async fn test_filter_accepts_plain_array() {
    let mut mock = MockTodoistApi::new();
    mock.expect_get()
        .returning(|_, _| Ok(json!([{"content": "A", "description": "B", "due": null}])));

    let result = call(mock, "get_tasks_by_filter", json!({"query": "p1"})).await;

    assert_eq!(
        json(&result),
        json!([{"content": "A", "description": "B", "due_date": null}])
    );
}

#[tokio::test]
async fn test_quick_add_keeps_false_flag() {
    let mut mock = MockTodoistApi::new();
    mock.expect_post()
        .withf(|path, body| {
            path == "/tasks/quick"
                && body == &json!({"text": "Call mom tomorrow", "auto_reminder": false})
        })
        .times(1)
        .returning(|_, body| Ok(body));

    let result = call(
        mock,
        "quick_add_task",
        json!({"text": "Call mom tomorrow", "auto_reminder": false}),
    )
    .await;

    assert!(!is_error(&result));
}

#[tokio::test]
async fn test_get_completed_tasks_window() {
    let mut mock = MockTodoistApi::new();
    mock.expect_get()
        .withf(|path, query| {
            path == "/tasks/completed/by_completion_date"
                && query.get("since") == Some(&json!("2026-10-01T00:00:00Z"))
                && query.get("until") == Some(&json!("2026-10-19T00:00:00Z"))
        })
        .times(1)
        .returning(|_, _| Ok(json!({"items": []})));

    let result = call(
        mock,
        "get_completed_tasks",
        json!({"since": "2026-10-01T00:00:00Z", "until": "2026-10-19T00:00:00Z"}),
    )
    .await;

    assert!(!is_error(&result));
}

#[tokio::test]
async fn test_invalid_priority_type_is_rejected() {
    let descriptor = crate::mcp::tools::find("create_task").unwrap();
    let arguments = json!({"content": "x", "priority": "high"});

    let result = crate::mcp::registry::invoke(
        descriptor,
        arguments.as_object().cloned(),
        context(MockTodoistApi::new()),
    )
    .await;

    assert!(result.is_err());
}

async fn invoke_raw(
    mock: MockTodoistApi,
    name: &str,
    arguments: Value,
) -> Result<rmcp::model::CallToolResult, rmcp::ErrorData> {
    let descriptor = crate::mcp::tools::find(name).unwrap();
    crate::mcp::registry::invoke(descriptor, arguments.as_object().cloned(), context(mock)).await
}

#[tokio::test]
async fn test_get_tasks_limit_above_maximum_is_rejected() {
    let mut mock = MockTodoistApi::new();
    mock.expect_get().never();

    let err = invoke_raw(mock, "get_tasks", json!({"limit": 500}))
        .await
        .unwrap_err();

    assert!(err.message.contains("between 1 and 200"), "{}", err.message);
}

#[tokio::test]
async fn test_get_tasks_limit_zero_is_rejected() {
    let mut mock = MockTodoistApi::new();
    mock.expect_get().never();

    let result = invoke_raw(mock, "get_tasks", json!({"limit": 0})).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_create_task_priority_out_of_range_is_rejected() {
    let mut mock = MockTodoistApi::new();
    mock.expect_post().never();

    let err = invoke_raw(mock, "create_task", json!({"content": "x", "priority": 9}))
        .await
        .unwrap_err();

    assert!(err.message.contains("between 1 and 4"), "{}", err.message);
}

#[tokio::test]
async fn test_update_task_zero_duration_is_rejected() {
    let mut mock = MockTodoistApi::new();
    mock.expect_post().never();

    let result = invoke_raw(
        mock,
        "update_task",
        json!({"task_id": "7", "duration": 0, "duration_unit": "minute"}),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_task_id_stays_one_path_segment() {
    let mut mock = MockTodoistApi::new();
    mock.expect_delete()
        .with(eq("/tasks/..%2Fprojects%2F5"))
        .times(1)
        .returning(|_| Ok(Value::Null));

    let result = call(mock, "delete_task", json!({"task_id": "../projects/5"})).await;

    assert!(!is_error(&result));
}

#[tokio::test]
async fn test_close_task_encodes_id_before_action() {
    let mut mock = MockTodoistApi::new();
    mock.expect_post()
        .with(eq("/tasks/a%2Fb/close"), always())
        .times(1)
        .returning(|_, _| Ok(Value::Null));

    let result = call(mock, "close_task", json!({"task_id": "a/b"})).await;

    assert_eq!(text(&result), "Task a/b completed");
}

#[tokio::test]
async fn test_dot_segment_task_id_is_rejected() {
    for task_id in ["..", ".", ""] {
        let mut mock = MockTodoistApi::new();
        mock.expect_get().never();
        mock.expect_delete().never();

        let result = invoke_raw(mock, "delete_task", json!({"task_id": task_id})).await;
        assert!(result.is_err(), "task_id {:?} should be rejected", task_id);
    }
}

#[tokio::test]
async fn test_move_task_empty_destination_makes_no_call() {
    let mut mock = MockTodoistApi::new();
    mock.expect_move_task().never();

    let result = call(
        mock,
        "move_task",
        json!({"task_id": "7", "project_id": "", "section_id": ""}),
    )
    .await;

    assert!(is_error(&result));
    assert!(text(&result).starts_with("Error moving task: "));
}

#[tokio::test]
async fn test_move_task_ignores_empty_fields_beside_real_one() {
    let mut mock = MockTodoistApi::new();
    mock.expect_move_task()
        .withf(|_, destination| {
            *destination == Destination::from_parts(Some("p1".to_string()), None, None).unwrap()
        })
        .times(1)
        .returning(|_, _| Ok(json!({"sync_status": {}})));

    let result = call(
        mock,
        "move_task",
        json!({"task_id": "7", "project_id": "p1", "section_id": ""}),
    )
    .await;

    assert_eq!(text(&result), "Task 7 moved to project p1");
}
