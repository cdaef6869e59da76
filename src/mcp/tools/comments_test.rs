use serde_json::{Value, json};

use crate::mcp::tools::test_support::{call, is_error, json, text};
use crate::todoist::MockTodoistApi;

#[tokio::test]
async fn test_get_comments_for_task() {
    let mut mock = MockTodoistApi::new();
    mock.expect_get()
        .withf(|path, query| {
            path == "/comments"
                && query.get("task_id") == Some(&json!("t1"))
                && !query.contains_key("project_id")
        })
        .times(1)
        .returning(|_, _| Ok(json!({"results": [{"content": "Looks good"}]})));

    let result = call(mock, "get_comments", json!({"task_id": "t1"})).await;

    assert_eq!(json(&result)["results"][0]["content"], "Looks good");
}

#[tokio::test]
async fn test_create_comment_on_project() {
    let mut mock = MockTodoistApi::new();
    mock.expect_post()
        .withf(|path, body| {
            path == "/comments" && body == &json!({"content": "Kickoff notes", "project_id": "p1"})
        })
        .times(1)
        .returning(|_, body| Ok(body));

    let result = call(
        mock,
        "create_comment",
        json!({"content": "Kickoff notes", "project_id": "p1"}),
    )
    .await;

    assert!(!is_error(&result));
    assert_eq!(json(&result)["project_id"], "p1");
}

#[tokio::test]
async fn test_update_comment() {
    let mut mock = MockTodoistApi::new();
    mock.expect_post()
        .withf(|path, body| path == "/comments/c1" && body == &json!({"content": "Edited"}))
        .times(1)
        .returning(|_, body| Ok(body));

    let result = call(mock, "update_comment", json!({"comment_id": "c1", "content": "Edited"})).await;

    assert_eq!(json(&result)["content"], "Edited");
}

#[tokio::test]
async fn test_delete_comment_confirms() {
    let mut mock = MockTodoistApi::new();
    mock.expect_delete().times(1).returning(|_| Ok(Value::Null));

    let result = call(mock, "delete_comment", json!({"comment_id": "c1"})).await;

    assert_eq!(text(&result), "Comment c1 deleted successfully");
}
