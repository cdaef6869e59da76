use serde_json::json;

use crate::mcp::tools::test_support::{call, is_error, json};
use crate::todoist::MockTodoistApi;

#[tokio::test]
async fn test_user_info_comes_from_auth_context() {
    let mut mock = MockTodoistApi::new();
    mock.expect_get().never();
    mock.expect_post().never();

    let result = call(mock, "get_user_info", json!({})).await;

    assert!(!is_error(&result));
    assert_eq!(
        json(&result),
        json!({"email": "ada@example.com", "full_name": "Ada Lovelace"})
    );
}

#[tokio::test]
async fn test_user_info_never_exposes_token() {
    let result = call(MockTodoistApi::new(), "get_user_info", json!({})).await;

    let output = crate::mcp::tools::test_support::text(&result);
    assert!(!output.contains("test-token"));
}
