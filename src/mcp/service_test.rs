//! Tests for MCP Streamable HTTP service integration

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use crate::mcp::config::ToolSetConfig;
use crate::mcp::tools::test_support;
use crate::todoist::MockTodoistApi;

fn app() -> Router {
    let service = super::create_mcp_service(
        Arc::new(MockTodoistApi::new()),
        test_support::auth(),
        ToolSetConfig::minimal(),
        CancellationToken::new(),
    );
    Router::new().nest_service("/mcp", service)
}

#[tokio::test]
async fn test_create_mcp_service() {
    let ct = CancellationToken::new();

    let service = super::create_mcp_service(
        Arc::new(MockTodoistApi::new()),
        test_support::auth(),
        ToolSetConfig::full(),
        ct,
    );

    drop(service);
}

#[tokio::test]
async fn test_mcp_service_with_router() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    // Only /mcp is mounted
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mcp_service_is_mounted() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/mcp")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // rmcp answers protocol errors itself; anything but 404 means it is mounted
    assert_ne!(
        response.status(),
        StatusCode::NOT_FOUND,
        "Service should be mounted and responding"
    );
}

#[test]
fn test_service_config_keeps_default_keep_alive() {
    let config = super::service::service_config(CancellationToken::new());
    let defaults = rmcp::transport::streamable_http_server::StreamableHttpServerConfig::default();

    assert!(config.stateful_mode);
    assert!(config.sse_keep_alive.is_some());
    assert_eq!(config.sse_keep_alive, defaults.sse_keep_alive);
}
