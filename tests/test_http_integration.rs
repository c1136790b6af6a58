use std::sync::Arc;

use axum::body::Body;
use database_mcp_server::infra::http_app::build_app;
use database_mcp_server::tools::database::build_database_server;
use http_body_util::BodyExt; // for .collect
use hyper::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt; // for .oneshot

async fn post(app: &axum::Router, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn initialize_list_call_and_read_over_http() {
    let app = build_app(Arc::new(build_database_server().unwrap()));

    let (status, init) = post(&app, json!({"type": "initialize"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(init["server"], json!({"name": "database-mcp-server", "version": "1.0.0"}));

    let (_, tools) = post(&app, json!({"type": "tools/list"})).await;
    assert_eq!(tools["tools"].as_array().unwrap().len(), 2);

    let (_, call) = post(
        &app,
        json!({
            "type": "tools/call",
            "tool_name": "optimize_query",
            "arguments": {"sql": "SELECT * FROM a LEFT JOIN b LEFT JOIN c LEFT JOIN d"}
        }),
    )
    .await;
    assert_eq!(call["type"], "tool_response");
    assert_eq!(call["content"]["suggestions"].as_array().unwrap().len(), 3);

    let (_, res) = post(&app, json!({"type": "resources/get", "uri": "database://best-practices"})).await;
    assert_eq!(res["uri"], "database://best-practices");
    assert!(res["content"].as_str().unwrap().contains("## Performance Tips"));
}

#[tokio::test]
async fn failures_are_error_bodies_and_server_keeps_serving() {
    let app = build_app(Arc::new(build_database_server().unwrap()));

    let (status, v) = post(&app, json!({"type": "tools/call", "tool_name": "missing", "arguments": {}})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v, json!({"error": "Tool not found: missing"}));

    let (_, v) = post(&app, json!({"type": "resources/get", "uri": "database://nope"})).await;
    assert_eq!(v, json!({"error": "Resource not found: database://nope"}));

    let (_, v) = post(&app, json!({"type": "shutdown"})).await;
    assert_eq!(v, json!({"error": "Unknown message type: shutdown"}));

    let (_, v) = post(&app, json!({"type": 5})).await;
    assert_eq!(v, json!({"error": "Unknown message type: 5"}));

    let (_, v) = post(&app, json!({"type": "tools/call", "tool_name": 7, "arguments": {}})).await;
    assert_eq!(v, json!({"error": "Tool not found: 7"}));

    let (_, v) = post(&app, json!({"type": "tools.list"})).await;
    assert_eq!(v, json!({"error": "Unknown message type: tools.list"}));

    let (_, v) = post(&app, json!({"type": "initialize", "tool_name": 5})).await;
    assert_eq!(v["type"], "initialize_response");
}
