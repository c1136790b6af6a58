use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value as J;

use crate::api::mcp::McpServer;
use crate::core::Response;

/// `/healthz` plus the dispatcher at `POST /mcp`.
pub fn build_app(server: Arc<McpServer>) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/mcp", post(http))
        .with_state(server)
}

// Dispatch outcomes are always 200; malformed bodies are rejected by `Json` with 400.
async fn http(State(server): State<Arc<McpServer>>, Json(raw): Json<J>) -> Json<Response> {
    tracing::debug!(request = %raw, "HTTP handler invoked");
    let resp = server.handle_value(raw).await;
    tracing::trace!(response = ?resp, "HTTP handler completed");
    Json(resp)
}
