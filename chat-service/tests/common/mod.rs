//! Shared helpers for chat-service integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chat_service::config::ChatConfig;
use chat_service::services::metrics::detached_handle;
use chat_service::services::providers::mock::MockTextProvider;
use chat_service::startup::build_router;
use chat_service::AppState;
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusHandle;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::util::ServiceExt;

pub const INAVORA_DOC: &str = r#"{"product":"Inavora","rules":{"max_slides":12,"mandatory":["title","summary"]}}"#;

/// Config listening on a random port with the given instruction document.
pub fn test_config(instructions: &Path) -> ChatConfig {
    let mut config = ChatConfig::default();
    config.common.port = 0;
    config.instructions.path = instructions.to_path_buf();
    config
}

pub fn state_with(provider: Arc<MockTextProvider>, instructions: &Path) -> AppState {
    let metrics = detached_handle().expect("Failed to build metrics handle");
    AppState::new(test_config(instructions), provider, metrics)
}

/// Router whose `/metrics` renders from `metrics`.
pub fn app_with_metrics(
    provider: Arc<MockTextProvider>,
    instructions: &Path,
    metrics: PrometheusHandle,
) -> Router {
    build_router(AppState::new(test_config(instructions), provider, metrics))
}

pub fn app_with(provider: Arc<MockTextProvider>, instructions: &Path) -> Router {
    build_router(state_with(provider, instructions))
}

pub fn instruction_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write instruction document");
    file
}

/// POST `body` to `/chat` and decode the JSON reply.
pub async fn post_chat(app: Router, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
