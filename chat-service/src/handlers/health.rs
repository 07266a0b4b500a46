use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness: the process is serving HTTP.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "chat-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness: an API key is configured, so `/chat` can reach Gemini.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.chat.is_configured() {
        (StatusCode::OK, Json(json!({ "status": "ready", "model": state.chat.model() })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable", "error": "GEMINI_API_KEY not configured" })),
        )
    }
}
