use crate::error::ChatError;
use crate::models::{ChatRequest, ChatResponse};
use crate::services::metrics;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use validator::Validate;

/// `POST /chat`: relay one user message to Gemini under the Inavora rules.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ChatError> {
    let result = handle(&state, payload).await;
    match &result {
        Ok(_) => metrics::record_chat_outcome("ok"),
        Err(e) => metrics::record_chat_outcome(e.outcome()),
    }
    result
}

async fn handle(
    state: &AppState,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ChatError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected chat body");
        ChatError::InvalidBody(rejection.body_text())
    })?;

    request.validate().map_err(|_| ChatError::EmptyMessage)?;
    let message = request.message.as_deref().unwrap_or_default();
    let retry_count = request.retry_count();

    if !state.chat.is_configured() {
        tracing::error!("Chat request refused: GEMINI_API_KEY is not configured");
        return Err(ChatError::MissingApiKey);
    }

    match state.chat.reply(message).await {
        Ok(response) => Ok(Json(ChatResponse { response })),
        Err(e) => {
            let decision = state.retry_policy.decide(retry_count, &e.to_string());
            tracing::warn!(
                error = %e,
                retry_count,
                can_retry = decision.can_retry,
                "Gemini call failed"
            );
            Err(ChatError::Upstream(decision))
        }
    }
}
