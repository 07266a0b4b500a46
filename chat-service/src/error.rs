use crate::models::chat::EMPTY_MESSAGE;
use crate::models::{ErrorBody, RetryDecision};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;
use thiserror::Error;

pub const MISSING_API_KEY: &str = "API Key is missing. Please check your .env file.";

/// Every non-200 outcome of `POST /chat`.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Body was not a JSON object of the expected shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{}", EMPTY_MESSAGE)]
    EmptyMessage,

    #[error("{}", MISSING_API_KEY)]
    MissingApiKey,

    #[error("{0}")]
    Upstream(RetryDecision),
}

impl ChatError {
    pub fn outcome(&self) -> &'static str {
        match self {
            ChatError::InvalidBody(_) | ChatError::EmptyMessage => "invalid",
            ChatError::MissingApiKey => "missing_key",
            ChatError::Upstream(_) => "upstream_error",
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        match self {
            ChatError::InvalidBody(_) | ChatError::EmptyMessage => {
                AppError::BadRequest(anyhow::anyhow!(self.to_string())).into_response()
            }
            ChatError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: MISSING_API_KEY.to_string(),
                    can_retry: None,
                }),
            )
                .into_response(),
            ChatError::Upstream(decision) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: decision.message,
                    can_retry: Some(decision.can_retry),
                }),
            )
                .into_response(),
        }
    }
}
