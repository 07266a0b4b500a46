//! Generative-language provider abstraction.
//!
//! The chat handler only depends on [`TextProvider`], so the Gemini client can
//! be swapped for the mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("{0}")]
    ApiError(String),

    #[error("Rate limited by upstream API")]
    RateLimited,

    #[error("Response blocked by content filter")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Gemini returned an empty response.")]
    EmptyResponse,
}

impl ProviderError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::NetworkError(_) => "network_error",
            ProviderError::EmptyResponse => "empty_response",
        }
    }
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
    Other,
}

impl FinishReason {
    pub fn from_api(reason: Option<&str>) -> Self {
        match reason {
            None | Some("STOP") => FinishReason::Complete,
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => {
                FinishReason::ContentFilter
            }
            Some(_) => FinishReason::Other,
        }
    }
}

/// Result of a provider call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Model text; `None` when the candidate carried no text parts.
    pub text: Option<String>,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub finish_reason: FinishReason,
}

/// Single-turn text generation under a system instruction.
#[async_trait]
pub trait TextProvider: Send + Sync {
    async fn generate(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Whether credentials are present. Checked before any upstream call.
    fn is_configured(&self) -> bool;

    /// Model identifier, for logs and metrics.
    fn model(&self) -> &str;
}
