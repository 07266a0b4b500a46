//! Mock provider for tests.

use super::{FinishReason, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

enum Outcome {
    Reply(Option<String>),
    Fail(ProviderError),
}

/// Canned-outcome provider that records how it was called.
pub struct MockTextProvider {
    configured: bool,
    outcome: Outcome,
    calls: AtomicUsize,
    last_system_instruction: Mutex<Option<String>>,
}

impl MockTextProvider {
    fn with_outcome(configured: bool, outcome: Outcome) -> Self {
        Self {
            configured,
            outcome,
            calls: AtomicUsize::new(0),
            last_system_instruction: Mutex::new(None),
        }
    }

    /// Answers every prompt with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_outcome(true, Outcome::Reply(Some(text.into())))
    }

    /// Succeeds at the transport level but carries no text.
    pub fn empty() -> Self {
        Self::with_outcome(true, Outcome::Reply(None))
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::with_outcome(true, Outcome::Fail(error))
    }

    /// Reports no credentials; `generate` fails if reached anyway.
    pub fn unconfigured() -> Self {
        Self::with_outcome(
            false,
            Outcome::Fail(ProviderError::NotConfigured("mock has no API key".into())),
        )
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_system_instruction(&self) -> Option<String> {
        self.last_system_instruction
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_system_instruction.lock() {
            *guard = Some(system_instruction.to_string());
        }

        match &self.outcome {
            Outcome::Reply(text) => Ok(ProviderResponse {
                text: text.clone(),
                input_tokens: prompt.len() as u64 / 4,
                output_tokens: text.as_ref().map_or(0, |t| t.len() as u64 / 4),
                finish_reason: FinishReason::Complete,
            }),
            Outcome::Fail(e) => Err(e.clone()),
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn model(&self) -> &str {
        "mock"
    }
}
