use super::instructions::InstructionLoader;
use super::metrics;
use super::providers::{ProviderError, TextProvider};
use std::sync::Arc;
use std::time::Instant;

/// One chat turn: fresh system instruction, one upstream call, text out.
#[derive(Clone)]
pub struct ChatService {
    provider: Arc<dyn TextProvider>,
    instructions: InstructionLoader,
}

impl ChatService {
    pub fn new(provider: Arc<dyn TextProvider>, instructions: InstructionLoader) -> Self {
        Self {
            provider,
            instructions,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    pub async fn reply(&self, message: &str) -> Result<String, ProviderError> {
        let instruction = self.instructions.load().await;
        metrics::record_instruction_source(instruction.source.as_str());

        let model = self.provider.model();
        let started = Instant::now();
        let result = self.provider.generate(&instruction.text, message).await;
        let elapsed = started.elapsed();

        let response = match result {
            Ok(response) => {
                metrics::record_gemini_call(model, "ok", elapsed);
                response
            }
            Err(e) => {
                metrics::record_gemini_call(model, e.kind(), elapsed);
                return Err(e);
            }
        };

        metrics::record_tokens(model, response.input_tokens, response.output_tokens);
        tracing::info!(
            model = %model,
            instruction_source = instruction.source.as_str(),
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            finish_reason = ?response.finish_reason,
            latency_ms = elapsed.as_millis() as u64,
            "Gemini call completed"
        );

        match response.text {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(ProviderError::EmptyResponse),
        }
    }
}
