pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use config::ChatConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use models::RetryPolicy;
use service_core::error::AppError;
use services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use services::providers::TextProvider;
use services::{ChatService, InstructionLoader};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ChatConfig>,
    pub chat: ChatService,
    pub retry_policy: RetryPolicy,
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(
        config: ChatConfig,
        provider: Arc<dyn TextProvider>,
        metrics: PrometheusHandle,
    ) -> Self {
        let instructions = InstructionLoader::new(config.instructions.path.clone());
        Self {
            config: Arc::new(config),
            chat: ChatService::new(provider, instructions),
            retry_policy: RetryPolicy::default(),
            metrics,
        }
    }

    /// State backed by the real Gemini client.
    pub fn from_config(config: ChatConfig, metrics: PrometheusHandle) -> Result<Self, AppError> {
        let provider = GeminiTextProvider::new(GeminiConfig {
            api_key: config.gemini.api_key.clone(),
            model: config.gemini.model.clone(),
            api_base: config.gemini.api_base.clone(),
            timeout: Duration::from_secs(config.gemini.timeout_secs),
        })
        .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;

        tracing::info!(
            model = %provider.model(),
            configured = provider.is_configured(),
            instructions = %config.instructions.path.display(),
            "Initialized Gemini text provider"
        );

        Ok(Self::new(config, Arc::new(provider), metrics))
    }
}
