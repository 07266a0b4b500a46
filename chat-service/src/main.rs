use chat_service::config::ChatConfig;
use chat_service::services::metrics;
use chat_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty());
    init_tracing("chat-service", "info", otlp_endpoint.as_deref());

    let config = ChatConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let handle = metrics::install_recorder().map_err(|e| {
        tracing::error!("Failed to install metrics recorder: {}", e);
        anyhow::anyhow!("Metrics error: {}", e)
    })?;

    let app = Application::build(config, handle)
        .await
        .map_err(|e| anyhow::anyhow!("Startup error: {}", e))?;

    tracing::info!("Starting chat-service on port {}", app.port());
    app.run_until_stopped().await?;

    Ok(())
}
