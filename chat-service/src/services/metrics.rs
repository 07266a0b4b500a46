//! Prometheus metrics for chat-service.
//!
//! Metrics are recorded through the `metrics` facade; the Prometheus recorder
//! is installed once at startup and rendered by `GET /metrics`.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

pub const CHAT_REQUESTS_TOTAL: &str = "chat_requests_total";
pub const GEMINI_REQUEST_DURATION_SECONDS: &str = "gemini_request_duration_seconds";
pub const GEMINI_TOKENS_TOTAL: &str = "gemini_tokens_total";
pub const INSTRUCTION_LOADS_TOTAL: &str = "instruction_loads_total";

const LATENCY_BUCKETS: &[f64] = &[0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0];
const HTTP_BUCKETS: &[f64] = &[0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0, 120.0];

fn builder() -> Result<PrometheusBuilder, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(GEMINI_REQUEST_DURATION_SECONDS.to_string()),
            LATENCY_BUCKETS,
        )?
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            HTTP_BUCKETS,
        )
}

/// Install the process-wide recorder. Call once, from `main`.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    builder()?.install_recorder()
}

/// A recorder that is not installed globally; renders empty output. For tests.
pub fn detached_handle() -> Result<PrometheusHandle, BuildError> {
    Ok(builder()?.build_recorder().handle())
}

/// Outcome of a `POST /chat` call: `ok`, `invalid`, `missing_key` or
/// `upstream_error`.
pub fn record_chat_outcome(outcome: &'static str) {
    counter!(CHAT_REQUESTS_TOTAL, "outcome" => outcome).increment(1);
}

pub fn record_gemini_call(model: &str, result: &'static str, elapsed: Duration) {
    histogram!(
        GEMINI_REQUEST_DURATION_SECONDS,
        "model" => model.to_string(),
        "result" => result
    )
    .record(elapsed.as_secs_f64());
}

pub fn record_tokens(model: &str, input: u64, output: u64) {
    counter!(GEMINI_TOKENS_TOTAL, "model" => model.to_string(), "type" => "input")
        .increment(input);
    counter!(GEMINI_TOKENS_TOTAL, "model" => model.to_string(), "type" => "output")
        .increment(output);
}

pub fn record_instruction_source(source: &'static str) {
    counter!(INSTRUCTION_LOADS_TOTAL, "source" => source).increment(1);
}
