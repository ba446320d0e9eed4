//! Prometheus metrics endpoint
//!
//! Exposes application metrics in Prometheus format for monitoring.

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize metrics (call once at startup)
pub fn init_metrics() -> anyhow::Result<()> {
    PROMETHEUS_HANDLE.get_or_try_init(|| PrometheusBuilder::new().install_recorder())?;

    register_metrics();
    Ok(())
}

/// Register all custom metrics
fn register_metrics() {
    metrics::describe_counter!(
        "switchboard_chat_requests_total",
        "Total number of chat requests by model and outcome"
    );
    metrics::describe_histogram!(
        "switchboard_chat_duration_seconds",
        "Chat request duration in seconds"
    );
}

/// Prometheus metrics endpoint handler
///
/// Returns metrics in Prometheus text format for scraping. Empty when the
/// recorder was never installed.
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE
        .get()
        .map(PrometheusHandle::render)
        .unwrap_or_default()
}

/// Record a completed chat request (`outcome` is success, mock or error)
pub fn record_chat(outcome: &str, model: &str, duration_secs: f64) {
    metrics::counter!(
        "switchboard_chat_requests_total",
        "outcome" => outcome.to_string(),
        "model" => model.to_string()
    )
    .increment(1);
    metrics::histogram!("switchboard_chat_duration_seconds", "model" => model.to_string())
        .record(duration_secs);
}
