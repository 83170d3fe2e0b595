//! Prometheus metrics for the market API.
//!
//! One counter/histogram pair per API request, plus counters for
//! subgraph pagination, exposed at `/metrics` on the configured port.

use std::net::SocketAddr;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to start the metrics exporter.
    #[error("metrics exporter installation failed: {0}")]
    Installation(String),
}

/// Initialize the Prometheus metrics exporter.
///
/// Starts an HTTP server exposing metrics at `/metrics`.
pub fn init_metrics(listen_addr: SocketAddr) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(listen_addr)
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(addr = %listen_addr, "Prometheus metrics exporter started");
    Ok(())
}

/// Record one handled API request.
pub fn record_api_request(route: &str, status: u16, latency_secs: f64) {
    counter!(
        "bazaar_api_requests_total",
        "route" => route.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);

    histogram!(
        "bazaar_api_request_duration_seconds",
        "route" => route.to_string(),
    )
    .record(latency_secs);
}

/// Record one completed (possibly multi-page) subgraph fetch.
pub fn record_subgraph_fetch(entity: &str, pages: u64, rows: usize) {
    counter!(
        "bazaar_subgraph_pages_total",
        "entity" => entity.to_string(),
    )
    .increment(pages);

    counter!(
        "bazaar_subgraph_rows_total",
        "entity" => entity.to_string(),
    )
    .increment(rows as u64);
}
