//! Metrics collection and exposition.
//!
//! # Metrics
//! - `zshcfg_requests_total` (counter): API requests by endpoint, outcome
//! - `zshcfg_request_duration_seconds` (histogram): latency by endpoint
//!
//! # Design Decisions
//! - Exporter runs on its own listener, off the service port
//! - Recording is unconditional and cheap; with no exporter installed the
//!   macros are no-ops

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one API request.
pub fn record_request(endpoint: &'static str, success: bool, start: Instant) {
    let outcome = if success { "ok" } else { "error" };
    metrics::counter!("zshcfg_requests_total", "endpoint" => endpoint, "outcome" => outcome)
        .increment(1);
    metrics::histogram!("zshcfg_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}
