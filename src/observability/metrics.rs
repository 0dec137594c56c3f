//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): searches by outcome and status
//! - `gateway_upstream_duration_seconds` (histogram): time spent per search
//! - `gateway_config_reloads_total` (counter): reload attempts by result
//!
//! Without an installed recorder every call is a no-op.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one forwarded search.
pub fn record_search(outcome: &'static str, status: u16, start_time: Instant) {
    counter!(
        "gateway_requests_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("gateway_upstream_duration_seconds", "outcome" => outcome)
        .record(start_time.elapsed().as_secs_f64());
}

/// Record a configuration reload attempt.
pub fn record_config_reload(success: bool) {
    let result = if success { "applied" } else { "rejected" };
    counter!("gateway_config_reloads_total", "result" => result).increment(1);
}
