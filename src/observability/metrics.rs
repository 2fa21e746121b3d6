//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): requests by method, status, resource
//! - `router_request_duration_seconds` (histogram): latency distribution
//! - `router_not_found_total` (counter): requests no resource answered

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished request. `resource` is `"none"` when no resource matched.
pub fn record_request(method: &str, status: u16, resource: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("resource", resource.to_string()),
    ];
    ::metrics::counter!("router_requests_total", &labels).increment(1);
    ::metrics::histogram!("router_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record a request whose path matched no resource.
pub fn record_not_found() {
    ::metrics::counter!("router_not_found_total").increment(1);
}
