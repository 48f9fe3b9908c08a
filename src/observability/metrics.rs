//! Metrics collection and exposition.
//!
//! # Metrics
//! - `siege_proxy_requests_total` (counter): requests by route, status
//! - `siege_proxy_request_duration_seconds` (histogram): latency by route
//! - `siege_proxy_project_lookups_total` (counter): detail lookups by outcome
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one completed inbound request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "siege_proxy_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("siege_proxy_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of one project detail lookup.
pub fn record_project_lookup(success: bool) {
    let outcome = if success { "ok" } else { "error" };
    metrics::counter!("siege_proxy_project_lookups_total", "outcome" => outcome).increment(1);
}
