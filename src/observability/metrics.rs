//! Metrics collection and exposition.
//!
//! # Metrics
//! - `devserver_requests_total` (counter): requests by route kind, status
//! - `devserver_request_duration_seconds` (histogram): latency by route kind
//! - `devserver_rewrites_total` (counter): scripts rewritten
//! - `devserver_stripped_directives_total` (counter): directive lines removed
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Prometheus endpoint is opt-in (`observability.metrics_enabled`)

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a finished request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    counter!("devserver_requests_total", "route" => route, "status" => status.to_string())
        .increment(1);
    histogram!("devserver_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record a rewritten script.
pub fn record_rewrite(stripped: usize) {
    counter!("devserver_rewrites_total").increment(1);
    counter!("devserver_stripped_directives_total").increment(stripped as u64);
}
