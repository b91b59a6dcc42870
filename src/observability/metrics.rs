//! Metrics collection and exposition.
//!
//! # Metrics
//! - `resolver_probes_total` (counter): probes by strategy and outcome
//! - `resolver_resolutions_total` (counter): resolutions by final status
//! - `resolver_resolution_duration_seconds` (histogram): end-to-end latency
//! - `resolver_ledger_entries` (gauge): candidates with recorded successes
//!
//! Recording is a no-op until a recorder is installed, so library users
//! that never call [`init_metrics`] pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with an HTTP scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record the outcome of one probe.
pub fn record_probe(strategy: &'static str, outcome: &'static str) {
    counter!("resolver_probes_total", "strategy" => strategy, "outcome" => outcome).increment(1);
}

/// Record a finished resolution.
pub fn record_resolution(status: &'static str, started: Instant) {
    counter!("resolver_resolutions_total", "status" => status).increment(1);
    histogram!("resolver_resolution_duration_seconds").record(started.elapsed().as_secs_f64());
}

/// Record the number of ledger entries.
pub fn record_ledger_size(entries: usize) {
    gauge!("resolver_ledger_entries").set(entries as f64);
}
