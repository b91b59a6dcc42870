//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Prober, ledger and resolver produce:
//!     → logging.rs (structured log events, one span per resolution)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stderr (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, opt-in)
//! ```
//!
//! # Design Decisions
//! - The library only emits; the binary decides where events go
//! - Each resolution carries a UUID so interleaved callers can be told apart

pub mod logging;
pub mod metrics;
