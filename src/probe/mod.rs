//! Health probing subsystem.
//!
//! # Data Flow
//! ```text
//! Candidate "http://10.0.0.5/api"
//!     → ping:   GET http://10.0.0.5/ping    (short deadline, 200 + exact "PONG")
//!     → health: GET http://10.0.0.5/health  (long deadline, 200 only)
//!     → Result<Reachable, ProbeError>
//! ```
//!
//! # Design Decisions
//! - Probers are pure predicates: they never touch the ledger
//! - Every failure is a typed `ProbeError`, never a panic or a bare `false`
//! - Deadlines wrap the whole exchange (connect, headers and body)
//! - The resolver decides escalation order; a prober only runs one strategy

pub mod error;
pub mod http;

use std::future::Future;

use crate::candidate::Candidate;

pub use error::{ProbeError, ProbeResult, Reachable, Strategy};
pub use http::HttpProber;

/// Reachability checks against a single candidate.
pub trait Prober: Send + Sync {
    /// Minimal liveness probe expecting the sentinel body.
    fn ping(&self, candidate: &Candidate) -> impl Future<Output = ProbeResult> + Send;

    /// Heavier probe validating only the HTTP status.
    fn health_check(&self, candidate: &Candidate) -> impl Future<Output = ProbeResult> + Send;
}
