//! Connection-success ledger.
//!
//! # Data Flow
//! ```text
//! Probe succeeds (resolver)
//!     → store.rs record_success(url)
//!         → success count += 1
//!         → working URL = url
//!
//! Candidate generation
//!     → working URL set?  → try it alone
//!     → otherwise          → prioritize() by success count (stable)
//! ```
//!
//! # Design Decisions
//! - Injectable instance, not a module-level global, so tests stay isolated
//! - Counts only grow; `reset()` is the single way to clear them
//! - `reset()` and `clear_working_url()` are independent operations
//! - Counts live for the process lifetime only

pub mod store;

pub use store::{ConnectionLedger, ConnectionStats};
