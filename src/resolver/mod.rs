//! Endpoint resolution.
//!
//! # Data Flow
//! ```text
//! caller (login, signup, every API call)
//!     → engine.rs Resolver::resolve()
//!         → cached working URL (ledger)
//!         → CandidateGenerator + ledger prioritization
//!         → Prober: ping, then health-check, per candidate
//!         → SubnetScan (when discovery requested)
//!     → Resolution { status, url, message }
//!
//! Manual entry (manual.rs):
//!     user-typed address → Candidate → probed like any other
//! ```
//!
//! # Design Decisions
//! - Sequential probing: one success records exactly one ledger increment
//! - The resolver never fails; the worst case is `Status::Offline`
//! - Cancellation is cooperative: the in-flight probe future is dropped

pub mod engine;
pub mod manual;
pub mod resolution;

pub use engine::Resolver;
pub use manual::normalize_address;
pub use resolution::{OfflineReason, Resolution, ResolveOptions, Status};
