//! Adaptive API endpoint resolution.
//!
//! Finds a live API base URL across unreliable networks: a cached
//! last-known-good URL, a deployed URL, a configured server and, on demand,
//! likely addresses on the local subnet. Successes are counted per URL so
//! future attempts try the most reliable endpoint first.

pub mod candidate;
pub mod config;
pub mod discovery;
pub mod ledger;
pub mod lifecycle;
pub mod observability;
pub mod probe;
pub mod resolver;

pub use candidate::{Candidate, CandidateGenerator};
pub use config::ResolverConfig;
pub use ledger::{ConnectionLedger, ConnectionStats};
pub use lifecycle::Cancellation;
pub use probe::{HttpProber, ProbeError, Prober, Reachable, Strategy};
pub use resolver::{Resolution, ResolveOptions, Resolver, Status};
