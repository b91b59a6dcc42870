//! Candidate API base URLs.
//!
//! # Data Flow
//! ```text
//! ResolverConfig
//!     → generator.rs (deployed, configured, LAN hosts; deduplicated)
//!     → ledger prioritization (most successes first)
//!     → Vec<Candidate> handed to the resolver
//!
//! Candidate
//!     → endpoint.rs probe_url() (replace API path with /ping or /health)
//! ```

pub mod endpoint;
pub mod generator;

pub use endpoint::Candidate;
pub use generator::CandidateGenerator;
