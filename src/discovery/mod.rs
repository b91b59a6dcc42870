//! Local-network discovery.
//!
//! # Data Flow
//! ```text
//! NetworkInfo (network.rs)
//!     → is_connected()  → resolver skips probing entirely when false
//!     → local_ipv4()    → scan.rs replaces last octet with common values
//!     → Vec<Candidate>  → probed sequentially by the resolver
//! ```
//!
//! # Design Decisions
//! - Curated octet list, not a full /24 sweep
//! - Device facts sit behind a trait so resolution is testable offline

pub mod network;
pub mod scan;

pub use network::{NetworkInfo, StaticNetwork, SystemNetwork};
pub use scan::SubnetScan;
