//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Caller / Ctrl-C (signals.rs)
//!     → cancel.rs Cancellation::cancel()
//!     → Resolver::resolve_until observes it
//!     → in-flight probe dropped, `offline` (cancelled) returned
//! ```

pub mod cancel;
pub mod signals;

pub use cancel::Cancellation;
