//! Probe outcome types and the failure taxonomy.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Which probe strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Cheap GET to `/ping` expecting an exact sentinel body.
    Ping,
    /// GET to `/health` validating only the status code.
    Health,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Ping => "ping",
            Strategy::Health => "health",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate answered a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reachable {
    pub strategy: Strategy,
    pub status: u16,
}

/// Why a candidate could not be confirmed live.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The probe exceeded its deadline; the request was dropped.
    #[error("{strategy} probe to {url} timed out after {timeout_ms} ms")]
    Timeout {
        url: String,
        strategy: Strategy,
        timeout_ms: u64,
    },

    /// DNS failure, connection refused, reset mid-body, etc.
    #[error("{url} unreachable: {reason}")]
    NetworkUnreachable { url: String, reason: String },

    /// The server answered, but not with the expected status or body.
    #[error("{url} returned {status}: {detail}")]
    BadResponse {
        url: String,
        status: u16,
        detail: String,
    },

    /// The device reports no usable network interface.
    #[error("no network connection available")]
    NoConnectivity,
}

impl ProbeError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::Timeout { .. } => "timeout",
            ProbeError::NetworkUnreachable { .. } => "unreachable",
            ProbeError::BadResponse { .. } => "bad_response",
            ProbeError::NoConnectivity => "no_connectivity",
        }
    }
}

/// Result of a single probe.
pub type ProbeResult = Result<Reachable, ProbeError>;
