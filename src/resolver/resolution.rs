//! Resolution results.

use serde::Serialize;

use crate::candidate::Candidate;

/// Final reachability verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Online,
    Offline,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Online => "online",
            Status::Offline => "offline",
        }
    }
}

/// Why a resolution ended offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OfflineReason {
    /// Every strategy was tried and no candidate answered.
    Exhausted,
    /// The device has no usable network interface.
    NoConnectivity,
    /// The caller abandoned the resolution.
    Cancelled,
    /// A manually entered address could not be parsed.
    InvalidAddress,
}

/// Outcome of a resolution. Never an error: failure is `Status::Offline`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Candidate>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offline_reason: Option<OfflineReason>,
}

impl Resolution {
    pub fn online(url: Candidate, message: impl Into<String>) -> Self {
        Self {
            status: Status::Online,
            url: Some(url),
            message: message.into(),
            offline_reason: None,
        }
    }

    pub fn offline(reason: OfflineReason, message: impl Into<String>) -> Self {
        Self {
            status: Status::Offline,
            url: None,
            message: message.into(),
            offline_reason: Some(reason),
        }
    }

    pub fn exhausted(attempted: usize) -> Self {
        Self::offline(
            OfflineReason::Exhausted,
            format!(
                "Could not reach the server after trying {} address(es). \
                 Make sure the server is running and this device is on the same network, \
                 or enter the server address manually.",
                attempted
            ),
        )
    }

    pub fn no_connectivity() -> Self {
        Self::offline(
            OfflineReason::NoConnectivity,
            "No network connection. Connect to Wi-Fi or mobile data and try again.",
        )
    }

    pub fn cancelled() -> Self {
        Self::offline(OfflineReason::Cancelled, "Connection check cancelled.")
    }

    pub fn is_online(&self) -> bool {
        self.status == Status::Online
    }

    /// Whether the UI should offer manual server address entry.
    ///
    /// True only after all strategies were exhausted.
    pub fn needs_manual_entry(&self) -> bool {
        self.offline_reason == Some(OfflineReason::Exhausted)
    }
}

/// Knobs for a single resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Fall back to scanning the local subnet when every candidate fails.
    pub discover: bool,
}
