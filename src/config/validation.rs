//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs, addresses and value ranges (timeouts > 0, ports valid)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ResolverConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::{Ipv4Addr, SocketAddr};

use thiserror::Error;
use url::Url;

use crate::config::schema::ResolverConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("deployed_url '{0}' is not an http(s) URL")]
    InvalidDeployedUrl(String),

    #[error("server.scheme must be 'http' or 'https', got '{0}'")]
    InvalidScheme(String),

    #[error("server.host must not be empty")]
    EmptyHost,

    #[error("server.port must be non-zero")]
    ZeroPort,

    #[error("probe.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("probe.ping_sentinel must not be empty")]
    EmptySentinel,

    #[error("probe.{field} must start with '/', got '{value}'")]
    RelativeProbePath { field: &'static str, value: String },

    #[error("discovery.device_ip '{0}' is not an IPv4 address")]
    InvalidDeviceIp(String),

    #[error("discovery.scan_ports must not contain 0")]
    ZeroScanPort,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &ResolverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.deployed_url.is_empty() {
        let valid = Url::parse(&config.deployed_url)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid {
            errors.push(ValidationError::InvalidDeployedUrl(config.deployed_url.clone()));
        }
    }

    let server = &config.server;
    if !matches!(server.scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::InvalidScheme(server.scheme.clone()));
    }
    if server.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if server.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    let probe = &config.probe;
    if probe.ping_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("ping_timeout_ms"));
    }
    if probe.health_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("health_timeout_ms"));
    }
    if probe.ping_sentinel.is_empty() {
        errors.push(ValidationError::EmptySentinel);
    }
    for (field, value) in [("ping_path", &probe.ping_path), ("health_path", &probe.health_path)] {
        if !value.starts_with('/') {
            errors.push(ValidationError::RelativeProbePath {
                field,
                value: value.clone(),
            });
        }
    }

    let discovery = &config.discovery;
    if let Some(ip) = &discovery.device_ip {
        if ip.parse::<Ipv4Addr>().is_err() {
            errors.push(ValidationError::InvalidDeviceIp(ip.clone()));
        }
    }
    if discovery.scan_ports.contains(&0) {
        errors.push(ValidationError::ZeroScanPort);
    }

    let observability = &config.observability;
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
