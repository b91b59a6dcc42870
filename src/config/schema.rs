//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the resolver.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Production API address tried before any locally configured server.
pub const DEFAULT_DEPLOYED_URL: &str = "https://fitness-api.onrender.com/api";

/// Root configuration for the endpoint resolver.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Deployed/production API base URL. Empty disables it.
    pub deployed_url: String,

    /// Statically configured API server.
    pub server: ServerConfig,

    /// Probe timeouts and endpoint contract.
    pub probe: ProbeConfig,

    /// Local-network discovery settings.
    pub discovery: DiscoveryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            deployed_url: DEFAULT_DEPLOYED_URL.to_string(),
            server: ServerConfig::default(),
            probe: ProbeConfig::default(),
            discovery: DiscoveryConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Statically configured API server (host/port pair).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// URL scheme, `http` or `https`.
    pub scheme: String,

    /// Host name or IP address.
    pub host: String,

    /// TCP port the API listens on.
    pub port: u16,

    /// Path prefix of the API (e.g., "/api").
    pub api_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "localhost".to_string(),
            port: 5000,
            api_path: "/api".to_string(),
        }
    }
}

/// Probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Ping probe deadline in milliseconds.
    pub ping_timeout_ms: u64,

    /// Full health-check deadline in milliseconds.
    pub health_timeout_ms: u64,

    /// Path replacing the API path segment for the ping probe.
    pub ping_path: String,

    /// Path replacing the API path segment for the health probe.
    pub health_path: String,

    /// Exact body the ping endpoint must return.
    pub ping_sentinel: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ping_timeout_ms: 1500,
            health_timeout_ms: 5000,
            ping_path: "/ping".to_string(),
            health_path: "/health".to_string(),
            ping_sentinel: "PONG".to_string(),
        }
    }
}

/// Host platform the client runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Web,
    #[default]
    Desktop,
}

/// Local-network discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Add well-known LAN hosts to the candidate list.
    pub enabled: bool,

    /// Platform the client runs on.
    pub platform: Platform,

    /// Running under a browser-hosted debugger (emulator aliases are meaningless there).
    pub browser_debug: bool,

    /// Well-known LAN hosts (gateways, loopback).
    pub lan_hosts: Vec<String>,

    /// Emulator host-machine aliases, only tried on Android.
    pub emulator_hosts: Vec<String>,

    /// Last-octet values tried during a subnet scan.
    pub scan_octets: Vec<u8>,

    /// Ports tried per scanned address. Empty means only `server.port`.
    pub scan_ports: Vec<u16>,

    /// Override for the device's own IPv4 address.
    pub device_ip: Option<String>,

    /// Skip all probing when the device reports no usable interface.
    pub check_connectivity: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            platform: Platform::default(),
            browser_debug: false,
            lan_hosts: vec![
                "192.168.1.1".to_string(),
                "192.168.0.1".to_string(),
                "10.0.0.1".to_string(),
                "127.0.0.1".to_string(),
                "localhost".to_string(),
            ],
            emulator_hosts: vec!["10.0.2.2".to_string(), "10.0.3.2".to_string()],
            scan_octets: vec![1, 2, 100, 101, 102, 103, 104, 105, 110, 150, 200, 254],
            scan_ports: Vec::new(),
            device_ip: None,
            check_connectivity: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9464".to_string(),
        }
    }
}
