//! Device network information.

use std::net::{IpAddr, Ipv4Addr};

use crate::config::DiscoveryConfig;

/// What the device knows about its own network attachment.
pub trait NetworkInfo: Send + Sync {
    /// True when at least one non-loopback interface is up.
    fn is_connected(&self) -> bool;

    /// The device's own IPv4 address, used to derive the local subnet.
    fn local_ipv4(&self) -> Option<Ipv4Addr>;
}

/// Reads interface state from the operating system.
#[derive(Debug, Clone, Default)]
pub struct SystemNetwork {
    device_ip: Option<Ipv4Addr>,
}

impl SystemNetwork {
    /// Honor a configured `device_ip` override.
    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self {
            device_ip: config.device_ip.as_deref().and_then(|ip| ip.parse().ok()),
        }
    }
}

impl NetworkInfo for SystemNetwork {
    fn is_connected(&self) -> bool {
        if self.device_ip.is_some() {
            return true;
        }
        match local_ip_address::list_afinet_netifas() {
            Ok(interfaces) => interfaces.iter().any(|(_, ip)| !ip.is_loopback()),
            Err(e) => {
                tracing::debug!(error = %e, "Could not list network interfaces");
                false
            }
        }
    }

    fn local_ipv4(&self) -> Option<Ipv4Addr> {
        if let Some(ip) = self.device_ip {
            return Some(ip);
        }
        match local_ip_address::local_ip() {
            Ok(IpAddr::V4(ip)) => Some(ip),
            Ok(IpAddr::V6(ip)) => {
                tracing::debug!(address = %ip, "Device address is IPv6; subnet scan unavailable");
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, "Could not determine device address");
                None
            }
        }
    }
}

/// Fixed network facts, for tests and embedders that track connectivity
/// themselves.
#[derive(Debug, Clone, Copy)]
pub struct StaticNetwork {
    pub connected: bool,
    pub ip: Option<Ipv4Addr>,
}

impl StaticNetwork {
    pub fn connected(ip: Option<Ipv4Addr>) -> Self {
        Self { connected: true, ip }
    }

    pub fn disconnected() -> Self {
        Self {
            connected: false,
            ip: None,
        }
    }
}

impl NetworkInfo for StaticNetwork {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn local_ipv4(&self) -> Option<Ipv4Addr> {
        self.ip
    }
}
