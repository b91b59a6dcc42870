//! Subnet scan candidate enumeration.
//!
//! Replaces the last octet of the device's address with a curated list of
//! common host values. This is a heuristic: servers on unlisted addresses
//! are not found.

use std::net::Ipv4Addr;

use crate::candidate::Candidate;
use crate::config::ResolverConfig;

/// Enumerates likely API addresses on the device's /24.
#[derive(Debug, Clone)]
pub struct SubnetScan {
    octets: Vec<u8>,
    ports: Vec<u16>,
    scheme: String,
    api_path: String,
}

impl SubnetScan {
    pub fn from_config(config: &ResolverConfig) -> Self {
        let discovery = &config.discovery;
        let ports = if discovery.scan_ports.is_empty() {
            vec![config.server.port]
        } else {
            discovery.scan_ports.clone()
        };

        Self {
            octets: discovery.scan_octets.clone(),
            ports,
            scheme: config.server.scheme.clone(),
            api_path: config.server.api_path.clone(),
        }
    }

    /// Candidates for every (octet, port) pair, octet-major, without duplicates.
    pub fn candidates(&self, device_ip: Ipv4Addr) -> Vec<Candidate> {
        let [a, b, c, _] = device_ip.octets();
        let mut out = Vec::with_capacity(self.octets.len() * self.ports.len());

        for &octet in &self.octets {
            let host = Ipv4Addr::new(a, b, c, octet).to_string();
            for &port in &self.ports {
                let candidate = Candidate::from_parts(&self.scheme, &host, port, &self.api_path);
                if !out.contains(&candidate) {
                    out.push(candidate);
                }
            }
        }
        out
    }
}
