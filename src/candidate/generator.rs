//! Endpoint candidate generation.
//!
//! # Order of consideration
//! 1. Cached working URL (returned alone)
//! 2. Deployed/production URL
//! 3. Statically configured server
//! 4. Well-known LAN hosts, in local-network discovery mode
//!
//! The static list is deduplicated and then reordered by the ledger.

use crate::candidate::Candidate;
use crate::config::{Platform, ResolverConfig};
use crate::ledger::ConnectionLedger;

/// Produces the ordered list of candidates to try.
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    deployed: Option<Candidate>,
    configured: Candidate,
    lan: Vec<Candidate>,
}

impl CandidateGenerator {
    /// Build the static candidate set from configuration.
    pub fn from_config(config: &ResolverConfig) -> Self {
        let server = &config.server;
        let discovery = &config.discovery;

        let deployed = Some(config.deployed_url.trim_end_matches('/'))
            .filter(|u| !u.is_empty())
            .map(Candidate::new);
        let configured =
            Candidate::from_parts(&server.scheme, &server.host, server.port, &server.api_path);

        let mut lan = Vec::new();
        if discovery.enabled {
            for host in &discovery.lan_hosts {
                lan.push(Candidate::from_parts(&server.scheme, host, server.port, &server.api_path));
            }
            // Emulator aliases only point at the host machine from inside an
            // Android emulator; a browser debugger cannot reach them.
            if discovery.platform == Platform::Android && !discovery.browser_debug {
                for host in &discovery.emulator_hosts {
                    lan.push(Candidate::from_parts(&server.scheme, host, server.port, &server.api_path));
                }
            }
        }

        Self {
            deployed,
            configured,
            lan,
        }
    }

    /// All static candidates in consideration order, without duplicates.
    ///
    /// Never empty: the configured server is always present.
    pub fn static_candidates(&self) -> Vec<Candidate> {
        let mut out: Vec<Candidate> = Vec::with_capacity(2 + self.lan.len());
        let all = self
            .deployed
            .iter()
            .chain(std::iter::once(&self.configured))
            .chain(self.lan.iter());
        for candidate in all {
            if !out.contains(candidate) {
                out.push(candidate.clone());
            }
        }
        out
    }

    /// Candidates for the next connection attempt.
    ///
    /// A cached working URL short-circuits generation and is returned alone;
    /// otherwise the static list is ordered most-reliable-first.
    pub fn candidates(&self, ledger: &ConnectionLedger) -> Vec<Candidate> {
        if let Some(working) = ledger.working_url() {
            return vec![working];
        }
        ledger.prioritize(&self.static_candidates())
    }
}
