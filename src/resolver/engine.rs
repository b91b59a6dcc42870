//! Resolution orchestrator.
//!
//! # Algorithm
//! 1. No usable interface → offline without probing
//! 2. Cached working URL → ping, then health-check
//! 3. Prioritized candidates → ping, then health-check, in order
//! 4. Optional subnet scan → same probing per scanned address
//! 5. Nothing answered → offline (UI may offer manual entry)
//!
//! Candidates are probed one at a time. A candidate is tried at most once
//! per call.

use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;
use uuid::Uuid;

use crate::candidate::{Candidate, CandidateGenerator};
use crate::config::ResolverConfig;
use crate::discovery::{NetworkInfo, SubnetScan, SystemNetwork};
use crate::ledger::ConnectionLedger;
use crate::lifecycle::Cancellation;
use crate::observability::metrics;
use crate::probe::{HttpProber, ProbeError, Prober, Reachable};
use crate::resolver::manual::normalize_address;
use crate::resolver::{OfflineReason, Resolution, ResolveOptions};

/// Finds a live API base URL and keeps the ledger current.
pub struct Resolver<P = HttpProber, N = SystemNetwork> {
    config: ResolverConfig,
    generator: CandidateGenerator,
    scan: SubnetScan,
    ledger: Arc<ConnectionLedger>,
    prober: P,
    network: N,
}

impl Resolver<HttpProber, SystemNetwork> {
    /// Resolver with the HTTP prober and the operating system's network info.
    pub fn from_config(
        config: ResolverConfig,
        ledger: Arc<ConnectionLedger>,
    ) -> Result<Self, reqwest::Error> {
        let prober = HttpProber::new(&config)?;
        let network = SystemNetwork::from_config(&config.discovery);
        Ok(Self::new(config, ledger, prober, network))
    }
}

impl<P: Prober, N: NetworkInfo> Resolver<P, N> {
    pub fn new(config: ResolverConfig, ledger: Arc<ConnectionLedger>, prober: P, network: N) -> Self {
        Self {
            generator: CandidateGenerator::from_config(&config),
            scan: SubnetScan::from_config(&config),
            config,
            ledger,
            prober,
            network,
        }
    }

    pub fn ledger(&self) -> &Arc<ConnectionLedger> {
        &self.ledger
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn prober(&self) -> &P {
        &self.prober
    }

    /// Candidates the next API call should use, best first.
    pub fn candidates(&self) -> Vec<Candidate> {
        self.generator.candidates(&self.ledger)
    }

    /// Run the ping strategy alone. Does not touch the ledger.
    pub async fn ping_server(&self, candidate: &Candidate) -> bool {
        match self.prober.ping(candidate).await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(url = %candidate, error = %e, "Ping failed");
                false
            }
        }
    }

    /// Ping, escalating to the full health check when the ping fails.
    ///
    /// Returns the health-check error when both strategies fail. Does not
    /// touch the ledger.
    pub async fn probe_candidate(&self, candidate: &Candidate) -> Result<Reachable, ProbeError> {
        match self.prober.ping(candidate).await {
            Ok(reachable) => {
                metrics::record_probe("ping", "ok");
                return Ok(reachable);
            }
            Err(e) => {
                metrics::record_probe("ping", e.kind());
                tracing::debug!(url = %candidate, error = %e, "Ping failed, trying health check");
            }
        }

        match self.prober.health_check(candidate).await {
            Ok(reachable) => {
                metrics::record_probe("health", "ok");
                Ok(reachable)
            }
            Err(e) => {
                metrics::record_probe("health", e.kind());
                tracing::debug!(url = %candidate, error = %e, "Health check failed");
                Err(e)
            }
        }
    }

    /// Full resolution over the configured candidates.
    pub async fn resolve(&self, options: ResolveOptions) -> Resolution {
        let candidates = self.generator.static_candidates();
        self.check_server_connection(&candidates, options.discover).await
    }

    /// [`resolve`](Self::resolve), abandoned when `cancel` fires.
    pub async fn resolve_until(&self, options: ResolveOptions, cancel: &Cancellation) -> Resolution {
        let started = Instant::now();
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "Resolution cancelled");
                metrics::record_resolution("cancelled", started);
                Resolution::cancelled()
            }
            resolution = self.resolve(options) => resolution,
        }
    }

    /// Resolve against an explicit candidate list.
    ///
    /// The cached working URL is tried first, then `urls` in ledger order,
    /// then (if `discover`) the local subnet.
    pub async fn check_server_connection(&self, urls: &[Candidate], discover: bool) -> Resolution {
        let span = tracing::info_span!("resolve", resolution_id = %Uuid::new_v4(), discover);
        async {
            let started = Instant::now();
            let resolution = self.run(urls, discover).await;

            metrics::record_resolution(resolution.status.as_str(), started);
            match &resolution.url {
                Some(url) => tracing::info!(
                    url = %url,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Server reachable"
                ),
                None => tracing::warn!(
                    reason = ?resolution.offline_reason,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "No server reachable"
                ),
            }
            resolution
        }
        .instrument(span)
        .await
    }

    /// Probe the local subnet only, adopting the first address that answers.
    ///
    /// On failure the message counts the scanned addresses.
    pub async fn scan_network_for_server(&self) -> Resolution {
        let mut tried = Vec::new();
        match self.scan_subnet(&mut tried).await {
            Some(found) => Resolution::online(found, "Found server on the local network."),
            None => Resolution::exhausted(tried.len()),
        }
    }

    /// Probe a user-entered address and adopt it on success.
    pub async fn try_manual_address(&self, input: &str) -> Resolution {
        let Some(candidate) = normalize_address(input, &self.config.server) else {
            return Resolution::offline(
                OfflineReason::InvalidAddress,
                format!("'{}' is not a valid server address.", input.trim()),
            );
        };

        if self.try_candidate(&candidate).await {
            Resolution::online(candidate, "Connected to manually entered server.")
        } else {
            Resolution::exhausted(1)
        }
    }

    async fn run(&self, urls: &[Candidate], discover: bool) -> Resolution {
        if self.config.discovery.check_connectivity && !self.network.is_connected() {
            tracing::warn!(error = %ProbeError::NoConnectivity, "Skipping probes");
            return Resolution::no_connectivity();
        }

        let mut tried: Vec<Candidate> = Vec::new();

        // The cache is not discarded on failure; only a different success
        // replaces it.
        if let Some(working) = self.ledger.working_url() {
            tried.push(working.clone());
            if self.try_candidate(&working).await {
                return Resolution::online(working, "Connected using cached server.");
            }
            tracing::info!(url = %working, "Cached server unreachable, trying other candidates");
        }

        for candidate in self.ledger.prioritize(urls) {
            if tried.contains(&candidate) {
                continue;
            }
            tried.push(candidate.clone());
            if self.try_candidate(&candidate).await {
                return Resolution::online(candidate, "Connected to server.");
            }
        }

        if discover {
            if let Some(found) = self.scan_subnet(&mut tried).await {
                return Resolution::online(found, "Found server on the local network.");
            }
        }

        Resolution::exhausted(tried.len())
    }

    /// Probe one candidate and record it on success.
    async fn try_candidate(&self, candidate: &Candidate) -> bool {
        if self.is_unreachable_emulator_alias(candidate) {
            tracing::debug!(url = %candidate, "Skipping emulator address under browser debugger");
            return false;
        }

        match self.probe_candidate(candidate).await {
            Ok(reachable) => {
                tracing::debug!(url = %candidate, strategy = %reachable.strategy, "Candidate reachable");
                self.ledger.record_success(candidate);
                true
            }
            Err(_) => false,
        }
    }

    async fn scan_subnet(&self, tried: &mut Vec<Candidate>) -> Option<Candidate> {
        let Some(device_ip) = self.network.local_ipv4() else {
            tracing::warn!("Device address unknown, skipping subnet scan");
            return None;
        };

        let candidates = self.scan.candidates(device_ip);
        tracing::info!(device_ip = %device_ip, count = candidates.len(), "Scanning local network");

        for candidate in candidates {
            if tried.contains(&candidate) {
                continue;
            }
            tried.push(candidate.clone());
            if self.try_candidate(&candidate).await {
                return Some(candidate);
            }
        }
        None
    }

    fn is_unreachable_emulator_alias(&self, candidate: &Candidate) -> bool {
        let discovery = &self.config.discovery;
        if !discovery.browser_debug {
            return false;
        }
        candidate
            .host()
            .is_some_and(|host| discovery.emulator_hosts.iter().any(|h| *h == host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::net::Ipv4Addr;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::discovery::StaticNetwork;
    use crate::probe::{ProbeResult, Strategy};

    /// Answers from a script; anything unscripted is unreachable.
    #[derive(Default)]
    struct ScriptedProber {
        ping_ok: Vec<String>,
        health_ok: Vec<String>,
        ping_delay: HashMap<String, Duration>,
        calls: Mutex<Vec<(Strategy, String)>>,
    }

    impl ScriptedProber {
        fn pinging(urls: &[&str]) -> Self {
            Self {
                ping_ok: urls.iter().map(|u| u.to_string()).collect(),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<(Strategy, String)> {
            self.calls.lock().unwrap().clone()
        }

        fn answer(&self, strategy: Strategy, candidate: &Candidate, ok: &[String]) -> ProbeResult {
            self.calls
                .lock()
                .unwrap()
                .push((strategy, candidate.to_string()));
            if ok.iter().any(|u| u == candidate.as_str()) {
                Ok(Reachable { strategy, status: 200 })
            } else {
                Err(ProbeError::NetworkUnreachable {
                    url: candidate.to_string(),
                    reason: "connection refused".to_string(),
                })
            }
        }
    }

    impl Prober for ScriptedProber {
        async fn ping(&self, candidate: &Candidate) -> ProbeResult {
            if let Some(delay) = self.ping_delay.get(candidate.as_str()) {
                tokio::time::sleep(*delay).await;
            }
            self.answer(Strategy::Ping, candidate, &self.ping_ok)
        }

        async fn health_check(&self, candidate: &Candidate) -> ProbeResult {
            self.answer(Strategy::Health, candidate, &self.health_ok)
        }
    }

    fn config() -> ResolverConfig {
        let mut config = ResolverConfig::default();
        config.deployed_url = "https://api.example.com/api".to_string();
        config.server.host = "192.168.1.20".to_string();
        config
    }

    fn resolver(prober: ScriptedProber) -> Resolver<ScriptedProber, StaticNetwork> {
        Resolver::new(
            config(),
            Arc::new(ConnectionLedger::new()),
            prober,
            StaticNetwork::connected(Some(Ipv4Addr::new(192, 168, 1, 37))),
        )
    }

    fn c(url: &str) -> Candidate {
        Candidate::new(url)
    }

    #[tokio::test]
    async fn test_cached_url_uses_single_ping() {
        let resolver = resolver(ScriptedProber::pinging(&["http://10.0.0.9/api"]));
        resolver.ledger().record_success(&c("http://10.0.0.9/api"));

        let resolution = resolver.resolve(ResolveOptions::default()).await;

        assert!(resolution.is_online());
        assert_eq!(resolution.url, Some(c("http://10.0.0.9/api")));
        assert_eq!(
            resolver.prober.calls(),
            vec![(Strategy::Ping, "http://10.0.0.9/api".to_string())]
        );
        assert_eq!(resolver.ledger().successes(&c("http://10.0.0.9/api")), 2);
    }

    #[tokio::test]
    async fn test_failed_cache_falls_through_and_is_kept_until_replaced() {
        let resolver = resolver(ScriptedProber::pinging(&["http://192.168.1.20:5000/api"]));
        resolver.ledger().record_success(&c("http://10.0.0.9/api"));

        let resolution = resolver.resolve(ResolveOptions::default()).await;

        assert_eq!(resolution.url, Some(c("http://192.168.1.20:5000/api")));
        assert_eq!(
            resolver.prober.calls(),
            vec![
                (Strategy::Ping, "http://10.0.0.9/api".to_string()),
                (Strategy::Health, "http://10.0.0.9/api".to_string()),
                (Strategy::Ping, "https://api.example.com/api".to_string()),
                (Strategy::Health, "https://api.example.com/api".to_string()),
                (Strategy::Ping, "http://192.168.1.20:5000/api".to_string()),
            ]
        );
        assert_eq!(
            resolver.ledger().working_url(),
            Some(c("http://192.168.1.20:5000/api"))
        );
    }

    #[tokio::test]
    async fn test_health_check_rescues_failed_ping() {
        let prober = ScriptedProber {
            health_ok: vec!["https://api.example.com/api".to_string()],
            ..Default::default()
        };
        let resolver = resolver(prober);

        let resolution = resolver.resolve(ResolveOptions::default()).await;
        assert_eq!(resolution.url, Some(c("https://api.example.com/api")));
        assert_eq!(resolver.ledger().successes(&c("https://api.example.com/api")), 1);
    }

    #[tokio::test]
    async fn test_prioritized_order_is_followed() {
        let resolver = resolver(ScriptedProber::default());
        let a = c("http://a/api");
        let b = c("http://b/api");
        for _ in 0..2 {
            resolver.ledger().record_success(&b);
        }
        resolver.ledger().clear_working_url();

        let resolution = resolver.check_server_connection(&[a.clone(), b.clone()], false).await;
        assert!(!resolution.is_online());

        let pinged: Vec<String> = resolver
            .prober
            .calls()
            .into_iter()
            .filter(|(s, _)| *s == Strategy::Ping)
            .map(|(_, u)| u)
            .collect();
        assert_eq!(pinged, vec![b.to_string(), a.to_string()]);
    }

    #[tokio::test]
    async fn test_everything_fails_offline() {
        let resolver = resolver(ScriptedProber::default());
        resolver.ledger().record_success(&c("http://10.0.0.9/api"));

        let resolution = resolver.resolve(ResolveOptions { discover: true }).await;

        assert_eq!(resolution.status, crate::resolver::Status::Offline);
        assert!(resolution.needs_manual_entry());
        // cached + deployed + configured + 12 scanned addresses
        assert!(resolution.message.contains("15 address"));
        assert_eq!(resolver.ledger().working_url(), Some(c("http://10.0.0.9/api")));
    }

    #[tokio::test]
    async fn test_discovery_finds_scanned_server() {
        let resolver = resolver(ScriptedProber::pinging(&["http://192.168.1.101:5000/api"]));

        let without = resolver.resolve(ResolveOptions::default()).await;
        assert!(!without.is_online());

        let with = resolver.resolve(ResolveOptions { discover: true }).await;
        assert_eq!(with.url, Some(c("http://192.168.1.101:5000/api")));
        assert_eq!(
            resolver.ledger().working_url(),
            Some(c("http://192.168.1.101:5000/api"))
        );
    }

    #[tokio::test]
    async fn test_no_connectivity_skips_probes() {
        let resolver = Resolver::new(
            config(),
            Arc::new(ConnectionLedger::new()),
            ScriptedProber::default(),
            StaticNetwork::disconnected(),
        );

        let resolution = resolver.resolve(ResolveOptions { discover: true }).await;
        assert_eq!(resolution.offline_reason, Some(OfflineReason::NoConnectivity));
        assert!(!resolution.needs_manual_entry());
        assert!(resolver.prober.calls().is_empty());
    }

    #[tokio::test]
    async fn test_emulator_alias_skipped_in_browser_debug() {
        let mut config = config();
        config.discovery.browser_debug = true;
        let resolver = Resolver::new(
            config,
            Arc::new(ConnectionLedger::new()),
            ScriptedProber::pinging(&["http://10.0.2.2:5000/api"]),
            StaticNetwork::connected(None),
        );

        let resolution = resolver
            .check_server_connection(&[c("http://10.0.2.2:5000/api")], false)
            .await;
        assert!(!resolution.is_online());
        assert!(resolver.prober.calls().is_empty());
    }

    #[tokio::test]
    async fn test_scan_without_device_ip() {
        let resolver = Resolver::new(
            config(),
            Arc::new(ConnectionLedger::new()),
            ScriptedProber::default(),
            StaticNetwork::connected(None),
        );
        let resolution = resolver.scan_network_for_server().await;
        assert!(!resolution.is_online());
        assert!(resolution.needs_manual_entry());
        assert!(resolver.prober.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_scan_reports_scanned_count() {
        let resolver = resolver(ScriptedProber::default());

        let resolution = resolver.scan_network_for_server().await;

        assert!(resolution.needs_manual_entry());
        // default octets x the configured port
        assert!(resolution.message.contains("after trying 12 address"));
        let pinged = resolver
            .prober
            .calls()
            .iter()
            .filter(|(s, _)| *s == Strategy::Ping)
            .count();
        assert_eq!(pinged, 12);
    }

    #[tokio::test]
    async fn test_scan_adopts_found_server() {
        let resolver = resolver(ScriptedProber::pinging(&["http://192.168.1.254:5000/api"]));

        let resolution = resolver.scan_network_for_server().await;

        assert_eq!(resolution.url, Some(c("http://192.168.1.254:5000/api")));
        assert_eq!(
            resolver.ledger().working_url(),
            Some(c("http://192.168.1.254:5000/api"))
        );
    }

    #[tokio::test]
    async fn test_manual_address() {
        let resolver = resolver(ScriptedProber::pinging(&["http://10.1.1.5:5000/api"]));

        let ok = resolver.try_manual_address("10.1.1.5").await;
        assert_eq!(ok.url, Some(c("http://10.1.1.5:5000/api")));
        assert_eq!(resolver.ledger().working_url(), Some(c("http://10.1.1.5:5000/api")));

        let invalid = resolver.try_manual_address("not a host").await;
        assert_eq!(invalid.offline_reason, Some(OfflineReason::InvalidAddress));

        let unreachable = resolver.try_manual_address("10.1.1.6").await;
        assert!(unreachable.needs_manual_entry());
    }

    #[tokio::test]
    async fn test_resolve_until_cancelled() {
        let mut prober = ScriptedProber::default();
        prober
            .ping_delay
            .insert("https://api.example.com/api".to_string(), Duration::from_secs(30));
        let resolver = resolver(prober);
        let cancel = Cancellation::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let resolution = tokio::time::timeout(
            Duration::from_secs(5),
            resolver.resolve_until(ResolveOptions::default(), &cancel),
        )
        .await
        .expect("cancellation should stop the resolution");

        assert_eq!(resolution.offline_reason, Some(OfflineReason::Cancelled));
        assert!(resolver.ledger().stats().is_empty());
    }

    #[tokio::test]
    async fn test_ping_server_does_not_record() {
        let resolver = resolver(ScriptedProber::pinging(&["http://10.0.0.9/api"]));
        assert!(resolver.ping_server(&c("http://10.0.0.9/api")).await);
        assert!(!resolver.ping_server(&c("http://10.0.0.8/api")).await);
        assert!(resolver.ledger().stats().is_empty());
    }
}
