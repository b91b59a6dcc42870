//! HTTP prober backed by `reqwest`.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time;

use crate::candidate::Candidate;
use crate::config::{ProbeConfig, ResolverConfig};
use crate::probe::{ProbeError, ProbeResult, Prober, Reachable, Strategy};

/// Longest slice of an unexpected ping body kept in error details.
const BODY_PREVIEW_CHARS: usize = 64;

/// Probes candidates over HTTP with per-strategy deadlines.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
    config: ProbeConfig,
    api_path: String,
}

impl HttpProber {
    /// Build a prober from the resolver configuration.
    ///
    /// System proxies are bypassed: candidates are usually LAN addresses.
    pub fn new(config: &ResolverConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .no_proxy()
            .user_agent(concat!("endpoint-resolver/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config: config.probe.clone(),
            api_path: config.server.api_path.clone(),
        })
    }

    /// Issue a GET bounded by `timeout`, returning status and (optionally) body.
    ///
    /// On timeout the in-flight request future is dropped, which aborts it.
    async fn get(
        &self,
        url: &str,
        strategy: Strategy,
        timeout: Duration,
        read_body: bool,
    ) -> Result<(StatusCode, String), ProbeError> {
        let request = async {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            let body = if read_body {
                response.text().await?
            } else {
                String::new()
            };
            Ok::<_, reqwest::Error>((status, body))
        };

        match time::timeout(timeout, request).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) if e.is_timeout() => Err(ProbeError::Timeout {
                url: url.to_string(),
                strategy,
                timeout_ms: timeout.as_millis() as u64,
            }),
            Ok(Err(e)) => Err(ProbeError::NetworkUnreachable {
                url: url.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(ProbeError::Timeout {
                url: url.to_string(),
                strategy,
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }
}

impl Prober for HttpProber {
    async fn ping(&self, candidate: &Candidate) -> ProbeResult {
        let url = candidate.probe_url(&self.api_path, &self.config.ping_path);
        let timeout = Duration::from_millis(self.config.ping_timeout_ms);
        let (status, body) = self.get(&url, Strategy::Ping, timeout, true).await?;

        if status != StatusCode::OK {
            return Err(ProbeError::BadResponse {
                url,
                status: status.as_u16(),
                detail: "expected 200".to_string(),
            });
        }
        if body != self.config.ping_sentinel {
            let preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
            return Err(ProbeError::BadResponse {
                url,
                status: status.as_u16(),
                detail: format!("unexpected ping body {:?}", preview),
            });
        }

        Ok(Reachable {
            strategy: Strategy::Ping,
            status: status.as_u16(),
        })
    }

    async fn health_check(&self, candidate: &Candidate) -> ProbeResult {
        let url = candidate.probe_url(&self.api_path, &self.config.health_path);
        let timeout = Duration::from_millis(self.config.health_timeout_ms);
        let (status, _) = self.get(&url, Strategy::Health, timeout, false).await?;

        if status != StatusCode::OK {
            return Err(ProbeError::BadResponse {
                url,
                status: status.as_u16(),
                detail: "expected 200".to_string(),
            });
        }

        Ok(Reachable {
            strategy: Strategy::Health,
            status: status.as_u16(),
        })
    }
}
