//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::{StatusCode, Uri};
use axum::Router;
use tokio::net::TcpListener;

use endpoint_resolver::discovery::StaticNetwork;
use endpoint_resolver::{Candidate, ConnectionLedger, HttpProber, Resolver, ResolverConfig};

/// Start a backend whose response depends on the request path.
///
/// Binds an ephemeral loopback port and returns its address.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let f = Arc::new(f);
    let app = Router::new().fallback(move |uri: Uri| {
        let f = f.clone();
        async move {
            let (status, body) = f(uri.path().to_string()).await;
            (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                body,
            )
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// A well-behaved API server: `/ping` → "PONG", `/health` → 200.
///
/// Returns the address and a counter of requests received.
#[allow(dead_code)]
pub async fn start_healthy_backend() -> (SocketAddr, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let addr = start_programmable_backend(move |path| {
        counter.fetch_add(1, Ordering::SeqCst);
        async move {
            match path.as_str() {
                "/ping" => (200, "PONG".to_string()),
                "/health" => (200, r#"{"status":"ok"}"#.to_string()),
                _ => (404, "Not Found".to_string()),
            }
        }
    })
    .await;
    (addr, hits)
}

/// A port with nothing listening on it.
#[allow(dead_code)]
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// API candidate for a loopback backend.
pub fn candidate(addr: SocketAddr) -> Candidate {
    Candidate::new(format!("http://{}/api", addr))
}

/// Defaults with short probe deadlines and nothing reachable configured.
pub fn test_config() -> ResolverConfig {
    let mut config = ResolverConfig::default();
    config.deployed_url = String::new();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = closed_port();
    config.probe.ping_timeout_ms = 200;
    config.probe.health_timeout_ms = 500;
    config
}

/// Resolver using the real HTTP prober and fixed network facts.
pub fn resolver(
    config: ResolverConfig,
    network: StaticNetwork,
) -> Resolver<HttpProber, StaticNetwork> {
    let prober = HttpProber::new(&config).unwrap();
    Resolver::new(config, Arc::new(ConnectionLedger::new()), prober, network)
}

/// Upper bound used by tests that must not hang.
#[allow(dead_code)]
pub const TEST_DEADLINE: Duration = Duration::from_secs(10);
