//! Command-line front end for the endpoint resolver.
//!
//! ```text
//! endpoint-resolver [--config FILE] [--json] <COMMAND>
//!
//!   resolve [--discover]       full resolution
//!   candidates                 prioritized candidate list
//!   ping <URL>                 both probe strategies against one URL
//!   scan                       local subnet only
//!   manual <ADDRESS>           probe a user-supplied address
//!   watch [--interval-secs N]  re-resolve until Ctrl-C
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;

use endpoint_resolver::config::{load_config, ResolverConfig};
use endpoint_resolver::lifecycle::signals::cancel_on_ctrl_c;
use endpoint_resolver::observability::{logging, metrics};
use endpoint_resolver::{
    Candidate, Cancellation, ConnectionLedger, Prober, Resolution, ResolveOptions, Resolver, Status,
};

#[derive(Parser)]
#[command(name = "endpoint-resolver")]
#[command(about = "Find a reachable API server across unreliable networks", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full resolver
    Resolve {
        /// Scan the local subnet when every candidate fails
        #[arg(long)]
        discover: bool,
    },
    /// Print the prioritized candidate list
    Candidates,
    /// Probe a single candidate with both strategies
    Ping { url: String },
    /// Scan the local subnet for a server
    Scan,
    /// Try a manually entered server address
    Manual { address: String },
    /// Re-resolve periodically until interrupted
    Watch {
        #[arg(long, default_value_t = 30)]
        interval_secs: u64,
        #[arg(long)]
        discover: bool,
    },
}

#[derive(Serialize)]
struct ProbeReport {
    url: String,
    ping: Result<u16, String>,
    health: Result<u16, String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ResolverConfig::default(),
    };

    logging::init_logging(&config.observability);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let ledger = Arc::new(ConnectionLedger::new());
    let resolver = Resolver::from_config(config, ledger)?;

    let cancel = Cancellation::new();
    cancel_on_ctrl_c(cancel.clone());

    let online = match cli.command {
        Commands::Resolve { discover } => {
            let resolution = resolver
                .resolve_until(ResolveOptions { discover }, &cancel)
                .await;
            print_resolution(&resolution, cli.json)?;
            resolution.is_online()
        }
        Commands::Candidates => {
            let candidates = resolver.candidates();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&candidates)?);
            } else {
                for candidate in &candidates {
                    println!("{}", candidate);
                }
            }
            true
        }
        Commands::Ping { url } => {
            let candidate = Candidate::new(url);
            let report = ProbeReport {
                url: candidate.to_string(),
                ping: resolver
                    .prober()
                    .ping(&candidate)
                    .await
                    .map(|r| r.status)
                    .map_err(|e| e.to_string()),
                health: resolver
                    .prober()
                    .health_check(&candidate)
                    .await
                    .map(|r| r.status)
                    .map_err(|e| e.to_string()),
            };
            print_report(&report, cli.json)?;
            report.ping.is_ok() || report.health.is_ok()
        }
        Commands::Scan => {
            let resolution = tokio::select! {
                resolution = resolver.scan_network_for_server() => resolution,
                _ = cancel.cancelled() => Resolution::cancelled(),
            };
            print_resolution(&resolution, cli.json)?;
            resolution.is_online()
        }
        Commands::Manual { address } => {
            let resolution = resolver.try_manual_address(&address).await;
            print_resolution(&resolution, cli.json)?;
            resolution.is_online()
        }
        Commands::Watch {
            interval_secs,
            discover,
        } => watch(&resolver, &cancel, Duration::from_secs(interval_secs.max(1)), discover).await,
    };

    Ok(if online { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Re-resolve on a fixed interval, logging status transitions.
async fn watch(resolver: &Resolver, cancel: &Cancellation, interval: Duration, discover: bool) -> bool {
    let mut ticker = tokio::time::interval(interval);
    let mut last: Option<Status> = None;

    tracing::info!(interval_secs = interval.as_secs(), "Watching server reachability");

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = cancel.cancelled() => break,
        }

        let resolution = resolver.resolve_until(ResolveOptions { discover }, cancel).await;
        if cancel.is_cancelled() {
            break;
        }
        if last != Some(resolution.status) {
            tracing::info!(
                from = ?last,
                to = resolution.status.as_str(),
                url = ?resolution.url.as_ref().map(Candidate::as_str),
                "Reachability changed"
            );
            last = Some(resolution.status);
        }
    }

    last == Some(Status::Online)
}

fn print_resolution(resolution: &Resolution, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(resolution)?);
        return Ok(());
    }

    match &resolution.url {
        Some(url) => println!("{} {}", resolution.status.as_str(), url),
        None => println!("{}", resolution.status.as_str()),
    }
    println!("{}", resolution.message);
    if resolution.needs_manual_entry() {
        println!("Hint: run `endpoint-resolver manual <ADDRESS>` to try a specific server.");
    }
    Ok(())
}

fn print_report(report: &ProbeReport, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("{}", report.url);
    for (name, result) in [("ping", &report.ping), ("health", &report.health)] {
        match result {
            Ok(status) => println!("  {:<6} ok ({})", name, status),
            Err(e) => println!("  {:<6} failed: {}", name, e),
        }
    }
    Ok(())
}
