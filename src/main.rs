//! Singing coach API boundary.
//!
//! # Architecture Overview
//!
//! ```text
//!     PRODUCTION ──▶ DeploymentMode ──▶ OriginAllowList ──┐
//!                                                         ▼
//!     Client ──▶ request id ──▶ trace ──▶ metrics ──▶ CORS ──▶ timeout/limit
//!                                                                  │
//!                                          ┌───────────────────────┼──────────────┐
//!                                          ▼                       ▼              ▼
//!                                     /songs/* group         /user/* group    404 JSON
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use idol_coach_api::config::{resolve_config, DeploymentMode};
use idol_coach_api::lifecycle::signals::spawn_signal_listener;
use idol_coach_api::observability::{logging, metrics};
use idol_coach_api::{Boundary, HttpServer, RouteGroups, Shutdown, StartupError};

#[derive(Parser)]
#[command(name = "idol-coach-api")]
#[command(about = "HTTP boundary for the singing coach backend", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "COACH_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address
    #[arg(short, long)]
    bind: Option<String>,

    /// Validate configuration, print the selected origins and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Pick up deployment variables (PRODUCTION, COACH_CONFIG, ...) from .env
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_deref(), cli.bind.as_deref())
        .map_err(StartupError::from)?;

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "idol-coach-api starting");
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    let mode = DeploymentMode::from_env();

    // The song and user modules supply their handler collections here.
    let boundary = Boundary::configure(mode, &config, RouteGroups::default())?;

    if cli.check {
        println!("mode: {}", boundary.mode());
        for origin in boundary.allow_list().as_slice() {
            println!("origin: {}", origin);
        }
        for (prefix, tag) in boundary.routes().entries() {
            println!("route: {} ({})", prefix, tag);
        }
        return Ok(());
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.limits.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation guarantees the address parses when metrics are enabled.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr)?;
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_listener(shutdown);

    let server = HttpServer::new(config, boundary);
    server
        .run(listener, server_shutdown)
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("Shutdown complete");
    Ok(())
}
