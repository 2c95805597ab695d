//! zsh configuration service.
//!
//! A small local HTTP service backing a browser front end that edits the
//! user's shell configuration.
//!
//! # Architecture Overview
//!
//! ```text
//! Browser ──▶ http (axum router, CORS, request IDs)
//!                 ├─▶ /api/*  ──▶ store (durable slot writes under ~)
//!                 └─▶ /*      ──▶ static front-end bundle
//!
//! Cross-cutting: config (TOML) · observability (tracing, metrics)
//!                lifecycle (graceful shutdown)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use zshcfg_server::config::{load_config, ServerConfig};
use zshcfg_server::http::HttpServer;
use zshcfg_server::lifecycle::Shutdown;
use zshcfg_server::observability::{init_logging, metrics};

#[derive(Parser)]
#[command(name = "zshcfg-server")]
#[command(about = "Local HTTP service for managing zsh configuration", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        assets_dir = %config.assets.dir,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let signals = shutdown.clone();
    tokio::spawn(async move { signals.on_ctrl_c().await });

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
