//! JSON-described HTTP relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌───────────────────────────────────────────────────────┐
//!                       │                     HTTP RELAY                        │
//!                       │                                                       │
//!   POST /proxy         │  ┌──────────┐   ┌────────────┐   ┌────────────┐       │
//!   ────────────────────┼─▶│  http    │──▶│ descriptor │──▶│  dispatch  │       │
//!                       │  │  server  │   │  validate  │   │  handlers  │       │
//!                       │  └──────────┘   └────────────┘   └─────┬──────┘       │
//!                       │                                        │              │
//!                       │                                        ▼              │
//!   Response            │  ┌──────────┐                    ┌────────────┐       │
//!   ◀───────────────────┼──│  relay   │◀───────────────────│   client   │◀──────┼── Origin
//!                       │  └──────────┘                    └────────────┘       │
//!                       │                                                       │
//!                       │  config · observability · lifecycle                   │
//!                       └───────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use http_relay::config::{default_search_paths, load_config, load_layered};
use http_relay::observability::{logging, metrics};
use http_relay::{HttpServer, ReqwestClient, Shutdown};

#[derive(Parser)]
#[command(name = "http-relay", version)]
#[command(about = "Relay HTTP calls described by JSON documents", long_about = None)]
struct Cli {
    /// Interface to bind; overrides listener.bind_address
    #[arg(requires = "port")]
    host: Option<String>,

    /// Port to bind
    port: Option<u16>,

    /// Load only this configuration file instead of the proxy.toml search path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => load_layered(&default_search_paths())?,
    };
    if let (Some(host), Some(port)) = (&cli.host, cli.port) {
        config.listener.set_host_port(host, port);
    }

    logging::init_logging(&config.observability.log_level);

    tracing::info!("http-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        schema = ?config.relay.schema,
        default_timeout_secs = config.relay.default_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let client = ReqwestClient::new(&config.client)?;
    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config, client);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
