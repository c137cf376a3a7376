//! Local CORS relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                  CORS RELAY                  │
//!                         │                                              │
//!   Browser request       │  ┌────────┐   ┌──────────┐   ┌──────────┐   │
//!   ──────────────────────┼─▶│  http  │──▶│ dispatch │──▶│ routing  │   │
//!                         │  │ server │   │          │   │ resolver │   │
//!                         │  └────────┘   └──────────┘   └────┬─────┘   │
//!                         │                                   │         │
//!                         │                     ┌─────────────┴──────┐  │
//!                         │                     ▼                    ▼  │
//!                         │              ┌────────────┐     ┌─────────┐ │
//!   Response + CORS       │              │   relay    │     │ static  │ │
//!   ◀─────────────────────┼──────────────│  (reqwest) │     │  files  │ │
//!                         │              └─────┬──────┘     └─────────┘ │
//!                         └────────────────────┼────────────────────────┘
//!                                              ▼
//!                                      Marin GIS / Solar API
//! ```

use clap::Parser;
use tokio::net::TcpListener;

use cors_relay::cli::Cli;
use cors_relay::http::HttpServer;
use cors_relay::lifecycle::{wait_for_signal, Shutdown};
use cors_relay::observability::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        profile = ?cli.profile,
        config_file = ?cli.config,
        "cors-relay starting"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        let signal = wait_for_signal().await;
        tracing::info!(signal = ?signal, "Stop requested");
        shutdown.trigger();
    });

    server.run(listener, receiver).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
