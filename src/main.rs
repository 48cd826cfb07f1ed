//! Dynamic HTTP Forwarding Proxy
//!
//! One endpoint, any method, any path: the destination URL rides in a query
//! parameter, the proxy re-issues the request against it and relays the
//! response — method, headers, and streamed body preserved in both
//! directions.
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │               FORWARDING PROXY               │
//!     Client Request      │  ┌──────────┐   ┌──────────┐   ┌───────────┐ │
//!     ────────────────────┼─▶│   http   │──▶│  proxy   │──▶│  proxy    │─┼──▶ Target
//!      ?url=https://...   │  │  server  │   │  target  │   │ forwarder │ │    (any host)
//!                         │  └──────────┘   └──────────┘   └─────┬─────┘ │
//!     Client Response     │                                      │       │
//!     ◀───────────────────┼── status / headers / streamed body ◀─┘       │
//!                         │                                              │
//!                         │  cross-cutting: config, CORS, request IDs,   │
//!                         │  access logs, timeouts, graceful shutdown    │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use forward_proxy::config::load_config;
use forward_proxy::lifecycle::{wait_for_signal, Shutdown};
use forward_proxy::observability::logging;
use forward_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "forward-proxy")]
#[command(about = "Dynamic HTTP forwarding proxy", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted;
    /// PORT, PROXY_TARGET_PARAM, and PROXY_LISTEN override either way.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    logging::init(&config.observability.log_level);

    tracing::info!("forward-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        target_param = %config.forwarder.target_param,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    if config.forwarder.insecure_skip_verify {
        tracing::warn!("TLS certificate verification for upstream targets is DISABLED");
    }

    // Some deployments only mount the handler behind another host process
    // and never open a port of their own.
    if !config.listener.enabled {
        tracing::warn!("Listener disabled by configuration; exiting without serving");
        return Ok(());
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(&config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
