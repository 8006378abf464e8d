//! npm Lookup - form handler forwarding package lookups to the npm registry

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;

use config::{Config, LoggingConfig};
use npm_lookup_api::{AppState, create_router};
use npm_lookup_core::RegistryLookupHandler;
use npm_lookup_proxy::{NpmClientConfig, NpmRegistryClient};

/// npm Lookup - forwards package lookups to the npm registry
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Bind address
    #[arg(long, env = "NPM_LOOKUP_BIND")]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "NPM_LOOKUP_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = Config::load(&args.config)?;
    let from_file = loaded.is_some();
    let config = loaded.unwrap_or_default();

    init_logging(&config.logging);

    info!("Starting npm Lookup v{}", env!("CARGO_PKG_VERSION"));

    if from_file {
        info!("Loaded configuration from {}", args.config);
    } else {
        info!("Config file not found at {}, using defaults", args.config);
    }

    let metrics_handle = if config.metrics.enabled {
        Some(Arc::new(PrometheusBuilder::new().install_recorder()?))
    } else {
        None
    };

    // Initialize upstream client
    let client = Arc::new(NpmRegistryClient::new(NpmClientConfig {
        user_agent: config.upstream.user_agent.clone(),
        timeout: config.upstream.timeout(),
    })?);

    if config.upstream.timeout().is_none() {
        warn!("Upstream timeout disabled, lookups may wait indefinitely");
    }

    let lookup = Arc::new(RegistryLookupHandler::with_registry_url(
        client,
        &config.upstream.url,
    )?);

    let state = AppState::new(lookup, config.response.shape);

    let app = create_router(state, metrics_handle).layer(TraceLayer::new_for_http());

    // Determine bind address
    let bind_addr = args.bind.unwrap_or(config.server.bind_address);
    let port = args.port.unwrap_or(config.server.port);
    let addr = socket_addr(&bind_addr, port)?;

    info!("Listening on {}", addr);
    info!("Upstream: {}", config.upstream.url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Combine a bind address (IPv4 or IPv6) and port
fn socket_addr(bind_addr: &str, port: u16) -> Result<SocketAddr> {
    let ip: IpAddr = bind_addr
        .trim_start_matches('[')
        .trim_end_matches(']')
        .parse()
        .with_context(|| format!("Invalid bind address: {}", bind_addr))?;

    Ok(SocketAddr::new(ip, port))
}

/// Initialize logging
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
