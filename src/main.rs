// src/main.rs
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

mod config;
mod health;
mod metrics;
mod server;

use crate::{
    health::{HealthProber, PostgresCheck},
    metrics::MetricsRegistry,
    server::{RequestHandler, ServerBuilder},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rust_demo_api=debug".parse()?)
                .add_directive("hyper=info".parse()?),
        )
        .init();

    // Load configuration
    let config = config::load_config()?;
    info!(
        host = %config.db_host,
        database = %config.postgres_db,
        "Loaded database configuration"
    );

    // Initialize metrics
    let metrics_registry = Arc::new(MetricsRegistry::new()?);
    let metrics = metrics_registry.collector();
    metrics.set_app_info(env!("CARGO_PKG_VERSION"));

    // Report healthy until the first probe runs
    metrics.set_health(true);

    // Wire the database prober
    let check = Arc::new(PostgresCheck::new(&config));
    let prober = Arc::new(HealthProber::new(
        check,
        config.connect_timeout(),
        metrics.clone(),
    ));

    // Create request handler
    let handler = RequestHandler::new(prober, metrics_registry.clone());

    // Start main server
    let addr: SocketAddr = "0.0.0.0:5000".parse()?;
    info!("Starting API server on {}", addr);

    tokio::select! {
        result = ServerBuilder::new(addr).with_handler(handler).serve() => result?,
        _ = shutdown_signal() => {}
    }

    Ok(())
}

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
