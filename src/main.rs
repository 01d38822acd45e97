// src/main.rs
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

mod config;
mod monitor;
mod probe;
mod server;
mod status;

use crate::{
    config::Config,
    monitor::HealthMonitor,
    probe::{CommandProbe, HttpProbe},
    server::{RequestHandler, ServerBuilder},
    status::StatusStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("health_sidecar=debug".parse()?)
                .add_directive("hyper=info".parse()?),
        )
        .init();

    // Configuration is optional; the defaults match the fixed deployment.
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            config::load_config(&path).await?
        }
        None => Config::default(),
    };
    config.validate()?;

    let store = Arc::new(StatusStore::new());

    let checks = &config.checks;
    let mongo = Arc::new(CommandProbe::new(
        "mongodb",
        &checks.mongo_command,
        "1",
        checks.timeout(),
    ));
    let redis = Arc::new(CommandProbe::new(
        "redis",
        &checks.redis_command,
        "PONG",
        checks.timeout(),
    ));
    let overleaf = Arc::new(HttpProbe::new(
        "overleaf",
        checks.app_status_url.clone(),
        checks.timeout(),
    ));

    // First cycle fires immediately, then every interval.
    let monitor = Arc::new(HealthMonitor::new(
        mongo,
        redis,
        overleaf,
        store.clone(),
        checks.interval(),
    ));
    tokio::spawn(monitor.clone().start());

    let addr: SocketAddr = ([0, 0, 0, 0], config.server.port).into();
    info!("Health check server running on port {}", config.server.port);
    info!("Available endpoints:");
    info!("  GET /health  - Orchestrator health gate");
    info!("  GET /status  - Detailed status information");
    info!("  GET /ping    - Simple ping endpoint");

    let handler = RequestHandler::new(store);

    tokio::select! {
        result = ServerBuilder::new(addr, handler).serve() => result?,
        _ = shutdown_signal() => {
            info!("Health check server shutting down...");
            monitor.shutdown();
        }
    }

    Ok(())
}

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
}
