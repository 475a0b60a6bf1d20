//! pooltest-hook - webhook receiver for water test measurements
//!
//! Resolves the storage location, opens the backend once, then serves
//! `/webhook`, `/readings` (listing backends only) and `/health`.

use anyhow::{Context, Result};
use clap::Parser;
use pooltest_common::open_store;
use pooltest_hook::{build_router, config::Args, AppState};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pooltest_hook=info,pooltest_common=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting pooltest-hook v{} at {}",
        env!("CARGO_PKG_VERSION"),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let args = Args::parse();

    // Invalid storage configuration is fatal
    let settings = match args.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };
    info!(
        backend = %settings.storage.backend,
        path = %settings.storage.path.display(),
        "Storage configured"
    );

    let store = open_store(&settings.storage)
        .await
        .context("Failed to initialize storage")?;

    let app = build_router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(settings.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", settings.bind))?;
    info!("Webhook server listening on http://{}", settings.bind);
    info!("Health check: http://{}/health", settings.bind);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server failed")?;

    info!("pooltest-hook stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
