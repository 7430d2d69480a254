//! pdfdesk server - Main entry point

use anyhow::Result;
use pdfdesk_common::logging::{init_logging, LogConfig};
use std::{net::SocketAddr, time::Duration};
use tokio::signal;
use tracing::info;

use pdfdesk_server::{
    api,
    catalog::Catalog,
    config::Config,
    storage::{self, config::StorageConfig},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment variables take precedence over these defaults
    let log_config = LogConfig::default()
        .with_prefix("pdfdesk-server")
        .with_filter("pdfdesk_server=debug,tower_http=debug")
        .merge_env()?;

    let _log_guard = init_logging(&log_config)?;

    info!("Starting pdfdesk server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let storage_config = StorageConfig::from_env()?;
    info!(backend = ?storage_config.backend, bucket = %storage_config.bucket, "Initializing storage");
    let store = storage::init(storage_config).await?;

    let catalog = Catalog::new(
        store,
        config.catalog.metadata_mode,
        config.catalog.prefix.clone(),
    );
    info!(
        prefix = %catalog.prefix(),
        mode = %catalog.mode(),
        "Catalog ready"
    );

    let app = api::create_router(catalog, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    info!("Server shut down gracefully");

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }

    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
