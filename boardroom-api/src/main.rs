//! boardroom-api - portfolio review service
//!
//! Loads the last imported board report (or the built-in sample) and serves
//! it, with derived metrics, as JSON.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use boardroom_common::config::{default_config_path, load_toml_config, resolve_root_folder};
use boardroom_common::store::FileStore;
use boardroom_api::{build_router, AppState};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "boardroom-api")]
#[command(about = "Portfolio review service for board-report CSVs")]
#[command(version)]
struct Args {
    /// HTTP port (overrides the config file)
    #[arg(short, long, env = "BOARDROOM_PORT")]
    port: Option<u16>,

    /// Folder holding the persisted dataset
    #[arg(short, long)]
    root_folder: Option<String>,

    /// TOML config file
    #[arg(short, long, env = "BOARDROOM_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = match args.config.clone() {
        Some(path) => path,
        None => default_config_path().context("Failed to locate config file")?,
    };
    let config = load_toml_config(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting boardroom-api v{}", env!("CARGO_PKG_VERSION"));
    info!("Config file: {}", config_path.display());

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), Some(&config));
    info!("Root folder: {}", root_folder.display());

    let store = FileStore::in_root_folder(&root_folder);
    let state = AppState::load(Arc::new(store)).context("Failed to load saved dataset")?;
    let app = build_router(state);

    let port = args.port.unwrap_or(config.port);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("boardroom-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
