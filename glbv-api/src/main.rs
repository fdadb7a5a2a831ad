//! glbv-api - Scene and metadata Query Service
//!
//! Serves pre-computed GLB scenes, frame thumbnails and pose videos from the
//! serving directories, and reads/patches per-video `metadata.yaml` files
//! under the data root.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glbv_api::{build_router, AppState, ServingPaths};
use glbv_common::config::ToolkitConfig;
use tokio::signal;
use tracing::info;

/// Command-line arguments for glbv-api
#[derive(Parser, Debug)]
#[command(name = "glbv-api")]
#[command(about = "Scene and metadata API for the GLB visualizer")]
#[command(version)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long, env = "GLBV_CONFIG")]
    config: Option<PathBuf>,

    /// Root of the <week>/<author>/<video> asset tree
    #[arg(long, env = "GLBV_DATA_ROOT")]
    data_root: Option<PathBuf>,

    /// Directory holding scenes/, frames/ and poses/
    #[arg(long, env = "GLBV_SERVING_ROOT")]
    serving_root: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "GLBV_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log = glbv_common::logging::init();

    let mut config =
        ToolkitConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(data_root) = args.data_root {
        config.data_root = data_root;
    }
    if let Some(serving_root) = args.serving_root {
        config.serving_root = serving_root;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    log.apply_level(&config.logging.level);

    info!(
        "Starting glbv-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let paths = ServingPaths::from_config(&config);
    for dir in [&paths.scenes_dir, &paths.frames_dir, &paths.poses_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create serving directory {}", dir.display()))?;
    }
    info!("Data root: {}", paths.data_root.display());
    info!("Serving root: {}", config.serving_root.display());

    let state = AppState::new(paths, config.server.cors_origins.clone());
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("glbv-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
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
