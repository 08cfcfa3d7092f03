//! Movie Match HTTP server.
//!
//! Loads the similarity model once, then serves recommendations until
//! interrupted. A model that fails to load aborts startup.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use data_loader::{SimilarityIndex, SimilarityStore};
use server::{AppState, ServerConfig, build_app};

/// Largest tolerated |s(i,j) - s(j,i)| before the symmetry check warns
const SYMMETRY_TOLERANCE: f32 = 1e-4;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,engine=debug")),
        )
        .init();

    let config = ServerConfig::parse();
    info!("Starting Movie Match server with {:?}", config);

    // Parsing a large matrix is CPU-bound
    let model_dir = config.model_dir.clone();
    let index = tokio::task::spawn_blocking(move || SimilarityIndex::load_from_files(&model_dir))
        .await
        .context("Model loading task panicked")?
        .with_context(|| {
            format!(
                "Failed to load similarity model from {}",
                config.model_dir.display()
            )
        })?;
    info!("Loaded similarity model with {} movies", index.len());

    if config.check_symmetry {
        index.check_symmetry(SYMMETRY_TOLERANCE);
    }

    let state = AppState::new(Arc::new(index), config.engine_config(), config.max_limit);
    let app = build_app(state, &config.cors_origins);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Movie Match listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
