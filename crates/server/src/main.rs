//! Expense Server - category prediction service
//!
//! Loads the fitted pipeline once at startup and answers
//! `POST /predict-category` until interrupted.

use anyhow::{Context, Result};
use classifier_lib::{artifact, TextClassifier};
use expense_server::{api, config::ServerConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!(version = SERVER_VERSION, "Starting expense-server");

    let config = ServerConfig::load().context("Failed to load server configuration")?;

    // A missing or unreadable artifact is fatal: the service never starts without a model
    let pipeline = artifact::load(&config.artifact_path).with_context(|| {
        format!("Failed to load model artifact {}", config.artifact_path.display())
    })?;
    info!(classes = ?pipeline.classes(), "Model ready");

    let classifier: Arc<dyn TextClassifier> = Arc::new(pipeline);
    let app_state = Arc::new(api::AppState::new(classifier));

    api::serve(&config.bind_addr(), app_state, shutdown_signal()).await?;

    info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("SIGINT received");
}
