pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod report;
pub mod routes;
pub mod summarize;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::fmt;

use crate::{
    cli::Cli,
    config::AppConfig,
    routes::{AppState, router},
};

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let max = match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // stdout is gagged while PDFs are parsed, so logs go to stderr.
    fmt()
        .with_max_level(max)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let config = AppConfig::from_env();
    if config.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; /upload-pdf will answer 500 until it is configured");
    }
    info!(?config, "loaded configuration");

    let app = router(Arc::new(AppState::new(config)));

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
