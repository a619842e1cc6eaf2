//! hookline - Highlight Selection Microservice
//!
//! Standalone HTTP service wrapping the selection engine. Collaborator
//! endpoints (signal analysis, lyrics transcription) and the bind address
//! come from TOML config with ENV overrides.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hookline::config::Config;
use hookline::services::{LyricsClient, SignalClient};
use hookline::{build_router, AppState, SelectionEngine};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting hookline (highlight selection) service");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::var("HOOKLINE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("hookline.toml"));
    let config = Config::load(&config_path);
    info!("Signal analysis: {}", config.signal_service_url);
    info!("Lyrics transcription: {}", config.lyrics_service_url);

    let state = AppState::new(
        SelectionEngine::new(config.selection.clone()),
        Arc::new(SignalClient::new(config.signal_service_url.clone())),
        Arc::new(LyricsClient::new(config.lyrics_service_url.clone())),
    );

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Listening on http://{}", config.bind_address);
    info!("Health check: http://{}/health", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
