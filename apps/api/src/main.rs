mod config;
mod editor;
mod errors;
mod export;
mod listing;
mod models;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::command::CommandRasterizer;
use crate::export::{ExportService, Rasterizer};
use crate::listing::seed::load_jobs;
use crate::listing::JobBoard;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Portal API v{}", env!("CARGO_PKG_VERSION"));

    // Load the job dataset (bundled seed unless JOBS_SEED_PATH is set)
    let jobs = load_jobs(config.jobs_seed_path.as_deref())?;
    let board = JobBoard::new(jobs);
    info!(
        "Job board ready: {} locations, refresh delay {:?}",
        board.locations().len(),
        config.refresh_delay
    );

    // Export pipeline: inert without an external rasterizer
    let rasterizer = build_rasterizer(&config);
    let exports = ExportService::new(rasterizer);
    info!(export_enabled = exports.is_available(), "Export pipeline configured");

    let state = AppState::new(config.clone(), board, exports);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the rasterizer from `RASTERIZER_COMMAND`, if configured.
fn build_rasterizer(config: &Config) -> Option<Arc<dyn Rasterizer>> {
    match config
        .rasterizer_command
        .as_deref()
        .and_then(CommandRasterizer::from_command_line)
    {
        Some(rasterizer) => {
            info!("CV export enabled via '{}'", rasterizer.program());
            Some(Arc::new(rasterizer))
        }
        None => {
            warn!("RASTERIZER_COMMAND not set; CV export requests will be skipped");
            None
        }
    }
}
