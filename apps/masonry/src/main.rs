mod config;
mod errors;
mod grid;
mod layout;
mod models;
mod render;
mod resolver;
mod routes;
mod source;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::grid::{GridController, GridOptions};
use crate::render::{GridRenderer, HtmlRenderer};
use crate::resolver::{HeightCache, HeightResolver, HttpImageProbe};
use crate::routes::build_router;
use crate::source::UnsplashClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Masonry v{}", env!("CARGO_PKG_VERSION"));

    let source = UnsplashClient::new(
        config.unsplash_api_url.clone(),
        config.unsplash_access_key.clone(),
    )
    .context("Failed to build Unsplash HTTP client")?;
    info!("Photo source: {}", config.unsplash_api_url);

    // Page-lifetime height cache, shared by every resolution
    let probe = HttpImageProbe::new(Duration::from_secs(config.image_timeout_secs))
        .context("Failed to build image HTTP client")?;
    let resolver = HeightResolver::new(HeightCache::new(), Arc::new(probe));

    let renderer = Arc::new(HtmlRenderer::new());
    let paint: Arc<dyn GridRenderer> = renderer.clone();

    let mut controller = GridController::new(
        Arc::new(source),
        resolver,
        paint,
        GridOptions {
            batch_limit: config.batch_limit,
            query: config.photo_query.clone(),
            viewport_width: config.viewport_width,
        },
    );
    controller.start().await;
    info!(
        "Grid ready: {} posts in {} columns",
        controller.history().len(),
        controller.column_count()
    );

    let state = AppState {
        grid: Arc::new(Mutex::new(controller)),
        renderer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
