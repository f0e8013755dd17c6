//! Query server for reverse geocoding and the administrative catalog.
//!
//! Loads the atlas once at startup and serves it read-only over HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use locus::config::Config;
use locus::Atlas;

mod routes;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "Reverse geocoding and admin catalog server")]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(short, long)]
    listen: Option<String>,

    /// Data directory (overrides config)
    #[arg(short, long)]
    data: Option<PathBuf>,
}

/// Application state shared across handlers
pub struct AppState {
    pub atlas: Atlas,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }
    if let Some(data) = args.data {
        config.data.root = data;
    }

    info!("Locus Query Server");

    let atlas = Atlas::load(&config.data.root)
        .with_context(|| format!("Failed to load atlas from {}", config.data.root.display()))?;
    info!(
        "Atlas ready with {} admin1 boundaries",
        atlas.geocoder().index().len()
    );

    let state = Arc::new(AppState { atlas });

    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/v1/locate", get(routes::locate))
        .route("/v1/boundaries/{kind}/{code}", get(routes::boundary))
        .route("/v1/valid/{kind}/{code}", get(routes::is_valid))
        .route("/v1/continents", get(routes::continents))
        .route("/v1/continents/{code}", get(routes::continent))
        .route("/v1/continents/{code}/countries", get(routes::continent_countries))
        .route("/v1/countries", get(routes::countries))
        .route("/v1/countries/{code}", get(routes::country))
        .route("/v1/countries/{code}/regions", get(routes::country_regions))
        .route("/v1/countries/{code}/codes", get(routes::country_codes))
        .route("/v1/country-groupings", get(routes::country_groupings))
        .route("/v1/country-groupings/{code}", get(routes::country_grouping))
        .route(
            "/v1/country-groupings/{code}/countries",
            get(routes::country_grouping_countries),
        )
        .route("/v1/regions", get(routes::regions))
        .route("/v1/regions/{code}", get(routes::region))
        .route("/v1/regions/{code}/states", get(routes::region_states))
        .route("/v1/states/{code}", get(routes::state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
