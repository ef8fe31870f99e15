mod config;
mod errors;
mod export;
mod layout;
mod models;
mod render;
mod routes;
mod scan;
mod spotify;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::fetcher::TrackFetcher;
use crate::export::SheetExporter;
use crate::routes::build_router;
use crate::scan::QrScanEncoder;
use crate::spotify::token::{ClientCredentialsIssuer, SpotifyTokenService};
use crate::spotify::{SpotifyClient, LIST_TIMEOUT};
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

    info!("Starting cardsheet API v{}", env!("CARGO_PKG_VERSION"));

    let http = reqwest::Client::builder()
        .user_agent(concat!("cardsheet/", env!("CARGO_PKG_VERSION")))
        .build()?;

    // Access tokens: cached, refreshed in the background
    let issuer = Arc::new(ClientCredentialsIssuer::new(
        http.clone(),
        config.spotify_auth_url.clone(),
        config.spotify_client_id.clone(),
        config.spotify_client_secret.clone(),
    ));
    let tokens = Arc::new(SpotifyTokenService::new(issuer));
    let refresh_period = Duration::from_secs(config.token_refresh_minutes * 60);
    tokens.clone().spawn_refresh_task(refresh_period);
    info!(
        "Token refresh scheduled every {} minutes",
        config.token_refresh_minutes
    );

    let spotify = Arc::new(SpotifyClient::new(
        http,
        config.spotify_api_base_url.clone(),
        tokens,
    ));
    info!("Spotify client initialized ({})", config.spotify_api_base_url);

    let fetcher = TrackFetcher::new(spotify.clone(), config.fetch_page_size, LIST_TIMEOUT);
    let exporter = Arc::new(SheetExporter::new(
        fetcher,
        config.sheet,
        Arc::new(QrScanEncoder),
    ));
    info!(
        "Sheet layout: {} cards per page, {} per row; fetch page size {}",
        config.sheet.tiles_per_page(),
        config.sheet.row_width(),
        config.fetch_page_size
    );

    // Build app state
    let state = AppState { spotify, exporter };

    // Build router
    // TODO: restrict CORS origins once the frontend host is fixed
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
