use anyhow::{ensure, Context, Result};

use crate::export::fetcher::DEFAULT_PAGE_SIZE;
use crate::layout::sheet::{DEFAULT_ROW_WIDTH, DEFAULT_TILES_PER_PAGE};
use crate::layout::SheetConfig;
use crate::render::grid_fits_page;
use crate::spotify::{DEFAULT_API_BASE_URL, DEFAULT_AUTH_URL};

const DEFAULT_TOKEN_REFRESH_MINUTES: u64 = 45;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub spotify_api_base_url: String,
    pub spotify_auth_url: String,
    /// Tracks requested per upstream page, 1..=100.
    pub fetch_page_size: u32,
    pub sheet: SheetConfig,
    pub token_refresh_minutes: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let fetch_page_size: u32 = parse_env("FETCH_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        ensure!(
            (1..=100).contains(&fetch_page_size),
            "FETCH_PAGE_SIZE must be between 1 and 100, got {fetch_page_size}"
        );

        let cards_per_page: usize = parse_env("CARDS_PER_PAGE", DEFAULT_TILES_PER_PAGE)?;
        let sheet = SheetConfig::new(DEFAULT_ROW_WIDTH, cards_per_page)
            .context("CARDS_PER_PAGE is not a valid grid")?;
        ensure!(
            grid_fits_page(&sheet),
            "CARDS_PER_PAGE={cards_per_page} does not fit on an A4 page"
        );

        let token_refresh_minutes: u64 =
            parse_env("TOKEN_REFRESH_MINUTES", DEFAULT_TOKEN_REFRESH_MINUTES)?;
        ensure!(
            token_refresh_minutes > 0,
            "TOKEN_REFRESH_MINUTES must be positive"
        );

        Ok(Config {
            spotify_client_id: require_env("SPOTIFY_CLIENT_ID")?,
            spotify_client_secret: require_env("SPOTIFY_CLIENT_SECRET")?,
            spotify_api_base_url: std::env::var("SPOTIFY_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            spotify_auth_url: std::env::var("SPOTIFY_AUTH_URL")
                .unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string()),
            fetch_page_size,
            sheet,
            token_refresh_minutes,
            port: parse_env("PORT", 8080u16).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
