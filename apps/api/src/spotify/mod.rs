//! Spotify Web API client: the single point of entry for upstream calls.
//!
//! Every request carries a bearer token obtained from the injected `TokenProvider`;
//! this module never refreshes tokens itself.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::export::fetcher::TrackSource;
use crate::models::TrackBatch;
use crate::spotify::mapper::page_to_tracks;
use crate::spotify::models::{Playlist, PlaylistTracksPage, SpotifyErrorEnvelope};
use crate::spotify::token::TokenProvider;

pub mod handlers;
pub mod mapper;
pub mod models;
pub mod token;

pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/api/token";
/// Timeout for single-object requests (playlist metadata, tokens).
pub const OBJECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for list requests (track pages).
pub const LIST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream request timed out: {0}")]
    Timeout(String),

    #[error("Upstream API error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Token error: {0}")]
    Token(String),
}

impl UpstreamError {
    /// Splits reqwest timeouts out of the generic transport bucket.
    pub(crate) fn from_transport(err: reqwest::Error, what: &str) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout(what.to_string())
        } else {
            UpstreamError::Http(err)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::Status { status: 404, .. })
    }
}

/// Turns a non-2xx response into `UpstreamError::Status`, using the Spotify
/// error envelope's message when the body has one.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<SpotifyErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    Err(UpstreamError::Status {
        status: status.as_u16(),
        message,
    })
}

#[derive(Clone)]
pub struct SpotifyClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl SpotifyClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            tokens,
        }
    }

    async fn authorized_get(
        &self,
        path: &str,
        query: &[(&str, u32)],
        timeout: Duration,
    ) -> Result<String, UpstreamError> {
        let token = self.tokens.get_token().await?;
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .bearer_auth(token)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| UpstreamError::from_transport(e, &url))?;

        let response = ensure_success(response).await.map_err(|e| {
            error!("Upstream request to {url} failed: {e}");
            e
        })?;

        response
            .text()
            .await
            .map_err(|e| UpstreamError::from_transport(e, &url))
    }

    /// `GET /playlists/{id}`
    pub async fn get_playlist(&self, playlist_id: &str) -> Result<Playlist, UpstreamError> {
        info!(playlist_id, "Fetching playlist");
        let body = self
            .authorized_get(&format!("/playlists/{playlist_id}"), &[], OBJECT_TIMEOUT)
            .await?;
        let playlist: Playlist = serde_json::from_str(&body)?;
        debug!(
            playlist_id,
            name = playlist.name.as_deref().unwrap_or(""),
            "Fetched playlist"
        );
        Ok(playlist)
    }

    /// `GET /playlists/{id}/tracks`, body returned as-is.
    pub async fn get_track_page_raw(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<serde_json::Value, UpstreamError> {
        let body = self
            .authorized_get(
                &format!("/playlists/{playlist_id}/tracks"),
                &[("limit", limit), ("offset", offset)],
                LIST_TIMEOUT,
            )
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// `GET /playlists/{id}/tracks`, typed.
    pub async fn get_tracks_page(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<PlaylistTracksPage, UpstreamError> {
        let body = self
            .authorized_get(
                &format!("/playlists/{playlist_id}/tracks"),
                &[("limit", limit), ("offset", offset)],
                LIST_TIMEOUT,
            )
            .await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl TrackSource for SpotifyClient {
    async fn get_track_page(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<TrackBatch, UpstreamError> {
        let page = self.get_tracks_page(playlist_id, limit, offset).await?;
        Ok(TrackBatch {
            tracks: page_to_tracks(&page),
            requested: limit,
        })
    }
}
