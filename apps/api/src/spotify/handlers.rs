use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::PlaylistInfo;
use crate::spotify::mapper::to_playlist_info;
use crate::spotify::models::Playlist;
use crate::state::AppState;

const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_limit() -> u32 {
    20
}

impl PageQuery {
    fn validate(&self) -> Result<(), AppError> {
        if !(1..=MAX_PAGE_LIMIT).contains(&self.limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_LIMIT}, got {}",
                self.limit
            )));
        }
        Ok(())
    }
}

/// Spotify ids are base-62 strings; anything else would be spliced into the upstream path.
pub fn validate_playlist_id(playlist_id: &str) -> Result<(), AppError> {
    if playlist_id.is_empty() || !playlist_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::Validation(format!(
            "invalid playlist id '{playlist_id}'"
        )));
    }
    Ok(())
}

/// GET /api/v1/playlist/:id
pub async fn handle_get_playlist(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
) -> Result<Json<Playlist>, AppError> {
    validate_playlist_id(&playlist_id)?;
    let playlist = state.spotify.get_playlist(&playlist_id).await?;
    Ok(Json(playlist))
}

/// GET /api/v1/playlist/:id/tracks
pub async fn handle_get_tracks(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Value>, AppError> {
    validate_playlist_id(&playlist_id)?;
    page.validate()?;
    let raw = state
        .spotify
        .get_track_page_raw(&playlist_id, page.limit, page.offset)
        .await?;
    Ok(Json(raw))
}

/// GET /api/v1/playlist/:id/processed
pub async fn handle_get_processed(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
    Query(page): Query<PageQuery>,
) -> Result<Json<PlaylistInfo>, AppError> {
    validate_playlist_id(&playlist_id)?;
    page.validate()?;
    let playlist = state.spotify.get_playlist(&playlist_id).await?;
    let tracks = state
        .spotify
        .get_tracks_page(&playlist_id, page.limit, page.offset)
        .await?;
    Ok(Json(to_playlist_info(&playlist, &tracks)))
}
