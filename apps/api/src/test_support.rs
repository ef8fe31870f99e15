//! In-process fakes shared by the unit tests.

use async_trait::async_trait;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::export::fetcher::TrackSource;
use crate::models::{Track, TrackBatch};
use crate::spotify::token::TokenProvider;
use crate::spotify::UpstreamError;

pub const FAKE_TOKEN: &str = "test-token";

pub struct StaticToken(pub &'static str);

#[async_trait]
impl TokenProvider for StaticToken {
    async fn get_token(&self) -> Result<String, UpstreamError> {
        Ok(self.0.to_string())
    }
}

pub fn sample_track(i: usize) -> Track {
    Track::new(
        format!("Song {i}"),
        1990 + i as i32,
        vec![format!("Artist {i}")],
        format!("spotify:track:{i}"),
    )
}

pub fn sample_tracks(n: usize) -> Vec<Track> {
    (0..n).map(sample_track).collect()
}

/// Pages through a fixed track list. A page at `hang_at` never completes.
pub struct InMemorySource {
    pub tracks: Vec<Track>,
    pub hang_at: Option<u32>,
}

impl InMemorySource {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            hang_at: None,
        }
    }
}

#[async_trait]
impl TrackSource for InMemorySource {
    async fn get_track_page(
        &self,
        _playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<TrackBatch, UpstreamError> {
        if self.hang_at == Some(offset) {
            std::future::pending::<()>().await;
        }
        let start = (offset as usize).min(self.tracks.len());
        let end = (start + limit as usize).min(self.tracks.len());
        Ok(TrackBatch {
            tracks: self.tracks[start..end].to_vec(),
            requested: limit,
        })
    }
}

#[derive(Clone)]
struct FakeUpstream {
    total: usize,
}

#[derive(Deserialize)]
struct PageParams {
    limit: Option<usize>,
    offset: Option<usize>,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = json!({ "error": { "status": status.as_u16(), "message": message } });
    (status, Json(body)).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {FAKE_TOKEN}"))
        .unwrap_or(false)
}

fn track_json(i: usize) -> Value {
    json!({
        "added_at": "2024-01-01T00:00:00Z",
        "is_local": false,
        "track": {
            "id": i.to_string(),
            "name": format!("Song {i}"),
            "uri": format!("spotify:track:{i}"),
            "artists": [{ "name": format!("Artist {i}") }],
            "album": { "name": "Album", "release_date": format!("{}-01-01", 1990 + i % 30) }
        }
    })
}

async fn fake_playlist(Path(id): Path<String>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid access token");
    }
    if id == "missing" {
        return error_response(StatusCode::NOT_FOUND, "Resource not found");
    }
    Json(json!({ "id": id, "name": "Fake Hits", "description": "Songs for tests" })).into_response()
}

async fn fake_tracks(
    State(upstream): State<FakeUpstream>,
    Path(id): Path<String>,
    Query(params): Query<PageParams>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid access token");
    }
    if id == "missing" {
        return error_response(StatusCode::NOT_FOUND, "Resource not found");
    }

    let limit = params.limit.unwrap_or(20);
    let offset = params.offset.unwrap_or(0);
    let start = offset.min(upstream.total);
    let end = (offset + limit).min(upstream.total);
    let items: Vec<Value> = (start..end).map(track_json).collect();

    Json(json!({
        "items": items,
        "total": upstream.total,
        "limit": limit,
        "offset": offset,
        "next": null
    }))
    .into_response()
}

/// Serves a playlist of `total` tracks on an ephemeral port. Returns the base URL.
pub async fn spawn_fake_upstream(total: usize) -> String {
    let app = Router::new()
        .route("/playlists/:id", get(fake_playlist))
        .route("/playlists/:id/tracks", get(fake_tracks))
        .with_state(FakeUpstream { total });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
