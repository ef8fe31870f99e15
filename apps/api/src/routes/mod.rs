pub mod health;

use axum::{routing::get, Router};

use crate::export::handlers::handle_export_pdf;
use crate::spotify::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Playlist API
        .route("/api/v1/playlist/:id", get(handlers::handle_get_playlist))
        .route(
            "/api/v1/playlist/:id/tracks",
            get(handlers::handle_get_tracks),
        )
        .route(
            "/api/v1/playlist/:id/processed",
            get(handlers::handle_get_processed),
        )
        // Card sheet export
        .route("/api/v1/playlist/:id/pdf", get(handle_export_pdf))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::export::fetcher::TrackFetcher;
    use crate::export::SheetExporter;
    use crate::layout::SheetConfig;
    use crate::scan::QrScanEncoder;
    use crate::spotify::SpotifyClient;
    use crate::test_support::{spawn_fake_upstream, StaticToken, FAKE_TOKEN};

    async fn app_with_tracks(total: usize) -> Router {
        let upstream = spawn_fake_upstream(total).await;
        let spotify = Arc::new(SpotifyClient::new(
            reqwest::Client::new(),
            upstream,
            Arc::new(StaticToken(FAKE_TOKEN)),
        ));
        let fetcher = TrackFetcher::new(spotify.clone(), 50, Duration::from_secs(60));
        let exporter = Arc::new(SheetExporter::new(
            fetcher,
            SheetConfig::default(),
            Arc::new(QrScanEncoder),
        ));
        build_router(AppState { spotify, exporter })
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    fn json(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, _, body) = get(app_with_tracks(0).await, "/health").await;
        assert_eq!(status, StatusCode::OK);
        let body = json(&body);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "cardsheet-api");
    }

    #[tokio::test]
    async fn test_playlist_metadata() {
        let (status, _, body) = get(app_with_tracks(3).await, "/api/v1/playlist/abc123").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["name"], "Fake Hits");
    }

    #[tokio::test]
    async fn test_raw_tracks_page_passes_through() {
        let (status, _, body) = get(
            app_with_tracks(30).await,
            "/api/v1/playlist/abc123/tracks?limit=5&offset=10",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body = json(&body);
        assert_eq!(body["items"].as_array().unwrap().len(), 5);
        assert_eq!(body["offset"], 10);
        assert_eq!(body["items"][0]["track"]["name"], "Song 10");
    }

    #[tokio::test]
    async fn test_processed_page() {
        let app = app_with_tracks(30).await;
        let (status, _, body) = get(app, "/api/v1/playlist/abc123/processed").await;
        assert_eq!(status, StatusCode::OK);
        let body = json(&body);
        assert_eq!(body["playlist_name"], "Fake Hits");
        assert_eq!(body["tracks"].as_array().unwrap().len(), 20);
        assert_eq!(body["tracks"][0]["identifier"], "spotify:track:0");
    }

    #[tokio::test]
    async fn test_invalid_limit_rejected() {
        let (status, _, body) = get(
            app_with_tracks(3).await,
            "/api/v1/playlist/abc123/tracks?limit=500",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_playlist_id_rejected() {
        let (status, _, _) = get(app_with_tracks(3).await, "/api/v1/playlist/abc-123/pdf").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_playlist_is_not_found() {
        let (status, _, body) = get(app_with_tracks(3).await, "/api/v1/playlist/missing/pdf").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json(&body)["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_pdf_export() {
        let app = app_with_tracks(45).await;
        let (status, headers, body) = get(app, "/api/v1/playlist/abc123/pdf").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"playlist_abc123.pdf\""
        );
        let doc = lopdf::Document::load_mem(&body).unwrap();
        // 45 tracks at 20 per page: 3 groups, front and back each.
        assert_eq!(doc.get_pages().len(), 6);
    }
}
