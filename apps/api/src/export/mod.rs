//! Playlist export pipeline: fetch → curate → layout → render.

pub mod curator;
pub mod fetcher;
pub mod handlers;

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::layout::{build_sheet, SheetConfig};
use crate::render::{render_sheet, RenderError};
use crate::scan::ScanEncoder;
use crate::spotify::UpstreamError;
use curator::curate;
use fetcher::TrackFetcher;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("export task failed: {0}")]
    Internal(String),
}

/// A finished card sheet and the diagnostics gathered while building it.
#[derive(Debug, Clone)]
pub struct ExportedSheet {
    pub export_id: Uuid,
    pub bytes: Vec<u8>,
    pub track_count: usize,
    pub page_count: usize,
    pub invalid_count: usize,
    pub duplicate_count: usize,
    pub encoding_failures: usize,
}

#[derive(Clone)]
pub struct SheetExporter {
    fetcher: TrackFetcher,
    sheet_config: SheetConfig,
    encoder: Arc<dyn ScanEncoder>,
}

impl SheetExporter {
    pub fn new(
        fetcher: TrackFetcher,
        sheet_config: SheetConfig,
        encoder: Arc<dyn ScanEncoder>,
    ) -> Self {
        Self {
            fetcher,
            sheet_config,
            encoder,
        }
    }

    /// Builds the card sheet PDF for a playlist.
    ///
    /// Either the whole playlist is fetched and rendered, or an error is
    /// returned; a partial fetch never reaches the renderer.
    pub async fn export_sheet(&self, playlist_id: &str) -> Result<ExportedSheet, ExportError> {
        let export_id = Uuid::new_v4();
        let span = tracing::info_span!("export_sheet", %export_id, playlist_id);
        self.run(export_id, playlist_id).instrument(span).await
    }

    async fn run(&self, export_id: Uuid, playlist_id: &str) -> Result<ExportedSheet, ExportError> {
        info!("Starting export");
        let tracks = self.fetcher.fetch_all_tracks(playlist_id).await?;
        let curation = curate(tracks);
        let track_count = curation.tracks.len();

        // Layout and PDF writing are CPU-bound; keep them off the async executor.
        let config = self.sheet_config;
        let encoder = Arc::clone(&self.encoder);
        let track_set = curation.tracks;
        let span = tracing::Span::current();
        let rendered = tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            let sheet = build_sheet(&track_set, config);
            render_sheet(&sheet, encoder.as_ref())
        })
        .await
        .map_err(|e| ExportError::Internal(format!("spawn_blocking failed in render: {e}")))??;

        info!(
            tracks = track_count,
            pages = rendered.page_count,
            invalid = curation.invalid_count,
            duplicates = curation.duplicate_count,
            encoding_failures = rendered.encoding_failures,
            "Export finished"
        );

        Ok(ExportedSheet {
            export_id,
            bytes: rendered.bytes,
            track_count,
            page_count: rendered.page_count,
            invalid_count: curation.invalid_count,
            duplicate_count: curation.duplicate_count,
            encoding_failures: rendered.encoding_failures,
        })
    }
}
