use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::spotify::handlers::validate_playlist_id;
use crate::state::AppState;

/// GET /api/v1/playlist/:id/pdf
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    validate_playlist_id(&playlist_id)?;
    let sheet = state.exporter.export_sheet(&playlist_id).await?;
    info!(
        export_id = %sheet.export_id,
        tracks = sheet.track_count,
        pages = sheet.page_count,
        bytes = sheet.bytes.len(),
        "Serving card sheet"
    );

    let disposition = format!("attachment; filename=\"playlist_{playlist_id}.pdf\"");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(sheet.bytes),
    ))
}
