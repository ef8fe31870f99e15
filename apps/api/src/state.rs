use std::sync::Arc;

use crate::export::SheetExporter;
use crate::spotify::SpotifyClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub spotify: Arc<SpotifyClient>,
    /// Export pipeline wired to the same client, with the configured page size and grid.
    pub exporter: Arc<SheetExporter>,
}
