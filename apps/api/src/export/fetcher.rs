//! Track Fetcher: walks an offset/limit paginated track list to the end.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::models::{Track, TrackBatch};
use crate::spotify::UpstreamError;

pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// One page of a playlist's tracks. `TrackBatch::requested` must echo `limit`.
#[async_trait]
pub trait TrackSource: Send + Sync {
    async fn get_track_page(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<TrackBatch, UpstreamError>;
}

#[derive(Clone)]
pub struct TrackFetcher {
    source: Arc<dyn TrackSource>,
    page_size: u32,
    page_timeout: Duration,
}

impl TrackFetcher {
    pub fn new(source: Arc<dyn TrackSource>, page_size: u32, page_timeout: Duration) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            page_timeout,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Requests pages at offsets `0, P, 2P, …` until one comes back with fewer
    /// than `P` tracks. A playlist whose length is a multiple of `P` therefore
    /// costs one extra, empty request.
    ///
    /// Any page failing or exceeding `page_timeout` fails the whole fetch; the
    /// tracks accumulated so far are dropped.
    pub async fn fetch_all_tracks(&self, playlist_id: &str) -> Result<Vec<Track>, UpstreamError> {
        let mut all_tracks: Vec<Track> = Vec::new();
        let mut offset = 0u32;
        let mut requests = 0u32;

        loop {
            let request = self
                .source
                .get_track_page(playlist_id, self.page_size, offset);
            let batch = tokio::time::timeout(self.page_timeout, request)
                .await
                .map_err(|_| {
                    warn!(playlist_id, offset, "Track page request timed out");
                    UpstreamError::Timeout(format!(
                        "track page at offset {offset} of playlist {playlist_id}"
                    ))
                })??;
            requests += 1;

            let invalid = batch.tracks.iter().filter(|t| !t.is_valid()).count();
            if invalid > 0 {
                warn!(offset, invalid, "Found invalid tracks in batch");
            }

            let is_last = batch.is_last();
            let fetched = batch.tracks.len();
            all_tracks.extend(batch.tracks);

            info!(
                offset,
                fetched,
                total = all_tracks.len(),
                "Fetched track page"
            );

            if is_last {
                break;
            }
            offset += self.page_size;
        }

        info!(
            playlist_id,
            total = all_tracks.len(),
            requests,
            "Reached end of playlist"
        );
        Ok(all_tracks)
    }
}
