//! Track Curator: drops tracks that cannot become cards and reports duplicates.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::models::{Track, TrackSet};

/// Result of curation. Counts are diagnostics only.
#[derive(Debug, Clone)]
pub struct Curation {
    pub tracks: TrackSet,
    pub invalid_count: usize,
    pub duplicate_count: usize,
}

/// Removes invalid tracks and counts duplicate identifiers.
///
/// Duplicates are kept: each one still gets a card. Surviving tracks keep
/// their input order.
pub fn curate(tracks: Vec<Track>) -> Curation {
    let total = tracks.len();
    let valid: Vec<Track> = tracks.into_iter().filter(Track::is_valid).collect();
    let invalid_count = total - valid.len();

    if invalid_count > 0 {
        warn!(
            invalid = invalid_count,
            valid = valid.len(),
            "Filtered out invalid tracks"
        );
    }

    let unique: HashSet<&str> = valid.iter().map(|t| t.identifier.as_str()).collect();
    let duplicate_count = valid.len() - unique.len();

    if duplicate_count > 0 {
        warn!(
            duplicates = duplicate_count,
            total = valid.len(),
            unique = unique.len(),
            "Found duplicate tracks"
        );
    }

    for track in valid.iter().take(5) {
        info!(
            name = %track.name,
            artists = %track.joined_artists(),
            uri = %track.identifier,
            "Curated track"
        );
    }

    Curation {
        tracks: TrackSet::from(valid),
        invalid_count,
        duplicate_count,
    }
}
