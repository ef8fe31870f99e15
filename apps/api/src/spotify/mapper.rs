//! Conversion from upstream payloads to domain types.
//!
//! Each domain field has one named extraction rule here; nothing is mapped implicitly.

use crate::models::{PlaylistInfo, Track};
use crate::spotify::models::{Playlist, PlaylistItem, PlaylistTracksPage, SpotifyTrack};

/// Maps one page of playlist items. Items without a track object are skipped.
pub fn page_to_tracks(page: &PlaylistTracksPage) -> Vec<Track> {
    page.items.iter().filter_map(playlist_item_to_track).collect()
}

pub fn playlist_item_to_track(item: &PlaylistItem) -> Option<Track> {
    item.track.as_ref().map(track_to_track)
}

/// name → `name` (missing becomes ""), album.release_date → `release_year`,
/// artists[].name → `artist_names` (upstream order, unnamed artists dropped),
/// uri → `identifier` (missing becomes "").
pub fn track_to_track(track: &SpotifyTrack) -> Track {
    let release_year = track
        .album
        .as_ref()
        .and_then(|a| a.release_date.as_deref())
        .map(extract_year)
        .unwrap_or(0);

    let artist_names = track
        .artists
        .iter()
        .filter_map(|a| a.name.clone())
        .filter(|n| !n.trim().is_empty())
        .collect();

    Track::new(
        track.name.clone().unwrap_or_default(),
        release_year,
        artist_names,
        track.uri.clone().unwrap_or_default(),
    )
}

/// The year is the first `-`-delimited component of a release date
/// (`"1999-05-01"`, `"1999-05"` and `"1999"` all give 1999). Anything
/// unparsable yields 0.
pub fn extract_year(release_date: &str) -> i32 {
    release_date
        .split('-')
        .next()
        .map(str::trim)
        .and_then(|y| y.parse::<i32>().ok())
        .unwrap_or(0)
}

/// Combines playlist metadata with one page of its tracks.
pub fn to_playlist_info(playlist: &Playlist, page: &PlaylistTracksPage) -> PlaylistInfo {
    PlaylistInfo {
        playlist_name: playlist.name.clone().unwrap_or_default(),
        playlist_description: playlist.description.clone().unwrap_or_default(),
        total_tracks: page.total,
        tracks: page_to_tracks(page),
    }
}
