use serde::{Deserialize, Serialize};

/// A playlist track reduced to what a printed card needs.
///
/// `identifier` is the upstream URI: it is the scan payload and the duplicate key.
/// A `release_year` of 0 means the year is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub release_year: i32,
    pub artist_names: Vec<String>,
    pub identifier: String,
}

impl Track {
    pub fn new(
        name: impl Into<String>,
        release_year: i32,
        artist_names: Vec<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            release_year,
            artist_names,
            identifier: identifier.into(),
        }
    }

    /// A track without a printable name or a scan payload cannot become a card.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.identifier.trim().is_empty()
    }

    pub fn joined_artists(&self) -> String {
        self.artist_names.join(", ")
    }
}

/// One page of tracks as returned by a single upstream request.
#[derive(Debug, Clone, Default)]
pub struct TrackBatch {
    pub tracks: Vec<Track>,
    /// The `limit` that was asked for.
    pub requested: u32,
}

impl TrackBatch {
    /// A short batch is the only end-of-playlist signal.
    pub fn is_last(&self) -> bool {
        (self.tracks.len() as u32) < self.requested
    }
}

/// One page of a playlist in the shape served by the processed endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistInfo {
    pub playlist_name: String,
    pub playlist_description: String,
    pub total_tracks: u32,
    pub tracks: Vec<Track>,
}

/// Curated tracks in first-seen order, ready for layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackSet(Vec<Track>);

impl TrackSet {
    pub fn as_slice(&self) -> &[Track] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Track>> for TrackSet {
    fn from(tracks: Vec<Track>) -> Self {
        Self(tracks)
    }
}
