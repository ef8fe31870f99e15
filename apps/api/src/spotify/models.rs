//! Typed subset of the Spotify Web API payloads the service reads.
//!
//! Every field the mapper does not need is left out; `serde` ignores unknown keys.
//! Optional fields are `Option`/`default` because playlist items routinely carry
//! nulls (local files, removed tracks, podcast episodes with no album).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub tracks: Option<PlaylistTracksPage>,
}

/// `GET /playlists/{id}/tracks` paging object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistTracksPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub added_at: Option<String>,
    #[serde(default)]
    pub is_local: bool,
    #[serde(default)]
    pub track: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyTrack {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub album: Option<Album>,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub release_date_precision: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

/// Response of the client-credentials token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Error envelope returned by the Web API on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct SpotifyErrorEnvelope {
    pub error: SpotifyErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpotifyErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_with_null_track_deserializes() {
        let json = r#"{
            "items": [
                {"added_at": "2024-01-01T00:00:00Z", "is_local": false, "track": null},
                {"track": {"name": "Song", "uri": "spotify:track:1", "artists": [{"name": "A"}],
                           "album": {"release_date": "1999-05-01"}}}
            ],
            "total": 2, "limit": 50, "offset": 0, "next": null
        }"#;
        let page: PlaylistTracksPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.items[0].track.is_none());
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_token_defaults_token_type() {
        let token: AccessToken =
            serde_json::from_str(r#"{"access_token": "abc", "expires_in": 3600}"#).unwrap();
        assert_eq!(token.token_type, "Bearer");
    }
}
