//! Wire format of the service's JSON responses.
//!
//! The structs here mirror the paging objects the Web API returns; the
//! `parse_*` functions turn raw response bodies into the typed pages the
//! rest of the crate works with.

use crate::types::{
    AudioFeatures, PlaylistItem, PlaylistPage, PlaylistSummary, TrackEntry, TrackEntryPage,
};
use crate::{Result, SpotifyError};
use chrono::{DateTime, Utc};
use serde::Deserialize;

// =============================================================================
// Playlist track listing
// =============================================================================

#[derive(Deserialize)]
pub struct ApiTrackPage {
    pub items: Vec<ApiPlaylistItem>,
    pub next: Option<String>,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub total: u32,
}

#[derive(Deserialize)]
pub struct ApiPlaylistItem {
    pub track: Option<ApiTrack>,
    pub added_at: Option<String>,
}

#[derive(Deserialize)]
pub struct ApiTrack {
    /// `null` for locally uploaded files
    pub id: Option<String>,
    pub name: String,
    pub duration_ms: u32,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub explicit: bool,
}

pub fn parse_track_page(json: &str) -> Result<TrackEntryPage> {
    let response: ApiTrackPage =
        serde_json::from_str(json).map_err(|e| SpotifyError::Parse(e.to_string()))?;

    let items = response
        .items
        .into_iter()
        .map(|item| {
            let added_at = item
                .added_at
                .as_deref()
                .and_then(|raw| raw.parse::<DateTime<Utc>>().ok());
            // A missing track object and a track object without an id (a
            // local file) both mean there is nothing to look features up
            // for; both collapse to `track: None`.
            let track = item.track.and_then(|track| {
                let id = track.id?;
                Some(TrackEntry {
                    id,
                    name: track.name,
                    duration_ms: track.duration_ms,
                    popularity: track.popularity,
                    explicit: track.explicit,
                })
            });
            PlaylistItem { track, added_at }
        })
        .collect();

    Ok(TrackEntryPage {
        items,
        next: response.next,
        offset: response.offset,
        total: response.total,
    })
}

// =============================================================================
// Audio features
// =============================================================================

#[derive(Deserialize)]
pub struct ApiAudioFeaturesResponse {
    pub audio_features: Vec<Option<ApiAudioFeatures>>,
}

#[derive(Deserialize)]
pub struct ApiAudioFeatures {
    pub energy: f64,
    pub liveness: f64,
    pub tempo: f64,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub time_signature: i32,
    pub danceability: f64,
    pub key: i32,
    pub duration_ms: u32,
    pub loudness: f64,
    pub valence: f64,
    pub mode: i32,
}

impl From<ApiAudioFeatures> for AudioFeatures {
    fn from(api: ApiAudioFeatures) -> Self {
        Self {
            energy: api.energy,
            liveness: api.liveness,
            tempo: api.tempo,
            speechiness: api.speechiness,
            acousticness: api.acousticness,
            instrumentalness: api.instrumentalness,
            time_signature: api.time_signature,
            danceability: api.danceability,
            key: api.key,
            duration_ms: api.duration_ms,
            loudness: api.loudness,
            valence: api.valence,
            mode: api.mode,
        }
    }
}

/// Parse a feature-batch response, keeping `null` entries visible.
pub fn parse_audio_features(json: &str) -> Result<Vec<Option<AudioFeatures>>> {
    let response: ApiAudioFeaturesResponse =
        serde_json::from_str(json).map_err(|e| SpotifyError::Parse(e.to_string()))?;

    Ok(response
        .audio_features
        .into_iter()
        .map(|features| features.map(AudioFeatures::from))
        .collect())
}

// =============================================================================
// Playlist listing
// =============================================================================

#[derive(Deserialize)]
pub struct ApiPlaylistPage {
    pub items: Vec<ApiPlaylist>,
    pub next: Option<String>,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub total: u32,
}

#[derive(Deserialize)]
pub struct ApiPlaylist {
    pub id: String,
    pub name: String,
    pub owner: ApiOwner,
}

#[derive(Deserialize)]
pub struct ApiOwner {
    pub uri: String,
}

/// Extract the owner id from a `spotify:user:<id>` style URI.
pub fn owner_id_from_uri(uri: &str) -> Result<&str> {
    uri.splitn(4, ':')
        .nth(2)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| SpotifyError::Parse(format!("malformed owner URI: {uri}")))
}

pub fn parse_playlist_page(json: &str) -> Result<PlaylistPage> {
    let response: ApiPlaylistPage =
        serde_json::from_str(json).map_err(|e| SpotifyError::Parse(e.to_string()))?;

    let mut items = Vec::with_capacity(response.items.len());
    for playlist in response.items {
        let owner_id = owner_id_from_uri(&playlist.owner.uri)?.to_string();
        items.push(PlaylistSummary {
            id: playlist.id,
            name: playlist.name,
            owner_id,
        });
    }

    Ok(PlaylistPage {
        items,
        next: response.next,
        offset: response.offset,
        total: response.total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_track_page() {
        let json = r##"{
            "items": [
                {
                    "added_at": "2023-02-11T09:30:00Z",
                    "track": {
                        "id": "3n3Ppam7vgaVa1iaRUc9Lp",
                        "name": "Mr. Brightside",
                        "duration_ms": 222075,
                        "popularity": 77,
                        "explicit": false
                    }
                },
                {
                    "added_at": "2023-02-12T18:00:00Z",
                    "track": null
                },
                {
                    "added_at": null,
                    "track": {
                        "id": null,
                        "name": "basement demo.mp3",
                        "duration_ms": 184000
                    }
                }
            ],
            "next": "https://api.spotify.com/v1/users/alice/playlists/pl1/tracks?offset=100&limit=100",
            "offset": 0,
            "total": 140
        }"##;

        let page = parse_track_page(json).unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 140);
        assert_eq!(page.offset, 0);
        assert!(page.next.is_some());

        let first = page.items[0].track.as_ref().unwrap();
        assert_eq!(first.id, "3n3Ppam7vgaVa1iaRUc9Lp");
        assert_eq!(first.duration_ms, 222_075);
        assert_eq!(first.popularity, 77);
        assert!(!first.explicit);
        assert!(page.items[0].added_at.is_some());

        // Removed track and local file both surface as track-less items.
        assert!(page.items[1].track.is_none());
        assert!(page.items[2].track.is_none());
        assert!(page.items[2].added_at.is_none());
    }

    #[test]
    fn test_parse_track_page_last_page() {
        let json = r##"{
            "items": [],
            "next": null,
            "offset": 100,
            "total": 100
        }"##;

        let page = parse_track_page(json).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next.is_none());
        assert_eq!(page.offset, 100);
    }

    #[test]
    fn test_parse_audio_features_keeps_nulls_visible() {
        let json = r##"{
            "audio_features": [
                {
                    "energy": 0.842,
                    "liveness": 0.159,
                    "tempo": 118.211,
                    "speechiness": 0.0556,
                    "acousticness": 0.00146,
                    "instrumentalness": 0.0,
                    "time_signature": 4,
                    "danceability": 0.735,
                    "key": 1,
                    "duration_ms": 222075,
                    "loudness": -5.883,
                    "valence": 0.624,
                    "mode": 1
                },
                null
            ]
        }"##;

        let features = parse_audio_features(json).unwrap();
        assert_eq!(features.len(), 2);

        let first = features[0].as_ref().unwrap();
        assert_eq!(first.tempo, 118.211);
        assert_eq!(first.key, 1);
        assert_eq!(first.mode, 1);
        assert!(features[1].is_none());
    }

    #[test]
    fn test_parse_playlist_page() {
        let json = r##"{
            "items": [
                {
                    "id": "pl1",
                    "name": "morning runs",
                    "owner": {"uri": "spotify:user:alice"}
                },
                {
                    "id": "pl2",
                    "name": "study beats",
                    "owner": {"uri": "spotify:user:bob"}
                }
            ],
            "next": null,
            "offset": 0,
            "total": 2
        }"##;

        let page = parse_playlist_page(json).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].name, "morning runs");
        assert_eq!(page.items[0].owner_id, "alice");
        assert_eq!(page.items[1].owner_id, "bob");
        assert!(page.next.is_none());
    }

    #[test]
    fn test_owner_id_from_uri() {
        assert_eq!(owner_id_from_uri("spotify:user:alice").unwrap(), "alice");
        // Extra components belong to the id's tail and are ignored.
        assert_eq!(owner_id_from_uri("spotify:user:alice:extra").unwrap(), "alice");
        assert!(owner_id_from_uri("spotify:user").is_err());
        assert!(owner_id_from_uri("spotify:user:").is_err());
    }

    #[test]
    fn test_parse_playlist_page_rejects_malformed_owner() {
        let json = r##"{
            "items": [
                {
                    "id": "pl1",
                    "name": "broken",
                    "owner": {"uri": "not-a-uri"}
                }
            ],
            "next": null
        }"##;

        assert!(parse_playlist_page(json).is_err());
    }
}
