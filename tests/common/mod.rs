use async_trait::async_trait;
use spotify_taste::{
    AudioFeatures, PlaylistItem, PlaylistPage, PlaylistSummary, Result, SpotifyClient, TrackEntry,
    TrackEntryPage,
};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory service backend for integration tests: a paginated playlist
/// listing, per-playlist paginated track listings, and one feature vector
/// per track id. Pagination links use a `stub://` scheme that encodes the
/// page index.
pub struct StubSpotifyClient {
    playlist_pages: Vec<PlaylistPage>,
    track_pages: HashMap<String, Vec<TrackEntryPage>>,
    features: HashMap<String, AudioFeatures>,
    /// Sizes of the feature batches requested, in call order.
    pub feature_batches: RefCell<Vec<usize>>,
}

impl StubSpotifyClient {
    pub fn new(playlist_pages: Vec<PlaylistPage>) -> Self {
        Self {
            playlist_pages,
            track_pages: HashMap::new(),
            features: HashMap::new(),
            feature_batches: RefCell::new(Vec::new()),
        }
    }

    pub fn with_tracks(mut self, playlist_id: &str, pages: Vec<TrackEntryPage>) -> Self {
        self.track_pages.insert(playlist_id.to_string(), pages);
        self
    }

    pub fn with_features(mut self, track_id: &str, features: AudioFeatures) -> Self {
        self.features.insert(track_id.to_string(), features);
        self
    }
}

fn page_index(next_url: &str) -> usize {
    next_url.rsplit('/').next().unwrap().parse().unwrap()
}

#[async_trait(?Send)]
impl SpotifyClient for StubSpotifyClient {
    async fn user_playlist_tracks(
        &self,
        _owner_id: &str,
        playlist_id: &str,
    ) -> Result<TrackEntryPage> {
        Ok(self.track_pages[playlist_id][0].clone())
    }

    async fn next_track_page(&self, next_url: &str) -> Result<TrackEntryPage> {
        let mut parts = next_url.rsplit('/');
        let index: usize = parts.next().unwrap().parse().unwrap();
        let playlist_id = parts.next().unwrap();
        Ok(self.track_pages[playlist_id][index].clone())
    }

    async fn audio_features(&self, ids: &[String]) -> Result<Vec<Option<AudioFeatures>>> {
        self.feature_batches.borrow_mut().push(ids.len());
        Ok(ids.iter().map(|id| self.features.get(id).cloned()).collect())
    }

    async fn user_playlists(&self, _user_id: &str) -> Result<PlaylistPage> {
        Ok(self.playlist_pages[0].clone())
    }

    async fn next_playlist_page(&self, next_url: &str) -> Result<PlaylistPage> {
        Ok(self.playlist_pages[page_index(next_url)].clone())
    }
}

pub fn playlist(id: &str, name: &str, owner_id: &str) -> PlaylistSummary {
    PlaylistSummary {
        id: id.to_string(),
        name: name.to_string(),
        owner_id: owner_id.to_string(),
    }
}

pub fn track_item(id: &str, explicit: bool) -> PlaylistItem {
    PlaylistItem {
        track: Some(TrackEntry {
            id: id.to_string(),
            name: format!("track {id}"),
            duration_ms: 200_000,
            popularity: 50,
            explicit,
        }),
        added_at: None,
    }
}

pub fn trackless_item() -> PlaylistItem {
    PlaylistItem {
        track: None,
        added_at: None,
    }
}

/// Feature vector whose tempo encodes `seed`, so positional alignment is
/// visible in assembled rows.
pub fn features(seed: f64) -> AudioFeatures {
    AudioFeatures {
        energy: 0.7,
        liveness: 0.15,
        tempo: seed,
        speechiness: 0.05,
        acousticness: 0.1,
        instrumentalness: 0.0,
        time_signature: 4,
        danceability: 0.65,
        key: 3,
        duration_ms: 200_100,
        loudness: -5.0,
        valence: 0.55,
        mode: 1,
    }
}
