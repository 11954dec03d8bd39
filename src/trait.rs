use crate::types::{AudioFeatures, PlaylistPage, TrackEntryPage};
use crate::Result;
use async_trait::async_trait;

/// Trait for the slice of the streaming service's API that dataset
/// collection needs, abstracted so it can be mocked for testing.
///
/// The surface mirrors the service's paging model: each listing operation
/// returns one page carrying an opaque `next` link, and the `next_*`
/// methods follow such a link to the following page. Feature lookup is a
/// plain batch call with no pagination.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides
/// `MockSpotifyClient` that implements this trait using the `mockall`
/// library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait SpotifyClient {
    /// Fetch the first page of a playlist's track listing.
    async fn user_playlist_tracks(
        &self,
        owner_id: &str,
        playlist_id: &str,
    ) -> Result<TrackEntryPage>;

    /// Follow a track-listing pagination link from [`TrackEntryPage::next`].
    async fn next_track_page(&self, next_url: &str) -> Result<TrackEntryPage>;

    /// Look up audio features for one batch of track ids.
    ///
    /// The response is positionally aligned with `ids`; entries are `None`
    /// where the service has no feature vector for the corresponding id.
    /// The endpoint caps batches at 50 ids; batching is the caller's job.
    async fn audio_features(&self, ids: &[String]) -> Result<Vec<Option<AudioFeatures>>>;

    /// Fetch the first page of the playlists owned by or visible to a user.
    async fn user_playlists(&self, user_id: &str) -> Result<PlaylistPage>;

    /// Follow a playlist-listing pagination link from [`PlaylistPage::next`].
    async fn next_playlist_page(&self, next_url: &str) -> Result<PlaylistPage>;
}
