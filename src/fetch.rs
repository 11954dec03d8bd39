//! Paginated retrieval of a playlist's full track listing.

use crate::iterator::{AsyncPaginatedIterator, PlaylistTracksIterator};
use crate::r#trait::SpotifyClient;
use crate::types::TrackEntry;
use crate::Result;

/// The full track listing of one playlist, in service order.
///
/// `ids` is the positional projection of `entries`: `ids[i]` is
/// `entries[i].id`. Feature collection relies on that correlation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistTracks {
    /// Track ids, in listing order
    pub ids: Vec<String>,
    /// Track entries, in listing order
    pub entries: Vec<TrackEntry>,
    /// Playlist items dropped because they carry no service-side track
    /// object (removed or locally uploaded tracks)
    pub skipped: usize,
}

impl PlaylistTracks {
    /// Number of usable track entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the playlist yielded no usable entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fetch every track entry of a playlist, following pagination to the end.
///
/// Entries arrive in page order and keep their within-page order. Items
/// without an underlying track are skipped and counted in
/// [`PlaylistTracks::skipped`] instead of failing the fetch.
pub async fn fetch_playlist_tracks<C: SpotifyClient>(
    client: &C,
    owner_id: &str,
    playlist_id: &str,
) -> Result<PlaylistTracks> {
    let mut iterator = PlaylistTracksIterator::new(client, owner_id, playlist_id);
    let mut tracks = PlaylistTracks::default();

    while let Some(item) = iterator.next().await? {
        match item.track {
            Some(entry) => {
                tracks.ids.push(entry.id.clone());
                tracks.entries.push(entry);
            }
            None => tracks.skipped += 1,
        }
    }

    if tracks.skipped > 0 {
        log::warn!(
            "Skipped {} entries without a track object in playlist {playlist_id}",
            tracks.skipped
        );
    }

    Ok(tracks)
}
