pub mod api;
pub mod client;
pub mod dataset;
pub mod error;
pub mod features;
pub mod fetch;
pub mod iterator;
pub mod select;
pub mod r#trait;
pub mod types;

pub use client::SpotifyHttpClient;
pub use dataset::{assemble_dataset, TARGET_DISLIKE, TARGET_LIKE};
pub use error::SpotifyError;
pub use features::{collect_audio_features, FEATURE_BATCH_SIZE};
pub use fetch::{fetch_playlist_tracks, PlaylistTracks};
pub use iterator::{AsyncPaginatedIterator, PlaylistTracksIterator, UserPlaylistsIterator};
#[cfg(feature = "mock")]
pub use r#trait::MockSpotifyClient;
pub use r#trait::SpotifyClient;
pub use select::{list_playlists, select_playlists, PlaylistSelection};
pub use types::{
    AudioFeatures, FeatureRow, FeatureTable, LabeledDataset, LabeledRow, PlaylistItem,
    PlaylistMap, PlaylistPage, PlaylistRef, PlaylistSummary, TrackEntry, TrackEntryPage,
};

pub type Result<T> = std::result::Result<T, SpotifyError>;
