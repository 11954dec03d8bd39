//! Data types for playlist metadata and assembled feature tables.
//!
//! This module contains the core data structures used throughout the crate:
//! the raw per-track records fetched from playlist pages, the audio-feature
//! vectors, the assembled feature tables, the labeled dataset they merge
//! into, and the ordinal map the interactive selector builds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ================================================================================================
// PLAYLIST METADATA
// ================================================================================================

/// Identifies a playlist together with the user that owns it.
///
/// Both halves are needed to request the playlist's track listing, which is
/// addressed under the owner's namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistRef {
    /// Opaque playlist id assigned by the service
    pub playlist_id: String,
    /// Id of the user that owns the playlist
    pub owner_id: String,
}

/// One playlist row from a user's playlist listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistSummary {
    /// Opaque playlist id assigned by the service
    pub id: String,
    /// Display name shown in the numbered listing
    pub name: String,
    /// Owner id, parsed out of the service's `spotify:user:<id>` URI form
    pub owner_id: String,
}

impl PlaylistSummary {
    /// The (playlist, owner) pair this summary resolves to.
    #[must_use]
    pub fn to_ref(&self) -> PlaylistRef {
        PlaylistRef {
            playlist_id: self.id.clone(),
            owner_id: self.owner_id.clone(),
        }
    }
}

/// Mapping from the 1-based ordinal printed next to each playlist to the
/// playlist it identifies.
///
/// Lookups return an explicit [`Option`]; an ordinal that was never printed
/// resolves to `None`, and callers decide what a missing entry means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistMap {
    entries: BTreeMap<usize, PlaylistRef>,
}

impl PlaylistMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the playlist printed at display position `ordinal`.
    pub fn insert(&mut self, ordinal: usize, reference: PlaylistRef) {
        self.entries.insert(ordinal, reference);
    }

    /// Look up the playlist printed at display position `ordinal`.
    #[must_use]
    pub fn resolve(&self, ordinal: usize) -> Option<&PlaylistRef> {
        self.entries.get(&ordinal)
    }

    /// Number of playlists recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no playlists have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ================================================================================================
// TRACK METADATA
// ================================================================================================

/// Raw per-track record from a playlist page. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackEntry {
    /// Opaque track id assigned by the service
    pub id: String,
    /// Track title
    pub name: String,
    /// Track duration in milliseconds
    pub duration_ms: u32,
    /// Service-computed popularity score (0-100)
    pub popularity: u32,
    /// Whether the track is flagged as explicit
    pub explicit: bool,
}

/// One entry of a playlist's track listing.
///
/// `track` is `None` for entries with no service-side track object, which
/// happens for removed tracks and locally uploaded files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// The underlying track, when the service still knows about it
    pub track: Option<TrackEntry>,
    /// When the track was added to the playlist, if reported
    pub added_at: Option<DateTime<Utc>>,
}

/// The service-computed audio descriptors for one track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub energy: f64,
    pub liveness: f64,
    pub tempo: f64,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub time_signature: i32,
    pub danceability: f64,
    /// Pitch class of the track's estimated key (0 = C, 1 = C#, ...)
    pub key: i32,
    /// Duration as reported by the feature endpoint, which can disagree
    /// with the playlist entry's duration by a few milliseconds
    pub duration_ms: u32,
    pub loudness: f64,
    pub valence: f64,
    /// Modality: 1 = major, 0 = minor
    pub mode: i32,
}

// ================================================================================================
// FEATURE TABLES
// ================================================================================================

/// One row of an assembled feature table: the audio descriptors plus the
/// track-level scalars copied from the corresponding [`TrackEntry`].
///
/// Field order is the column order of the CSV serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
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
    /// Track duration from the playlist entry; the feature endpoint reports
    /// its own `duration_ms` above
    pub length: u32,
    pub popularity: u32,
    pub explicit: bool,
}

impl FeatureRow {
    /// Combine a feature vector with the scalars of its track entry.
    #[must_use]
    pub fn new(features: AudioFeatures, entry: &TrackEntry) -> Self {
        Self {
            energy: features.energy,
            liveness: features.liveness,
            tempo: features.tempo,
            speechiness: features.speechiness,
            acousticness: features.acousticness,
            instrumentalness: features.instrumentalness,
            time_signature: features.time_signature,
            danceability: features.danceability,
            key: features.key,
            duration_ms: features.duration_ms,
            loudness: features.loudness,
            valence: features.valence,
            mode: features.mode,
            length: entry.duration_ms,
            popularity: entry.popularity,
            explicit: entry.explicit,
        }
    }
}

/// Ordered collection of [`FeatureRow`]s, one per input track.
///
/// Row order matches the order of the id sequence the rows were collected
/// for. Several playlists' worth of rows can be folded into one table with
/// [`FeatureTable::extend`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from already-assembled rows.
    #[must_use]
    pub fn from_rows(rows: Vec<FeatureRow>) -> Self {
        Self { rows }
    }

    /// The rows in order.
    #[must_use]
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Consume the table, yielding its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<FeatureRow> {
        self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append one row.
    pub fn push(&mut self, row: FeatureRow) {
        self.rows.push(row);
    }

    /// Append all rows of `other` after the existing rows.
    pub fn extend(&mut self, other: FeatureTable) {
        self.rows.extend(other.rows);
    }
}

/// A [`FeatureRow`] with the explicit flag coerced to `{0, 1}` and the
/// binary taste label attached.
///
/// Field order is the column order of the CSV serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledRow {
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
    pub length: u32,
    pub popularity: u32,
    /// 1 where the track is explicit, 0 otherwise
    pub explicit: u8,
    /// 1 = liked, 0 = disliked
    pub target: u8,
}

/// The merged like/dislike table.
///
/// The row index is the vector position and is contiguous from 0 by
/// construction; the indices the rows had in their source tables are not
/// retained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledDataset {
    rows: Vec<LabeledRow>,
}

impl LabeledDataset {
    /// Build a dataset from already-labeled rows.
    #[must_use]
    pub fn from_rows(rows: Vec<LabeledRow>) -> Self {
        Self { rows }
    }

    /// The rows in order.
    #[must_use]
    pub fn rows(&self) -> &[LabeledRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ================================================================================================
// PAGINATION
// ================================================================================================

/// One page of a playlist's track listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackEntryPage {
    /// The entries on this page
    pub items: Vec<PlaylistItem>,
    /// Link to the next page, or `None` on the last page
    pub next: Option<String>,
    /// Offset of the first item within the full listing
    pub offset: u32,
    /// Total number of entries in the playlist
    pub total: u32,
}

/// One page of a user's playlist listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistPage {
    /// The playlists on this page
    pub items: Vec<PlaylistSummary>,
    /// Link to the next page, or `None` on the last page
    pub next: Option<String>,
    /// Offset of the first item within the full listing
    pub offset: u32,
    /// Total number of playlists visible to the user
    pub total: u32,
}
