//! Labeling and concatenation of like/dislike feature tables.

use crate::types::{FeatureRow, FeatureTable, LabeledDataset, LabeledRow};
use crate::Result;
use std::io::Write;

/// Label attached to rows from liked playlists.
pub const TARGET_LIKE: u8 = 1;
/// Label attached to rows from disliked playlists.
pub const TARGET_DISLIKE: u8 = 0;

fn label_row(row: FeatureRow, target: u8) -> LabeledRow {
    LabeledRow {
        energy: row.energy,
        liveness: row.liveness,
        tempo: row.tempo,
        speechiness: row.speechiness,
        acousticness: row.acousticness,
        instrumentalness: row.instrumentalness,
        time_signature: row.time_signature,
        danceability: row.danceability,
        key: row.key,
        duration_ms: row.duration_ms,
        loudness: row.loudness,
        valence: row.valence,
        mode: row.mode,
        length: row.length,
        popularity: row.popularity,
        explicit: u8::from(row.explicit),
        target,
    }
}

/// Merge a liked and a disliked feature table into one labeled dataset.
///
/// The explicit flag is coerced to 1/0 on each table independently, liked
/// rows come first with `target` 1, disliked rows follow with `target` 0,
/// and the row index restarts at zero across the merged table. Tracks
/// present in both inputs are kept twice, with conflicting labels; callers
/// that care about contradictory rows have to deduplicate their playlist
/// selections up front.
#[must_use]
pub fn assemble_dataset(like: FeatureTable, dislike: FeatureTable) -> LabeledDataset {
    let mut rows = Vec::with_capacity(like.len() + dislike.len());
    rows.extend(
        like.into_rows()
            .into_iter()
            .map(|row| label_row(row, TARGET_LIKE)),
    );
    rows.extend(
        dislike
            .into_rows()
            .into_iter()
            .map(|row| label_row(row, TARGET_DISLIKE)),
    );
    LabeledDataset::from_rows(rows)
}

impl LabeledDataset {
    /// Serialize the dataset as CSV, header row first.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for row in self.rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl FeatureTable {
    /// Serialize the table as CSV, header row first.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for row in self.rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
