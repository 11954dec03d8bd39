//! Batched audio-feature lookup and feature-table assembly.

use crate::r#trait::SpotifyClient;
use crate::types::{FeatureRow, FeatureTable, TrackEntry};
use crate::{Result, SpotifyError};

/// Maximum number of ids the feature endpoint accepts per call.
pub const FEATURE_BATCH_SIZE: usize = 50;

/// Look up audio features for `ids` and zip them with `entries` into a
/// feature table.
///
/// Ids are looked up in consecutive batches of [`FEATURE_BATCH_SIZE`], one
/// call per batch, strictly in sequence. Responses are trusted to be
/// positionally aligned with their batch; no id cross-validation happens.
/// A track the service has no feature vector for fails the collection with
/// [`SpotifyError::MissingFeatures`] naming the track, and any length
/// disagreement between ids, entries, and responses fails with
/// [`SpotifyError::ShapeMismatch`].
pub async fn collect_audio_features<C: SpotifyClient>(
    client: &C,
    ids: &[String],
    entries: &[TrackEntry],
) -> Result<FeatureTable> {
    if ids.len() != entries.len() {
        return Err(SpotifyError::ShapeMismatch {
            expected: entries.len(),
            got: ids.len(),
        });
    }

    let mut features = Vec::with_capacity(ids.len());
    for chunk in ids.chunks(FEATURE_BATCH_SIZE) {
        log::debug!("Requesting audio features for {} tracks", chunk.len());
        features.extend(client.audio_features(chunk).await?);
    }

    if features.len() != entries.len() {
        return Err(SpotifyError::ShapeMismatch {
            expected: entries.len(),
            got: features.len(),
        });
    }

    let mut table = FeatureTable::new();
    for (feature, entry) in features.into_iter().zip(entries) {
        let feature = feature.ok_or_else(|| SpotifyError::MissingFeatures {
            track_id: entry.id.clone(),
        })?;
        table.push(FeatureRow::new(feature, entry));
    }

    Ok(table)
}
