use thiserror::Error;

/// Error types for Spotify data-collection operations.
///
/// This enum covers all possible errors that can occur while listing
/// playlists, fetching track pages, looking up audio features, and
/// assembling the labeled dataset. Nothing is recovered internally; every
/// failure propagates to the caller.
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// HTTP/network related errors.
    ///
    /// This includes connection failures, timeouts, DNS errors, and other
    /// low-level networking issues.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The service rejected the request's credentials.
    ///
    /// Access tokens expire after roughly an hour; a 401 here usually
    /// means the token needs to be re-acquired.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Non-success status code outside the auth and rate-limit cases.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code returned by the service
        status: u16,
        /// Response body, which normally carries the service's error JSON
        message: String,
    },

    /// Rate limiting from the service.
    ///
    /// The `retry_after` field carries the server-reported number of
    /// seconds to wait before the next request attempt.
    #[error("Rate limited, retry after {retry_after} seconds")]
    RateLimit {
        /// Number of seconds to wait before retrying
        retry_after: u64,
    },

    /// Failed to parse a service response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Two sequences that must correlate positionally have different lengths.
    ///
    /// Feature collection zips id, entry, and feature-response sequences by
    /// position; any length disagreement between them surfaces here.
    #[error("shape mismatch: expected {expected} rows, got {got}")]
    ShapeMismatch {
        /// Length of the reference sequence
        expected: usize,
        /// Length actually observed
        got: usize,
    },

    /// The feature endpoint has no vector for a track.
    #[error("no audio features available for track {track_id}")]
    MissingFeatures {
        /// Id of the track the service returned `null` for
        track_id: String,
    },

    /// A prompt answer named an ordinal with no listed playlist.
    #[error("no playlist was listed at position {ordinal}")]
    UnknownSelection {
        /// The 1-based ordinal the operator entered
        ordinal: usize,
    },

    /// Prompt input that is non-empty but not parseable as playlist numbers.
    #[error("invalid selection input: {0}")]
    Selection(String),

    /// CSV serialization errors while writing a dataset.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File system I/O errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
