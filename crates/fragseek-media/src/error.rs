//! Error types for fragseek-media.

use thiserror::Error;

/// Result type for fragseek-media operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for fragseek-media operations.
///
/// Locators never fail; these errors come from building level snapshots.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed line in a media playlist.
    #[error("Invalid playlist at line {line}: {reason}")]
    InvalidPlaylist { line: usize, reason: String },

    /// Missing required tag in a media playlist.
    #[error("Missing required tag: {0}")]
    MissingTag(&'static str),

    /// Fragment sequence breaks ordering invariants.
    #[error("Invalid fragment sequence: {0}")]
    InvalidSequence(String),

    /// Snapshot (de)serialization failed.
    #[cfg(feature = "serialize")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid playlist error for a 1-based line number.
    pub fn invalid_playlist(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidPlaylist {
            line,
            reason: reason.into(),
        }
    }

    /// Create an invalid sequence error.
    pub fn invalid_sequence(msg: impl Into<String>) -> Self {
        Self::InvalidSequence(msg.into())
    }
}
