//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// Index outside the current track list
    #[error("Invalid track index {index} (list has {len} tracks)")]
    InvalidIndex { index: usize, len: usize },

    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Track list is empty
    #[error("Track list is empty")]
    EmptyTrackList,

    /// Fractional seek before the duration is known
    #[error("Track duration is not known yet")]
    DurationUnknown,

    /// Audio output refused to load or play
    #[error("Audio playback failed: {0}")]
    AudioPlaybackFailed(String),
}

impl PlaybackError {
    pub fn audio(message: impl Into<String>) -> Self {
        Self::AudioPlaybackFailed(message.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
