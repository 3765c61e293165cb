/// Core error types for Harmony
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Harmony
#[derive(Error, Debug)]
pub enum CoreError {
    /// The track source could not produce a catalogue
    #[error("Track source unavailable: {0}")]
    TrackSourceUnavailable(String),

    /// The catalogue was readable but not in the expected shape
    #[error("Invalid track data: {0}")]
    InvalidTrackData(String),

    /// Unknown playback mode name
    #[error("Unknown playback mode: {0}")]
    UnknownMode(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a track source unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::TrackSourceUnavailable(msg.into())
    }

    /// Create an invalid track data error
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidTrackData(msg.into())
    }
}
