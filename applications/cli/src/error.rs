/// CLI error types
use harmony_playback::PlaybackError;
use harmony_storage::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown track: {0}")]
    UnknownTrack(String),

    #[error("Unknown playlist: {0}")]
    UnknownPlaylist(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
