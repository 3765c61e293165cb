//! Storage error types

use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backing store cannot be reached (quota, permissions, missing directory)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A stored value could not be decoded
    #[error("Corrupt value for key '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// Playlist-level constraint violations
    #[error("Playlist error: {0}")]
    Playlist(String),

    /// Requested entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    pub fn corrupt(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
