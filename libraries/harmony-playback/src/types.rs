//! Core types for playback management

use harmony_core::{PlaybackMode, Track};
use serde::{Deserialize, Serialize};

/// Engine state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineStatus {
    /// No track loaded
    #[default]
    Idle,

    /// Track loaded, not playing
    Paused,

    /// Track loaded and playing
    Playing,

    /// Audio output reported a failure; the track stays loaded for a retry
    Error,
}

impl EngineStatus {
    pub fn is_loaded(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Identifies one `play()` request
///
/// Asynchronous completions carry the token back to the engine; a token from
/// an earlier request is stale and its completion is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayToken {
    pub generation: u64,
    pub index: usize,
}

/// Read-only view of the engine for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineState {
    pub status: EngineStatus,
    pub current_index: Option<usize>,
    pub current_track: Option<Track>,
    pub track_count: usize,
    pub position_seconds: f64,
    pub duration_seconds: Option<f64>,
    pub volume: f64,
    pub is_muted: bool,
    pub mode: PlaybackMode,
    pub shuffle_order: Vec<usize>,
    pub last_error: Option<String>,
}

impl EngineState {
    pub fn is_playing(&self) -> bool {
        self.status == EngineStatus::Playing
    }

    /// Position as a fraction of the duration, if known
    pub fn progress(&self) -> Option<f64> {
        self.duration_seconds
            .filter(|d| *d > 0.0)
            .map(|d| (self.position_seconds / d).clamp(0.0, 1.0))
    }
}
