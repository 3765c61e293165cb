//! "Now playing" snapshot with a freshness window

use crate::error::Result;
use crate::kv::{read_json, write_json, KeyValueStore};
use harmony_core::{PlaybackMode, TrackId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Default maximum age of a resumable snapshot
pub const DEFAULT_SNAPSHOT_FRESHNESS: Duration = Duration::from_secs(5 * 60);

/// Persisted summary of playback state, restored across reloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    /// Index into the track list at save time
    pub current_index: Option<usize>,

    /// Id of the track at `current_index`, used to re-locate it if the list moved
    #[serde(default)]
    pub track_id: Option<TrackId>,

    pub position_seconds: f64,

    pub is_playing: bool,

    #[serde(default)]
    pub mode: PlaybackMode,

    pub volume: f64,

    pub saved_at_epoch_millis: i64,
}

impl PlaybackSnapshot {
    /// Age relative to `now_millis`; clock skew into the future counts as zero
    pub fn age_millis(&self, now_millis: i64) -> i64 {
        now_millis.saturating_sub(self.saved_at_epoch_millis).max(0)
    }

    /// How far the save time lies ahead of `now_millis`, zero if in the past
    pub fn skew_millis(&self, now_millis: i64) -> i64 {
        self.saved_at_epoch_millis.saturating_sub(now_millis).max(0)
    }
}

/// Typed access to the now-playing snapshot
#[derive(Clone)]
pub struct SnapshotStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    freshness: Duration,
}

impl SnapshotStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, freshness: Duration) -> Self {
        Self {
            store,
            key: key.into(),
            freshness,
        }
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    pub fn save(&self, snapshot: &PlaybackSnapshot) -> Result<()> {
        write_json(self.store.as_ref(), &self.key, snapshot)
    }

    /// Load the snapshot if present, well-formed and fresh
    pub fn load(&self, now_millis: i64) -> Option<PlaybackSnapshot> {
        let mut snapshot: PlaybackSnapshot = read_json(self.store.as_ref(), &self.key)?;

        let max_age = i64::try_from(self.freshness.as_millis()).unwrap_or(i64::MAX);
        let age = snapshot.age_millis(now_millis);
        if age > max_age {
            tracing::debug!("Discarding stale snapshot ({} ms old)", age);
            return None;
        }
        // Small clock skew is tolerated; a save time beyond the window is garbage
        let skew = snapshot.skew_millis(now_millis);
        if skew > max_age {
            tracing::warn!("Ignoring snapshot dated {} ms in the future", skew);
            return None;
        }

        if !snapshot.position_seconds.is_finite() || snapshot.position_seconds < 0.0 {
            snapshot.position_seconds = 0.0;
        }
        if !snapshot.volume.is_finite() {
            snapshot.volume = 1.0;
        }
        snapshot.volume = snapshot.volume.clamp(0.0, 1.0);

        Some(snapshot)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)
    }
}
