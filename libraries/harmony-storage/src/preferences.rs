//! Long-lived player preferences (no expiry)

use crate::error::Result;
use crate::kv::{read_json, write_json, KeyValueStore};
use harmony_core::PlaybackMode;
use std::sync::Arc;

/// Volume and mode preferences
#[derive(Clone)]
pub struct PreferenceStore {
    store: Arc<dyn KeyValueStore>,
    volume_key: String,
    mode_key: String,
}

impl PreferenceStore {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        volume_key: impl Into<String>,
        mode_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            volume_key: volume_key.into(),
            mode_key: mode_key.into(),
        }
    }

    /// Saved volume in [0, 1]
    pub fn volume(&self) -> Option<f64> {
        read_json::<f64>(self.store.as_ref(), &self.volume_key)
            .filter(|v| v.is_finite())
            .map(|v| v.clamp(0.0, 1.0))
    }

    pub fn set_volume(&self, volume: f64) -> Result<()> {
        write_json(self.store.as_ref(), &self.volume_key, &volume)
    }

    pub fn mode(&self) -> Option<PlaybackMode> {
        read_json(self.store.as_ref(), &self.mode_key)
    }

    pub fn set_mode(&self, mode: PlaybackMode) -> Result<()> {
        write_json(self.store.as_ref(), &self.mode_key, &mode)
    }
}
