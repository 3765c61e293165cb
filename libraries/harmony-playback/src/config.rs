//! Engine configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the playback engine
///
/// Every field has a default, so partial configs deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `prev()` restarts the current track past this position (default: 3 s)
    pub restart_threshold_seconds: f64,

    /// Minimum interval between heartbeat snapshots while playing (default: 5 s)
    pub heartbeat_interval_ms: u64,

    /// Maximum age of a resumable snapshot (default: 5 min)
    pub snapshot_freshness_ms: u64,

    /// Recent-plays list length (default: 50)
    pub recent_capacity: usize,

    /// Volume used when nothing is persisted (default: 0.8)
    pub default_volume: f64,

    /// Resume playback if the restored snapshot was playing (default: true)
    pub resume_on_restore: bool,

    /// Fixed shuffle seed for reproducible orders
    pub shuffle_seed: Option<u64>,
}

impl EngineConfig {
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms)
    }

    pub fn snapshot_freshness(&self) -> Duration {
        Duration::from_millis(self.snapshot_freshness_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            restart_threshold_seconds: 3.0,
            heartbeat_interval_ms: 5_000,
            snapshot_freshness_ms: 5 * 60 * 1_000,
            recent_capacity: harmony_storage::DEFAULT_RECENT_CAPACITY,
            default_volume: 0.8,
            resume_on_restore: true,
            shuffle_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.restart_threshold_seconds, 3.0);
        assert_eq!(config.heartbeat_interval(), Duration::from_secs(5));
        assert_eq!(
            config.snapshot_freshness(),
            harmony_storage::DEFAULT_SNAPSHOT_FRESHNESS
        );
        assert_eq!(config.recent_capacity, 50);
        assert!(config.resume_on_restore);
        assert!(config.shuffle_seed.is_none());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"restart_threshold_seconds": 5.0, "shuffle_seed": 7}"#)
                .unwrap();
        assert_eq!(config.restart_threshold_seconds, 5.0);
        assert_eq!(config.shuffle_seed, Some(7));
        assert_eq!(config.default_volume, 0.8);
    }
}
