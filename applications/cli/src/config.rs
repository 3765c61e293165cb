/// Application configuration
use crate::error::{CliError, Result};
use harmony_playback::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file, read from the working directory if present
pub const DEFAULT_CONFIG_FILE: &str = "harmony.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_library")]
    pub library: LibrarySettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default)]
    pub playback: EngineConfig,

    #[serde(default = "default_simulation")]
    pub simulation: SimulationSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LibrarySettings {
    /// JSON array of track records
    #[serde(default = "default_catalogue")]
    pub catalogue: PathBuf,

    /// Lifetime of the cached, normalised catalogue
    #[serde(default = "default_cache_expiry_secs")]
    pub cache_expiry_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StorageSettings {
    /// File holding all persisted player state
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Namespace for storage keys
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Wall-clock interval between ticks
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Simulated seconds per wall-clock second
    #[serde(default = "default_speed")]
    pub speed: f64,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `harmony.toml`; an explicit path must
    /// exist. Environment variables prefixed `HARMONY_` override file values,
    /// with `__` between levels (`HARMONY_PLAYBACK__DEFAULT_VOLUME=0.5`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("HARMONY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let playback = &self.playback;
        if !(0.0..=1.0).contains(&playback.default_volume) {
            return Err(CliError::Config(format!(
                "playback.default_volume must be within 0..=1, got {}",
                playback.default_volume
            )));
        }
        if !playback.restart_threshold_seconds.is_finite()
            || playback.restart_threshold_seconds < 0.0
        {
            return Err(CliError::Config(
                "playback.restart_threshold_seconds must be a non-negative number".to_string(),
            ));
        }
        if playback.recent_capacity == 0 {
            return Err(CliError::Config(
                "playback.recent_capacity must be at least 1".to_string(),
            ));
        }
        if self.simulation.tick_ms == 0 {
            return Err(CliError::Config(
                "simulation.tick_ms must be greater than 0".to_string(),
            ));
        }
        if !self.simulation.speed.is_finite() || self.simulation.speed <= 0.0 {
            return Err(CliError::Config(
                "simulation.speed must be a positive number".to_string(),
            ));
        }
        Ok(())
    }

    /// Render as TOML, e.g. for `harmony init-config`
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn cache_expiry(&self) -> Duration {
        Duration::from_secs(self.library.cache_expiry_secs)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.simulation.tick_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            library: default_library(),
            storage: default_storage(),
            playback: EngineConfig::default(),
            simulation: default_simulation(),
        }
    }
}

// Default values
fn default_library() -> LibrarySettings {
    LibrarySettings {
        catalogue: default_catalogue(),
        cache_expiry_secs: default_cache_expiry_secs(),
    }
}

fn default_catalogue() -> PathBuf {
    PathBuf::from("./data/tracks.json")
}

fn default_cache_expiry_secs() -> u64 {
    harmony_storage::DEFAULT_TRACK_CACHE_EXPIRY.as_secs()
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        state_file: default_state_file(),
        key_prefix: default_key_prefix(),
    }
}

fn default_state_file() -> PathBuf {
    PathBuf::from("./data/harmony-state.json")
}

fn default_key_prefix() -> String {
    "harmony".to_string()
}

fn default_simulation() -> SimulationSettings {
    SimulationSettings {
        tick_ms: default_tick_ms(),
        speed: default_speed(),
    }
}

fn default_tick_ms() -> u64 {
    250
}

fn default_speed() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache_expiry(), Duration::from_secs(3600));
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn rejects_out_of_range_volume() {
        let mut config = AppConfig::default();
        config.playback.default_volume = 1.5;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn rejects_zero_tick() {
        let mut config = AppConfig::default();
        config.simulation.tick_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn toml_round_trip() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
