//! One CLI invocation's view of the player
//!
//! Opens the state file, loads the catalogue (through the track cache) and
//! acquires the shared engine, which restores the last session on creation.

use crate::config::AppConfig;
use crate::error::Result;
use harmony_core::{load_tracks, Clock, JsonFileTrackSource, SystemClock, TrackLibrary, TrackList};
use harmony_playback::{EngineHandle, PlayerRegistry, SimulatedOutput};
use harmony_storage::{HarmonyStorage, JsonFileStore, StorageKeys, TrackCache};
use std::sync::Arc;

pub struct Session {
    config: AppConfig,
    storage: HarmonyStorage,
    clock: Arc<dyn Clock>,
    library: TrackLibrary,
    registry: PlayerRegistry,
    engine: EngineHandle,
    output: SimulatedOutput,
}

impl Session {
    pub fn open(config: AppConfig) -> Result<Self> {
        Self::open_with_clock(config, Arc::new(SystemClock))
    }

    pub fn open_with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;

        let store = JsonFileStore::open(&config.storage.state_file);
        tracing::debug!("Opened state file {}", store.path().display());
        let storage = HarmonyStorage::with_keys(
            Arc::new(store),
            StorageKeys::new(config.storage.key_prefix.clone()),
        );

        let cache = storage.track_cache(config.cache_expiry());
        let tracks = match cache.load(clock.now_millis()) {
            Some(tracks) => {
                tracing::debug!("Using {} cached tracks", tracks.len());
                tracks
            }
            None => fetch_catalogue(&config, &cache, clock.as_ref()),
        };

        let output = SimulatedOutput::new();
        let factory_output = output.clone();
        let registry = PlayerRegistry::new(move || Box::new(factory_output.clone()))
            .with_config(config.playback.clone())
            .with_storage(storage.clone())
            .with_clock(Arc::clone(&clock));
        let engine = registry.acquire(tracks.clone());

        Ok(Self {
            config,
            storage,
            clock,
            library: TrackLibrary::new(tracks),
            registry,
            engine,
            output,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn storage(&self) -> &HarmonyStorage {
        &self.storage
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn library(&self) -> &TrackLibrary {
        &self.library
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    /// Handle on the engine's output, used to drive simulated time
    pub fn output(&self) -> &SimulatedOutput {
        &self.output
    }

    /// Re-read the catalogue from disk, bypassing the cache
    ///
    /// The engine follows its current track into the new list by id.
    pub fn refresh_library(&mut self) -> usize {
        let cache = self.storage.track_cache(self.config.cache_expiry());
        if let Err(e) = cache.clear() {
            tracing::warn!("Failed to clear track cache: {}", e);
        }
        let tracks = fetch_catalogue(&self.config, &cache, self.clock.as_ref());
        self.engine.with(|engine| engine.set_tracks(tracks.clone()));
        self.library = TrackLibrary::new(tracks);
        self.library.len()
    }
}

fn fetch_catalogue(config: &AppConfig, cache: &TrackCache, clock: &dyn Clock) -> TrackList {
    let source = JsonFileTrackSource::new(&config.library.catalogue);
    let tracks = load_tracks(&source);
    if tracks.is_empty() {
        return tracks;
    }

    tracing::info!(
        "Loaded {} tracks from {}",
        tracks.len(),
        config.library.catalogue.display()
    );
    if let Err(e) = cache.save(&tracks, clock.now_millis()) {
        tracing::warn!("Failed to cache track list: {}", e);
    }
    tracks
}
