//! Player registry
//!
//! Hands every caller the same `PlaybackEngine`. The first `acquire`
//! constructs it (silencing stray outputs and restoring persisted state);
//! later callers attach to it instead of creating a competing output.

use crate::{
    config::EngineConfig,
    engine::PlaybackEngine,
    output::{AudioEnvironment, AudioOutput, NoopEnvironment},
};
use harmony_core::{Clock, SystemClock, TrackList};
use harmony_storage::HarmonyStorage;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// What `acquire_with` does with the caller's list when an engine exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcquirePolicy {
    /// Keep the engine's list; adopt the caller's only if the engine has none
    #[default]
    KeepExisting,

    /// Replace the engine's list unless it is the very same list
    ReplaceIfDifferent,
}

/// Shared handle to the authoritative engine
#[derive(Clone)]
pub struct EngineHandle(Arc<Mutex<PlaybackEngine>>);

impl EngineHandle {
    fn new(engine: PlaybackEngine) -> Self {
        Self(Arc::new(Mutex::new(engine)))
    }

    /// Lock the engine for a sequence of operations
    pub fn lock(&self) -> MutexGuard<'_, PlaybackEngine> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with the engine locked
    pub fn with<R>(&self, f: impl FnOnce(&mut PlaybackEngine) -> R) -> R {
        f(&mut self.lock())
    }

    /// True if both handles point at the same engine
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EngineHandle")
            .field(&Arc::as_ptr(&self.0))
            .finish()
    }
}

type OutputFactory = Box<dyn Fn() -> Box<dyn AudioOutput> + Send + Sync>;

/// Owner of the single engine slot
pub struct PlayerRegistry {
    slot: Mutex<Option<EngineHandle>>,
    config: EngineConfig,
    storage: Option<HarmonyStorage>,
    environment: Arc<dyn AudioEnvironment>,
    clock: Arc<dyn Clock>,
    output_factory: OutputFactory,
}

impl PlayerRegistry {
    /// Create an empty registry; `output_factory` builds the engine's output
    /// on first acquire
    pub fn new<F>(output_factory: F) -> Self
    where
        F: Fn() -> Box<dyn AudioOutput> + Send + Sync + 'static,
    {
        Self {
            slot: Mutex::new(None),
            config: EngineConfig::default(),
            storage: None,
            environment: Arc::new(NoopEnvironment),
            clock: Arc::new(SystemClock),
            output_factory: Box::new(output_factory),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_storage(mut self, storage: HarmonyStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Arc<dyn AudioEnvironment>) -> Self {
        self.environment = environment;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Return the engine, constructing it on first use
    pub fn acquire(&self, tracks: TrackList) -> EngineHandle {
        self.acquire_with(tracks, AcquirePolicy::KeepExisting)
    }

    /// Return the engine, applying `policy` to the caller's track list if
    /// the engine already exists
    pub fn acquire_with(&self, tracks: TrackList, policy: AcquirePolicy) -> EngineHandle {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(handle) = slot.as_ref() {
            let mut engine = handle.lock();
            let replace = match policy {
                AcquirePolicy::KeepExisting => engine.tracks().is_empty() && !tracks.is_empty(),
                AcquirePolicy::ReplaceIfDifferent => !Arc::ptr_eq(engine.tracks(), &tracks),
            };
            if replace {
                tracing::debug!("Replacing engine track list ({} tracks)", tracks.len());
                engine.set_tracks(tracks);
            } else {
                tracing::debug!("Attaching to existing engine");
            }
            return handle.clone();
        }

        let handle = EngineHandle::new(self.construct(tracks));
        *slot = Some(handle.clone());
        handle
    }

    /// The engine if one has been constructed
    pub fn current(&self) -> Option<EngineHandle> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn construct(&self, tracks: TrackList) -> PlaybackEngine {
        let silenced = self.environment.silence_foreign_audio();
        if silenced > 0 {
            tracing::warn!("Silenced {} stray audio output(s) on startup", silenced);
        }

        let track_count = tracks.len();
        let mut engine = PlaybackEngine::new(self.config.clone(), (self.output_factory)())
            .with_tracks(tracks)
            .with_environment(Arc::clone(&self.environment))
            .with_clock(Arc::clone(&self.clock));
        if let Some(storage) = &self.storage {
            engine = engine.with_storage(storage);
        }

        let restored = engine.restore_from_storage();
        tracing::info!(
            "Playback engine created ({} tracks, restored: {})",
            track_count,
            restored
        );
        engine
    }
}
