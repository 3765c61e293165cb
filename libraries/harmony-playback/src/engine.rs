//! Playback engine - core orchestration
//!
//! Owns the track list reference, current index, mode, shuffle order, volume
//! and the single audio output. Every significant transition is written
//! through to storage and published on the event bus.

use crate::{
    config::EngineConfig,
    error::{PlaybackError, Result},
    events::{EventBus, PlaybackEvent, Subscription},
    output::{AudioEnvironment, AudioOutput, NoopEnvironment},
    shuffle::ShuffleOrder,
    types::{EngineState, EngineStatus, PlayToken},
    volume::{clamp_fraction, Volume},
};
use harmony_core::{Clock, PlaybackMode, SystemClock, Track, TrackId, TrackList};
use harmony_storage::{
    HarmonyStorage, PlaybackSnapshot, PreferenceStore, RecentPlays, SnapshotStore,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Typed stores the engine writes through to
struct Persistence {
    snapshots: SnapshotStore,
    preferences: PreferenceStore,
    recent: RecentPlays,
}

/// Authoritative playback state machine
pub struct PlaybackEngine {
    config: EngineConfig,

    tracks: TrackList,
    current_index: Option<usize>,
    status: EngineStatus,
    position: f64,
    duration: Option<f64>,
    volume: Volume,
    mode: PlaybackMode,
    shuffle: ShuffleOrder,
    rng: StdRng,

    audio: Box<dyn AudioOutput>,
    environment: Arc<dyn AudioEnvironment>,

    // Bumped on every play request so older tokens go stale
    generation: u64,
    pending_play: Option<PlayToken>,
    recent_recorded: bool,
    last_error: Option<String>,

    events: EventBus,
    persistence: Option<Persistence>,
    clock: Arc<dyn Clock>,
    last_persist_millis: Option<i64>,
    // Snapshot read before any tracks were available
    pending_restore: Option<PlaybackSnapshot>,
}

impl PlaybackEngine {
    /// Create an idle engine with an empty track list and no persistence
    pub fn new(config: EngineConfig, audio: Box<dyn AudioOutput>) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let volume = Volume::new(config.default_volume);

        let mut engine = Self {
            config,
            tracks: Arc::from(Vec::new()),
            current_index: None,
            status: EngineStatus::Idle,
            position: 0.0,
            duration: None,
            volume,
            mode: PlaybackMode::default(),
            shuffle: ShuffleOrder::new(),
            rng,
            audio,
            environment: Arc::new(NoopEnvironment),
            generation: 0,
            pending_play: None,
            recent_recorded: false,
            last_error: None,
            events: EventBus::new(),
            persistence: None,
            clock: Arc::new(SystemClock),
            last_persist_millis: None,
            pending_restore: None,
        };
        engine.audio.set_volume(engine.volume.gain());
        engine
    }

    #[must_use]
    pub fn with_tracks(mut self, tracks: TrackList) -> Self {
        self.tracks = tracks;
        self
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Arc<dyn AudioEnvironment>) -> Self {
        self.environment = environment;
        self
    }

    /// Write state through to `storage`
    #[must_use]
    pub fn with_storage(mut self, storage: &HarmonyStorage) -> Self {
        self.persistence = Some(Persistence {
            snapshots: storage.snapshots(self.config.snapshot_freshness()),
            preferences: storage.preferences(),
            recent: storage.recent_plays(self.config.recent_capacity),
        });
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // ===== Accessors =====

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tracks(&self) -> &TrackList {
        &self.tracks
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_index.and_then(|i| self.tracks.get(i))
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == EngineStatus::Playing
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn volume(&self) -> f64 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn shuffle_order(&self) -> &[usize] {
        self.shuffle.order()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Token of the play request still awaiting completion, if any
    pub fn pending_play(&self) -> Option<PlayToken> {
        self.pending_play
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Shorthand for `events().subscribe(..)`
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&PlaybackEvent) + Send + 'static,
    {
        self.events.subscribe(listener)
    }

    /// Snapshot of everything a UI renders
    pub fn state(&self) -> EngineState {
        EngineState {
            status: self.status,
            current_index: self.current_index,
            current_track: self.current_track().cloned(),
            track_count: self.tracks.len(),
            position_seconds: self.position,
            duration_seconds: self.duration,
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
            mode: self.mode,
            shuffle_order: self.shuffle.order().to_vec(),
            last_error: self.last_error.clone(),
        }
    }

    // ===== Transport =====

    /// Load the track at `index`
    ///
    /// Resets position to 0. If the engine was playing, playback continues
    /// with the new track. An out-of-range index is rejected without any
    /// state change.
    pub fn load(&mut self, index: usize) -> Result<()> {
        let len = self.tracks.len();
        let track = self
            .tracks
            .get(index)
            .cloned()
            .ok_or(PlaybackError::InvalidIndex { index, len })?;

        let was_playing = self.is_playing();
        let previous_track_id = self.current_track().map(|t| t.id.clone());

        self.current_index = Some(index);
        self.pending_restore = None;
        self.position = 0.0;
        self.duration = known_duration(track.duration_seconds);
        self.pending_play = None;
        self.recent_recorded = false;
        self.last_error = None;
        if self.mode == PlaybackMode::Shuffle {
            self.shuffle.pick(index);
        }

        tracing::debug!("Loading track {} ({})", index, track.id);
        self.events.emit(&PlaybackEvent::TrackChanged {
            index,
            track: track.clone(),
            previous_track_id,
        });

        if let Err(e) = self.audio.load(&track) {
            self.fail(e.to_string());
            return Err(e);
        }
        self.audio.set_volume(self.volume.gain());

        if was_playing {
            self.play().map(|_| ())
        } else {
            self.set_status(EngineStatus::Paused);
            self.persist();
            Ok(())
        }
    }

    /// Start or resume playback of the loaded track
    ///
    /// Silences every foreign output first. From the Error state the track is
    /// reloaded before retrying.
    pub fn play(&mut self) -> Result<PlayToken> {
        let index = self.require_loaded()?;

        if self.status == EngineStatus::Error {
            let track = self.tracks[index].clone();
            if let Err(e) = self.audio.load(&track) {
                self.fail(e.to_string());
                return Err(e);
            }
            if self.position > 0.0 {
                self.audio.seek(self.position);
            }
        }

        let silenced = self.environment.silence_foreign_audio();
        if silenced > 0 {
            tracing::info!("Silenced {} foreign audio output(s)", silenced);
        }

        self.generation += 1;
        let token = PlayToken {
            generation: self.generation,
            index,
        };

        self.audio.set_volume(self.volume.gain());
        if let Err(e) = self.audio.play() {
            self.fail(e.to_string());
            return Err(e);
        }

        self.pending_play = Some(token);
        self.last_error = None;
        self.set_status(EngineStatus::Playing);
        self.record_recent_play();
        self.persist();
        Ok(token)
    }

    /// Pause playback, keeping position
    pub fn pause(&mut self) {
        if !self.is_playing() {
            tracing::debug!("Pause ignored in {:?} state", self.status);
            return;
        }

        self.audio.pause();
        self.sync_position_from_output();
        self.pending_play = None;
        self.set_status(EngineStatus::Paused);
        self.persist();
    }

    /// Play if paused, pause if playing; loads the first track if none is loaded
    pub fn toggle(&mut self) -> Result<()> {
        if self.tracks.is_empty() {
            return Err(PlaybackError::EmptyTrackList);
        }
        if self.ensure_index_valid().is_none() {
            self.load(0)?;
        }

        if self.is_playing() {
            self.pause();
            Ok(())
        } else {
            self.play().map(|_| ())
        }
    }

    /// Seek to a fraction of the duration (clamped to [0, 1])
    pub fn seek(&mut self, fraction: f64) -> Result<()> {
        self.require_loaded()?;
        let duration = self.duration.ok_or(PlaybackError::DurationUnknown)?;
        self.apply_seek(clamp_fraction(fraction) * duration);
        Ok(())
    }

    /// Seek to an absolute position, clamped to the known duration
    pub fn seek_to(&mut self, seconds: f64) -> Result<()> {
        self.require_loaded()?;
        let mut target = if seconds.is_finite() {
            seconds.max(0.0)
        } else {
            0.0
        };
        if let Some(duration) = self.duration {
            target = target.min(duration);
        }
        self.apply_seek(target);
        Ok(())
    }

    /// Skip to the next track per the current mode
    ///
    /// Sequence mode does not wrap: at the last track the engine pauses there
    /// with position 0.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        let len = self.non_empty_len()?;
        let Some(current) = self.ensure_index_valid() else {
            return self.load(0);
        };

        match self.mode {
            PlaybackMode::Shuffle => {
                let index = self.next_shuffled(current);
                self.load(index)
            }
            PlaybackMode::Sequence if current + 1 >= len => {
                self.stop_at_end();
                Ok(())
            }
            _ => self.load((current + 1) % len),
        }
    }

    /// Go to the previous track
    ///
    /// Past the restart threshold this restarts the current track instead.
    pub fn prev(&mut self) -> Result<()> {
        let len = self.non_empty_len()?;
        let Some(current) = self.ensure_index_valid() else {
            return self.load(0);
        };

        if self.position > self.config.restart_threshold_seconds {
            self.restart_current();
            return Ok(());
        }

        let index = match self.mode {
            PlaybackMode::Shuffle => self.prev_shuffled(current),
            _ => (current + len - 1) % len,
        };
        self.load(index)
    }

    // ===== Volume =====

    /// Set volume (clamped to [0, 1]); returns the stored level
    pub fn set_volume(&mut self, fraction: f64) -> f64 {
        if self.volume.set_level(fraction) {
            self.audio.set_volume(self.volume.gain());
            self.emit_volume_changed();
            if let Some(p) = &self.persistence {
                if let Err(e) = p.preferences.set_volume(self.volume.level()) {
                    tracing::warn!("Failed to save volume preference: {}", e);
                }
            }
            self.persist();
        }
        self.volume.level()
    }

    pub fn mute(&mut self) {
        if !self.volume.is_muted() {
            self.volume.mute();
            self.apply_mute();
        }
    }

    pub fn unmute(&mut self) {
        if self.volume.is_muted() {
            self.volume.unmute();
            self.apply_mute();
        }
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_mute();
    }

    // ===== Mode =====

    /// Switch playback mode
    ///
    /// Entering Shuffle builds a fresh order with the current track first;
    /// leaving it drops the order. The track list itself is never reordered.
    pub fn set_mode(&mut self, mode: PlaybackMode) {
        if mode == self.mode {
            return;
        }

        self.mode = mode;
        if mode == PlaybackMode::Shuffle {
            self.regenerate_shuffle();
        } else {
            self.shuffle.clear();
        }

        tracing::debug!("Playback mode set to {}", mode);
        self.events.emit(&PlaybackEvent::ModeChanged { mode });
        if let Some(p) = &self.persistence {
            if let Err(e) = p.preferences.set_mode(mode) {
                tracing::warn!("Failed to save mode preference: {}", e);
            }
        }
        self.persist();
    }

    /// Advance to the next mode in cycle order and return it
    pub fn cycle_mode(&mut self) -> PlaybackMode {
        self.set_mode(self.mode.cycle());
        self.mode
    }

    // ===== Track list =====

    /// Replace the track list
    ///
    /// The same list (by identity) is a no-op. The current track is followed
    /// into the new list by id; if it is gone the index is clamped and the
    /// clamped track is loaded.
    pub fn set_tracks(&mut self, tracks: TrackList) {
        if Arc::ptr_eq(&self.tracks, &tracks) {
            return;
        }

        let current_id = self.current_track().map(|t| t.id.clone());
        let previous_index = self.current_index;
        self.tracks = tracks;
        self.events.emit(&PlaybackEvent::TracksChanged {
            length: self.tracks.len(),
        });

        if let Some(index) = current_id.and_then(|id| self.index_of(&id)) {
            self.current_index = Some(index);
            if self.mode == PlaybackMode::Shuffle {
                self.regenerate_shuffle();
            }
            self.persist();
            return;
        }

        if self.mode == PlaybackMode::Shuffle {
            self.shuffle.clear();
        }

        if previous_index.is_none() {
            self.apply_pending_restore();
            return;
        }
        match self.ensure_index_valid() {
            Some(index) => {
                if let Err(e) = self.load(index) {
                    tracing::warn!("Failed to load track after list change: {}", e);
                }
            }
            None => self.unload(),
        }
    }

    // ===== Audio callbacks =====

    /// Media metadata arrived
    pub fn on_metadata(&mut self, duration_seconds: f64) {
        self.duration = known_duration(duration_seconds);
        self.emit_position_changed();
    }

    /// Periodic position report from the output
    pub fn on_time_update(&mut self, position_seconds: f64) {
        if position_seconds.is_finite() && position_seconds >= 0.0 {
            self.position = position_seconds;
            self.emit_position_changed();
        }
    }

    /// The output finished the current track
    pub fn on_track_ended(&mut self) -> Result<()> {
        if !self.is_playing() {
            tracing::debug!("Track end ignored in {:?} state", self.status);
            return Ok(());
        }
        let Some(current) = self.ensure_index_valid() else {
            return Ok(());
        };

        match self.mode {
            PlaybackMode::RepeatOne => {
                self.restart_current();
                self.play().map(|_| ())
            }
            PlaybackMode::Sequence if current + 1 >= self.tracks.len() => {
                self.stop_at_end();
                Ok(())
            }
            _ => self.next(),
        }
    }

    /// The output reported a load or playback failure
    ///
    /// The track stays loaded; the engine does not advance.
    pub fn on_media_error(&mut self, message: impl Into<String>) {
        self.fail(message.into());
    }

    /// Asynchronous play completion; returns false for a stale token
    pub fn on_play_resolved(&mut self, token: PlayToken) -> bool {
        if self.pending_play != Some(token) {
            tracing::debug!("Ignoring stale play completion {:?}", token);
            return false;
        }
        self.pending_play = None;
        true
    }

    /// Asynchronous play failure; returns false for a stale token
    pub fn on_play_rejected(&mut self, token: PlayToken, message: impl Into<String>) -> bool {
        if self.pending_play != Some(token) {
            tracing::debug!("Ignoring stale play rejection {:?}", token);
            return false;
        }
        self.fail(message.into());
        true
    }

    // ===== Persistence =====

    /// Persist a snapshot if playing and the heartbeat interval has elapsed
    pub fn heartbeat(&mut self) -> bool {
        if !self.is_playing() || self.persistence.is_none() {
            return false;
        }

        let now = self.clock.now_millis();
        let interval = i64::try_from(self.config.heartbeat_interval_ms).unwrap_or(i64::MAX);
        let due = self
            .last_persist_millis
            .map_or(true, |last| now.saturating_sub(last) >= interval);
        if due {
            self.sync_position_from_output();
            self.persist();
        }
        due
    }

    /// Persist a snapshot now, regardless of the heartbeat interval
    ///
    /// Call before the host shuts down so the next session resumes from the
    /// latest position.
    pub fn save_now(&mut self) {
        if self.is_playing() {
            self.sync_position_from_output();
        }
        self.persist();
    }

    /// Seed state from storage: preferences, then a fresh snapshot if any
    ///
    /// Returns true if a snapshot was applied.
    pub fn restore_from_storage(&mut self) -> bool {
        let Some(p) = &self.persistence else {
            return false;
        };
        let volume = p.preferences.volume();
        let mode = p.preferences.mode();
        let snapshot = p.snapshots.load(self.clock.now_millis());

        if let Some(volume) = volume {
            self.volume.set_level(volume);
        }
        if let Some(mode) = mode {
            self.mode = mode;
        }

        let restored = match snapshot {
            Some(snapshot) => {
                self.volume.set_level(snapshot.volume);
                self.mode = snapshot.mode;
                if self.tracks.is_empty() {
                    tracing::debug!("No tracks yet, deferring snapshot restore");
                    self.pending_restore = Some(snapshot);
                    false
                } else {
                    self.restore_track(&snapshot)
                }
            }
            None => false,
        };

        if self.mode == PlaybackMode::Shuffle && !self.shuffle.covers(self.tracks.len()) {
            self.regenerate_shuffle();
        }
        self.audio.set_volume(self.volume.gain());
        self.emit_volume_changed();
        self.events.emit(&PlaybackEvent::ModeChanged { mode: self.mode });
        restored
    }

    /// Apply a snapshot deferred by `restore_from_storage`, if still fresh
    fn apply_pending_restore(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        let Some(snapshot) = self.pending_restore.take() else {
            return;
        };

        let max_age = i64::try_from(self.config.snapshot_freshness_ms).unwrap_or(i64::MAX);
        let age = snapshot.age_millis(self.clock.now_millis());
        if age > max_age {
            tracing::debug!("Deferred snapshot went stale ({} ms old)", age);
            return;
        }
        self.restore_track(&snapshot);
    }

    fn restore_track(&mut self, snapshot: &PlaybackSnapshot) -> bool {
        let index = snapshot
            .track_id
            .as_ref()
            .and_then(|id| self.index_of(id))
            .or(snapshot.current_index.filter(|&i| i < self.tracks.len()));
        let Some(index) = index else {
            tracing::debug!("Snapshot track is not in the current list");
            return false;
        };

        if self.mode == PlaybackMode::Shuffle {
            self.shuffle = ShuffleOrder::generate(self.tracks.len(), Some(index), &mut self.rng);
        }
        if let Err(e) = self.load(index) {
            tracing::warn!("Failed to restore track {}: {}", index, e);
            return false;
        }
        if snapshot.position_seconds > 0.0 {
            if let Err(e) = self.seek_to(snapshot.position_seconds) {
                tracing::warn!("Failed to restore position: {}", e);
            }
        }

        tracing::info!(
            "Restored track {} at {:.1}s ({})",
            index,
            self.position,
            self.mode
        );

        if snapshot.is_playing && self.config.resume_on_restore {
            if let Err(e) = self.play() {
                tracing::warn!("Failed to resume playback: {}", e);
            }
        }
        true
    }

    fn persist(&mut self) {
        let Some(p) = &self.persistence else {
            return;
        };
        // Keep the stored snapshot until the deferred one has been applied
        if self.pending_restore.is_some() {
            return;
        }
        let now = self.clock.now_millis();
        let snapshot = PlaybackSnapshot {
            current_index: self.current_index,
            track_id: self.current_track().map(|t| t.id.clone()),
            position_seconds: self.position,
            is_playing: self.is_playing(),
            mode: self.mode,
            volume: self.volume.level(),
            saved_at_epoch_millis: now,
        };

        match p.snapshots.save(&snapshot) {
            Ok(()) => self.last_persist_millis = Some(now),
            Err(e) => tracing::warn!("Failed to save playback snapshot: {}", e),
        }
    }

    fn record_recent_play(&mut self) {
        if self.recent_recorded {
            return;
        }
        let Some(id) = self.current_track().map(|t| t.id.clone()) else {
            return;
        };
        self.recent_recorded = true;

        if let Some(p) = &self.persistence {
            if let Err(e) = p.recent.record(id, self.clock.now_millis()) {
                tracing::warn!("Failed to record recent play: {}", e);
            }
        }
    }

    // ===== Internal helpers =====

    /// Clamp a dangling index before a transport operation proceeds
    fn ensure_index_valid(&mut self) -> Option<usize> {
        let index = self.current_index?;
        if index < self.tracks.len() {
            return Some(index);
        }

        let clamped = if self.tracks.is_empty() { None } else { Some(0) };
        tracing::debug!("Clamping index {} to {:?}", index, clamped);
        self.current_index = clamped;
        clamped
    }

    fn require_loaded(&mut self) -> Result<usize> {
        if self.tracks.is_empty() {
            return Err(PlaybackError::EmptyTrackList);
        }
        match self.ensure_index_valid() {
            Some(index) if self.status.is_loaded() => Ok(index),
            _ => Err(PlaybackError::NoTrackLoaded),
        }
    }

    fn non_empty_len(&self) -> Result<usize> {
        match self.tracks.len() {
            0 => Err(PlaybackError::EmptyTrackList),
            len => Ok(len),
        }
    }

    fn index_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    fn regenerate_shuffle(&mut self) {
        self.shuffle =
            ShuffleOrder::generate(self.tracks.len(), self.current_index, &mut self.rng);
    }

    fn next_shuffled(&mut self, current: usize) -> usize {
        if !self.shuffle.covers(self.tracks.len()) || self.shuffle.current() != Some(current) {
            self.regenerate_shuffle();
        }
        if let Some(index) = self.shuffle.advance() {
            return index;
        }

        tracing::debug!("Shuffle order exhausted, reshuffling");
        self.regenerate_shuffle();
        self.shuffle.advance().unwrap_or(current)
    }

    fn prev_shuffled(&mut self, current: usize) -> usize {
        if !self.shuffle.covers(self.tracks.len()) || self.shuffle.current() != Some(current) {
            self.regenerate_shuffle();
        }
        if let Some(index) = self.shuffle.retreat() {
            return index;
        }

        self.regenerate_shuffle();
        self.shuffle.jump_to_end().unwrap_or(current)
    }

    /// Restart the current track from 0 without changing state
    fn restart_current(&mut self) {
        self.apply_seek(0.0);
    }

    /// Pause at the current index with position reset (end of a sequence)
    fn stop_at_end(&mut self) {
        self.audio.stop();
        self.position = 0.0;
        self.pending_play = None;
        self.set_status(EngineStatus::Paused);
        self.emit_position_changed();
        self.persist();
    }

    /// Drop the current track entirely (track list became empty)
    fn unload(&mut self) {
        self.audio.stop();
        self.current_index = None;
        self.position = 0.0;
        self.duration = None;
        self.pending_play = None;
        self.shuffle.clear();
        self.set_status(EngineStatus::Idle);
        self.persist();
    }

    fn apply_seek(&mut self, seconds: f64) {
        self.audio.seek(seconds);
        self.position = seconds;
        self.emit_position_changed();
        self.persist();
    }

    fn apply_mute(&mut self) {
        self.audio.set_volume(self.volume.gain());
        self.emit_volume_changed();
    }

    fn fail(&mut self, message: String) {
        tracing::warn!("Playback error: {}", message);
        self.audio.pause();
        self.pending_play = None;
        self.last_error = Some(message.clone());
        self.set_status(EngineStatus::Error);
        self.events.emit(&PlaybackEvent::Error { message });
        self.persist();
    }

    fn sync_position_from_output(&mut self) {
        let position = self.audio.position();
        if position.is_finite() && position >= 0.0 {
            self.position = position;
        }
    }

    fn set_status(&mut self, status: EngineStatus) {
        if self.status != status {
            self.status = status;
            self.events.emit(&PlaybackEvent::StateChanged { status });
        }
    }

    fn emit_position_changed(&self) {
        self.events.emit(&PlaybackEvent::PositionChanged {
            position_seconds: self.position,
            duration_seconds: self.duration,
        });
    }

    fn emit_volume_changed(&self) {
        self.events.emit(&PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }
}

impl std::fmt::Debug for PlaybackEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackEngine")
            .field("tracks", &self.tracks.len())
            .field("current_index", &self.current_index)
            .field("status", &self.status)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

fn known_duration(seconds: f64) -> Option<f64> {
    (seconds.is_finite() && seconds > 0.0).then_some(seconds)
}
