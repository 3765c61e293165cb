//! Audio output abstraction
//!
//! The engine owns exactly one `AudioOutput`. Anything else in the
//! environment that can make sound is reached through `AudioEnvironment` and
//! is forced silent whenever the engine starts playback.

use crate::error::{PlaybackError, Result};
use harmony_core::Track;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Platform audio resource driven by the engine
///
/// Completion of `play()` may be asynchronous on some platforms; those report
/// back through `PlaybackEngine::on_play_resolved` / `on_play_rejected`.
pub trait AudioOutput: Send {
    /// Point the output at a track's audio; resets position to 0
    fn load(&mut self, track: &Track) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause, keeping position
    fn pause(&mut self);

    /// Move to `seconds` from the start
    fn seek(&mut self, seconds: f64);

    /// Apply a linear gain in [0, 1]
    fn set_volume(&mut self, gain: f64);

    /// Pause and rewind to the start
    fn stop(&mut self) {
        self.pause();
        self.seek(0.0);
    }

    fn position(&self) -> f64;

    /// Duration if the media metadata is known
    fn duration(&self) -> Option<f64>;

    fn is_audible(&self) -> bool;
}

/// Other audio-capable resources that may be playing
pub trait AudioEnvironment: Send + Sync {
    /// Pause and rewind every foreign output; returns how many were audible
    fn silence_foreign_audio(&self) -> usize;
}

/// Environment with nothing else in it
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnvironment;

impl AudioEnvironment for NoopEnvironment {
    fn silence_foreign_audio(&self) -> usize {
        0
    }
}

/// Known stray outputs, e.g. left over from an earlier player instance
#[derive(Default)]
pub struct ForeignOutputs {
    outputs: Mutex<Vec<Box<dyn AudioOutput>>>,
}

impl ForeignOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, output: Box<dyn AudioOutput>) {
        self.lock().push(output);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Box<dyn AudioOutput>>> {
        self.outputs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AudioEnvironment for ForeignOutputs {
    fn silence_foreign_audio(&self) -> usize {
        let mut silenced = 0;
        for output in self.lock().iter_mut() {
            if output.is_audible() {
                silenced += 1;
            }
            output.stop();
        }
        silenced
    }
}

#[derive(Debug, Default)]
struct SimulatedState {
    track: Option<Track>,
    playing: bool,
    position: f64,
    duration: Option<f64>,
    gain: f64,
    fail_next_load: Option<String>,
    fail_next_play: Option<String>,
    loads: usize,
    plays: usize,
    pauses: usize,
    seeks: usize,
}

/// Headless output that advances time on request
///
/// Clones share state, so a test or driver can keep a handle while the
/// engine owns another.
#[derive(Debug, Clone, Default)]
pub struct SimulatedOutput {
    state: Arc<Mutex<SimulatedState>>,
}

impl SimulatedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance playback by `seconds`; returns true if the track reached its end
    pub fn advance(&self, seconds: f64) -> bool {
        let mut state = self.lock();
        if !state.playing || !seconds.is_finite() || seconds <= 0.0 {
            return false;
        }

        state.position += seconds;
        match state.duration {
            Some(duration) if state.position >= duration => {
                state.position = duration;
                state.playing = false;
                true
            }
            _ => false,
        }
    }

    /// Make the next `load()` fail with `message`
    pub fn fail_next_load(&self, message: impl Into<String>) {
        self.lock().fail_next_load = Some(message.into());
    }

    /// Make the next `play()` fail with `message`
    pub fn fail_next_play(&self, message: impl Into<String>) {
        self.lock().fail_next_play = Some(message.into());
    }

    /// Set (or clear) the media duration, as late metadata would
    pub fn set_duration(&self, duration: Option<f64>) {
        self.lock().duration = duration;
    }

    pub fn loaded_track(&self) -> Option<Track> {
        self.lock().track.clone()
    }

    pub fn gain(&self) -> f64 {
        self.lock().gain
    }

    pub fn load_count(&self) -> usize {
        self.lock().loads
    }

    pub fn play_count(&self) -> usize {
        self.lock().plays
    }

    pub fn pause_count(&self) -> usize {
        self.lock().pauses
    }

    pub fn seek_count(&self) -> usize {
        self.lock().seeks
    }

    fn lock(&self) -> MutexGuard<'_, SimulatedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AudioOutput for SimulatedOutput {
    fn load(&mut self, track: &Track) -> Result<()> {
        let mut state = self.lock();
        state.loads += 1;
        state.playing = false;
        state.position = 0.0;
        if let Some(message) = state.fail_next_load.take() {
            state.track = None;
            state.duration = None;
            return Err(PlaybackError::audio(message));
        }

        state.duration = (track.duration_seconds > 0.0).then_some(track.duration_seconds);
        state.track = Some(track.clone());
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let mut state = self.lock();
        state.plays += 1;
        if let Some(message) = state.fail_next_play.take() {
            state.playing = false;
            return Err(PlaybackError::audio(message));
        }
        if state.track.is_none() {
            return Err(PlaybackError::audio("no source loaded"));
        }
        if state.duration.is_some_and(|d| state.position >= d) {
            state.position = 0.0;
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        let mut state = self.lock();
        state.pauses += 1;
        state.playing = false;
    }

    fn seek(&mut self, seconds: f64) {
        let mut state = self.lock();
        state.seeks += 1;
        let mut target = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        if let Some(duration) = state.duration {
            target = target.min(duration);
        }
        state.position = target;
    }

    fn set_volume(&mut self, gain: f64) {
        self.lock().gain = gain;
    }

    fn position(&self) -> f64 {
        self.lock().position
    }

    fn duration(&self) -> Option<f64> {
        self.lock().duration
    }

    fn is_audible(&self) -> bool {
        let state = self.lock();
        state.playing && state.gain > 0.0
    }
}
