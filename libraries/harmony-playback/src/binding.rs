//! UI binding contract
//!
//! A `PlayerView` renders engine state; every hook has a no-op default so a
//! page implements only the controls it actually shows. User gestures come
//! back as `ControlAction`s and go through `dispatch`.

use crate::{
    engine::PlaybackEngine,
    error::Result,
    events::{PlaybackEvent, Subscription},
    types::EngineStatus,
};
use harmony_core::{PlaybackMode, Track};

/// Rendering side of a UI module
#[allow(unused_variables)]
pub trait PlayerView: Send {
    fn render_track(&mut self, index: usize, track: &Track) {}

    fn render_status(&mut self, status: EngineStatus) {}

    fn render_position(&mut self, position_seconds: f64, duration_seconds: Option<f64>) {}

    fn render_volume(&mut self, level: f64, is_muted: bool) {}

    fn render_mode(&mut self, mode: PlaybackMode) {}

    fn render_track_count(&mut self, count: usize) {}

    fn render_error(&mut self, message: &str) {}
}

/// Render the current state into `view`, then keep it updated
///
/// The view stays bound while the returned subscription lives.
#[must_use = "dropping the Subscription unbinds the view"]
pub fn bind_view<V>(engine: &PlaybackEngine, mut view: V) -> Subscription
where
    V: PlayerView + 'static,
{
    let state = engine.state();
    if let (Some(index), Some(track)) = (state.current_index, &state.current_track) {
        view.render_track(index, track);
    }
    view.render_status(state.status);
    view.render_position(state.position_seconds, state.duration_seconds);
    view.render_volume(state.volume, state.is_muted);
    view.render_mode(state.mode);
    view.render_track_count(state.track_count);
    if let Some(message) = &state.last_error {
        view.render_error(message);
    }

    engine.subscribe(move |event| render_event(&mut view, event))
}

fn render_event<V: PlayerView>(view: &mut V, event: &PlaybackEvent) {
    match event {
        PlaybackEvent::StateChanged { status } => view.render_status(*status),
        PlaybackEvent::TrackChanged { index, track, .. } => view.render_track(*index, track),
        PlaybackEvent::PositionChanged {
            position_seconds,
            duration_seconds,
        } => view.render_position(*position_seconds, *duration_seconds),
        PlaybackEvent::VolumeChanged { level, is_muted } => view.render_volume(*level, *is_muted),
        PlaybackEvent::ModeChanged { mode } => view.render_mode(*mode),
        PlaybackEvent::TracksChanged { length } => view.render_track_count(*length),
        PlaybackEvent::Error { message } => view.render_error(message),
    }
}

/// User gesture relayed from a control
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    TogglePlay,
    Next,
    Prev,
    /// Seek to a fraction of the duration
    SeekFraction(f64),
    /// Set volume to a fraction
    VolumeFraction(f64),
    CycleMode,
    ToggleMute,
}

/// Apply a control action to the engine
pub fn dispatch(engine: &mut PlaybackEngine, action: ControlAction) -> Result<()> {
    match action {
        ControlAction::TogglePlay => engine.toggle(),
        ControlAction::Next => engine.next(),
        ControlAction::Prev => engine.prev(),
        ControlAction::SeekFraction(fraction) => engine.seek(fraction),
        ControlAction::VolumeFraction(fraction) => {
            engine.set_volume(fraction);
            Ok(())
        }
        ControlAction::CycleMode => {
            engine.cycle_mode();
            Ok(())
        }
        ControlAction::ToggleMute => {
            engine.toggle_mute();
            Ok(())
        }
    }
}
