//! Playback events
//!
//! The engine publishes every state change on an `EventBus`. UI modules
//! subscribe instead of polling; dropping the returned `Subscription`
//! deregisters the listener.
//!
//! Listeners run synchronously while the engine is borrowed, so they must not
//! call back into the engine. Queue the request and dispatch it afterwards.

use crate::types::EngineStatus;
use harmony_core::{PlaybackMode, Track, TrackId};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// Engine state changed
    StateChanged { status: EngineStatus },

    /// A different track was loaded
    TrackChanged {
        index: usize,
        track: Track,
        previous_track_id: Option<TrackId>,
    },

    /// Position or duration changed
    PositionChanged {
        position_seconds: f64,
        duration_seconds: Option<f64>,
    },

    /// Volume or mute changed
    VolumeChanged { level: f64, is_muted: bool },

    /// Playback mode changed
    ModeChanged { mode: PlaybackMode },

    /// Track list was replaced
    TracksChanged { length: usize },

    /// Error occurred during playback
    Error { message: String },
}

type Listener = Box<dyn FnMut(&PlaybackEvent) + Send>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Fan-out of playback events to subscribers
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<Mutex<Listeners>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it stays registered while the handle lives
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&PlaybackEvent) + Send + 'static,
    {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push((id, Box::new(listener)));

        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver an event to every listener in subscription order
    pub fn emit(&self, event: &PlaybackEvent) {
        let mut inner = self.lock();
        for (_, listener) in &mut inner.entries {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.lock().entries.len()
    }

    fn lock(&self) -> MutexGuard<'_, Listeners> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Handle for a registered listener
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    bus: Weak<Mutex<Listeners>>,
}

impl Subscription {
    /// Deregister now (same as dropping the handle)
    pub fn unsubscribe(self) {}

    /// Keep the listener registered for the lifetime of the bus
    pub fn detach(mut self) {
        self.bus = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            let mut inner = bus.lock().unwrap_or_else(PoisonError::into_inner);
            inner.entries.retain(|(id, _)| *id != self.id);
        }
    }
}
