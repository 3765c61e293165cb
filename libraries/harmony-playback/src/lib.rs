//! Harmony - Playback Management
//!
//! Platform-agnostic playback for Harmony.
//!
//! This crate provides:
//! - `PlaybackEngine`: transport state machine (load/play/pause/seek/next/prev)
//! - Playback modes (sequence, repeat all, repeat one, shuffle)
//! - Shuffle orders that visit every track before repeating
//! - Volume and mute
//! - Write-through persistence and restore via `harmony-storage`
//! - `PlayerRegistry`: one authoritative engine per process
//! - Event subscription and the `PlayerView` binding contract
//!
//! # Architecture
//!
//! The engine never talks to a platform directly. Audio goes through the
//! `AudioOutput` trait, stray outputs through `AudioEnvironment`, and time
//! through `harmony_core::Clock`. `SimulatedOutput` is a headless output for
//! tests and the CLI.
//!
//! # Example
//!
//! ```rust
//! use harmony_core::{PlaybackMode, Track};
//! use harmony_playback::{PlayerRegistry, SimulatedOutput};
//!
//! let registry = PlayerRegistry::new(|| Box::new(SimulatedOutput::new()));
//! let tracks = vec![
//!     Track::new("1", "one.mp3").with_duration(180.0),
//!     Track::new("2", "two.mp3").with_duration(200.0),
//! ];
//!
//! let handle = registry.acquire(tracks.into());
//! let mut engine = handle.lock();
//! engine.load(0).unwrap();
//! engine.play().unwrap();
//! engine.set_mode(PlaybackMode::RepeatAll);
//! engine.next().unwrap();
//!
//! assert_eq!(engine.current_index(), Some(1));
//! assert!(engine.is_playing());
//! # drop(engine);
//! # assert!(registry.current().unwrap().ptr_eq(&handle));
//! ```

#![forbid(unsafe_code)]

mod binding;
mod config;
mod engine;
mod error;
mod events;
mod output;
mod registry;
mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use binding::{bind_view, dispatch, ControlAction, PlayerView};
pub use config::EngineConfig;
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use events::{EventBus, PlaybackEvent, Subscription};
pub use output::{AudioEnvironment, AudioOutput, ForeignOutputs, NoopEnvironment, SimulatedOutput};
pub use registry::{AcquirePolicy, EngineHandle, PlayerRegistry};
pub use shuffle::ShuffleOrder;
pub use types::{EngineState, EngineStatus, PlayToken};
pub use volume::{clamp_fraction, Volume};
