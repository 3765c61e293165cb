//! Harmony Core
//!
//! Platform-agnostic types shared by every Harmony crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `PlaybackMode`
//! - **Track Sources**: the `TrackSource` trait plus static and JSON-file
//!   implementations, and `load_tracks` which never fails
//! - **Library Queries**: `TrackLibrary` search and tag helpers
//! - **Time**: the `Clock` trait used to stamp persisted state
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use harmony_core::{load_tracks, StaticTrackSource, TrackLibrary};
//!
//! let source = StaticTrackSource::from_json(
//!     r#"[{"id": 1, "title": "Intro", "duration": "1:30"}]"#,
//! ).unwrap();
//! let tracks = load_tracks(&source);
//!
//! assert_eq!(tracks[0].duration_seconds, 90.0);
//! assert_eq!(TrackLibrary::new(tracks).search("intro").len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod clock;
pub mod error;
pub mod library;
pub mod source;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, Result};
pub use library::TrackLibrary;
pub use source::{load_tracks, normalize, JsonFileTrackSource, StaticTrackSource, TrackSource};
pub use types::{parse_duration, PlaybackMode, RawTrack, Track, TrackId, TrackList};
