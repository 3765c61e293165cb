//! Track sources
//!
//! A `TrackSource` hands back raw catalogue records. It may fail or return an
//! empty list; `load_tracks` absorbs both so that start-up never fails on a
//! missing catalogue.

use crate::error::{CoreError, Result};
use crate::types::{RawTrack, Track, TrackList};
use std::path::{Path, PathBuf};

/// Supplier of raw track records
pub trait TrackSource: Send + Sync {
    /// Fetch the ordered catalogue
    fn fetch_tracks(&self) -> Result<Vec<RawTrack>>;
}

/// In-memory catalogue
#[derive(Debug, Clone, Default)]
pub struct StaticTrackSource {
    records: Vec<RawTrack>,
}

impl StaticTrackSource {
    pub fn new(records: Vec<RawTrack>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of records
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(parse_catalogue(json)?))
    }
}

impl TrackSource for StaticTrackSource {
    fn fetch_tracks(&self) -> Result<Vec<RawTrack>> {
        Ok(self.records.clone())
    }
}

/// Catalogue stored as a JSON array on disk (e.g. `data/tracks.json`)
#[derive(Debug, Clone)]
pub struct JsonFileTrackSource {
    path: PathBuf,
}

impl JsonFileTrackSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TrackSource for JsonFileTrackSource {
    fn fetch_tracks(&self) -> Result<Vec<RawTrack>> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            CoreError::unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        parse_catalogue(&text)
    }
}

fn parse_catalogue(json: &str) -> Result<Vec<RawTrack>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(items) = value else {
        return Err(CoreError::invalid_data("catalogue is not an array"));
    };

    // Skip records that are not objects instead of rejecting the catalogue
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawTrack>(item) {
            Ok(raw) => Some(raw),
            Err(e) => {
                tracing::warn!("Skipping malformed track record: {}", e);
                None
            }
        })
        .collect())
}

/// Normalise raw records into tracks
pub fn normalize(records: Vec<RawTrack>) -> Vec<Track> {
    records
        .into_iter()
        .enumerate()
        .map(|(position, raw)| Track::from_raw(raw, position))
        .collect()
}

/// Fetch and normalise a catalogue, falling back to an empty list
pub fn load_tracks(source: &dyn TrackSource) -> TrackList {
    match source.fetch_tracks() {
        Ok(records) => {
            let tracks = normalize(records);
            tracing::debug!("Loaded {} tracks", tracks.len());
            tracks.into()
        }
        Err(e) => {
            tracing::warn!("Track source failed, continuing with an empty list: {}", e);
            Vec::new().into()
        }
    }
}
