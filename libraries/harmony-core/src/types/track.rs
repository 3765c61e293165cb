/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Placeholder title for records without one
pub const UNKNOWN_TITLE: &str = "Unknown Title";
/// Placeholder artist for records without one
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
/// Placeholder album for records without one
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
/// Cover shown when a record has no artwork
pub const DEFAULT_COVER: &str = "images/default-cover.png";

/// Shared, immutable track list
///
/// Engines hold a reference to the list rather than owning a copy; two lists
/// are "the same" only if they share an allocation (`Arc::ptr_eq`).
pub type TrackList = Arc<[Track]>;

/// Audio track
///
/// Immutable once loaded from a `TrackSource`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier within its source
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Duration in seconds (0 when unknown)
    pub duration_seconds: f64,

    /// Location of the audio file
    pub audio_uri: String,

    /// Location of the cover image
    pub cover_uri: String,

    /// Free-form tags
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Track {
    /// Create a track with placeholder metadata
    pub fn new(id: impl Into<TrackId>, audio_uri: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: UNKNOWN_TITLE.to_string(),
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            duration_seconds: 0.0,
            audio_uri: audio_uri.into(),
            cover_uri: DEFAULT_COVER.to_string(),
            tags: BTreeSet::new(),
        }
    }

    /// Builder-style title setter
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder-style artist setter
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Builder-style duration setter
    #[must_use]
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration_seconds = sanitize_seconds(seconds);
        self
    }

    /// Builder-style tag setter
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Normalise a raw catalogue record
    ///
    /// `position` is the record's index in its source and seeds the fallback id.
    pub fn from_raw(raw: RawTrack, position: usize) -> Self {
        let duration_seconds = raw
            .duration_in_seconds
            .as_ref()
            .and_then(serde_json::Value::as_f64)
            .map(sanitize_seconds)
            .or_else(|| raw.duration.as_ref().map(duration_from_value))
            .unwrap_or(0.0);

        let tags = match raw.tags {
            Some(serde_json::Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => BTreeSet::new(),
        };

        Self {
            id: raw
                .id
                .unwrap_or_else(|| TrackId::new(format!("track_{}", position))),
            title: non_empty_or(raw.title, UNKNOWN_TITLE),
            artist: non_empty_or(raw.artist, UNKNOWN_ARTIST),
            album: non_empty_or(raw.album, UNKNOWN_ALBUM),
            duration_seconds,
            audio_uri: raw.audio_uri.unwrap_or_default(),
            cover_uri: non_empty_or(raw.cover_uri, DEFAULT_COVER),
            tags,
        }
    }
}

/// Track record as it appears in a catalogue
///
/// Every field is optional; `Track::from_raw` fills in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrack {
    #[serde(default)]
    pub id: Option<TrackId>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub artist: Option<String>,

    #[serde(default)]
    pub album: Option<String>,

    /// "mm:ss" string or a number of seconds
    #[serde(default)]
    pub duration: Option<serde_json::Value>,

    #[serde(default)]
    pub duration_in_seconds: Option<serde_json::Value>,

    #[serde(default, alias = "audioPath", alias = "src")]
    pub audio_uri: Option<String>,

    #[serde(default, alias = "coverImagePath", alias = "cover")]
    pub cover_uri: Option<String>,

    #[serde(default)]
    pub tags: Option<serde_json::Value>,
}

/// Parse a "mm:ss" duration string into seconds
///
/// Anything other than exactly two numeric parts parses to 0.
pub fn parse_duration(text: &str) -> f64 {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() != 2 {
        return 0.0;
    }

    match (parts[0].trim().parse::<f64>(), parts[1].trim().parse::<f64>()) {
        (Ok(minutes), Ok(seconds)) => sanitize_seconds(minutes * 60.0 + seconds),
        _ => 0.0,
    }
}

fn duration_from_value(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::String(s) => parse_duration(s),
        serde_json::Value::Number(n) => n.as_f64().map_or(0.0, sanitize_seconds),
        _ => 0.0,
    }
}

fn sanitize_seconds(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => fallback.to_string(),
    }
}
