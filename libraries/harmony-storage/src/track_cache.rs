//! Cached copy of the normalised catalogue

use crate::error::Result;
use crate::kv::{read_json, write_json, KeyValueStore};
use harmony_core::{Track, TrackList};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Default lifetime of a cached catalogue
pub const DEFAULT_TRACK_CACHE_EXPIRY: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CachedTracks {
    tracks: Vec<Track>,
    saved_at_epoch_millis: i64,
}

/// Track-list cache with expiry
#[derive(Clone)]
pub struct TrackCache {
    store: Arc<dyn KeyValueStore>,
    key: String,
    expiry: Duration,
}

impl TrackCache {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, expiry: Duration) -> Self {
        Self {
            store,
            key: key.into(),
            expiry,
        }
    }

    pub fn save(&self, tracks: &[Track], now_millis: i64) -> Result<()> {
        let cached = CachedTracks {
            tracks: tracks.to_vec(),
            saved_at_epoch_millis: now_millis,
        };
        write_json(self.store.as_ref(), &self.key, &cached)
    }

    /// Cached tracks if present and not expired
    ///
    /// An empty cached list counts as a miss.
    pub fn load(&self, now_millis: i64) -> Option<TrackList> {
        let cached: CachedTracks = read_json(self.store.as_ref(), &self.key)?;
        let max_age = i64::try_from(self.expiry.as_millis()).unwrap_or(i64::MAX);
        if now_millis - cached.saved_at_epoch_millis > max_age || cached.tracks.is_empty() {
            return None;
        }
        Some(cached.tracks.into())
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    #[test]
    fn cache_expires_after_an_hour() {
        let cache = TrackCache::new(
            Arc::new(MemoryStore::new()),
            "tc",
            DEFAULT_TRACK_CACHE_EXPIRY,
        );
        let tracks = vec![Track::new("1", "a.mp3").with_duration(61.0)];
        cache.save(&tracks, 0).unwrap();

        let hit = cache.load(30 * 60 * 1000).unwrap();
        assert_eq!(hit[0], tracks[0]);
        assert!(cache.load(60 * 60 * 1000 + 1).is_none());
    }

    #[test]
    fn empty_cache_is_a_miss() {
        let cache = TrackCache::new(Arc::new(MemoryStore::new()), "tc", Duration::from_secs(60));
        cache.save(&[], 0).unwrap();
        assert!(cache.load(0).is_none());
    }
}
