//! Harmony Storage
//!
//! Durable key/value persistence for player state, surviving reloads.
//!
//! The backend is a plain string key/value store (`KeyValueStore`), the same
//! shape as browser local storage. Typed stores add JSON encoding and the
//! rules for each kind of data:
//!
//! - `SnapshotStore`: resumable "now playing" state with a freshness window
//! - `PreferenceStore`: volume and mode, no expiry
//! - `Favorites`, `RecentPlays`, `PlaylistStore`: library state
//! - `TrackCache`: normalised catalogue with a one-hour expiry
//!
//! Reads never fail: absent, unreadable or malformed values are logged and
//! treated as absent.

#![forbid(unsafe_code)]

mod error;
mod favorites;
mod keys;
mod kv;
mod playlists;
mod preferences;
mod recent;
mod snapshot;
mod track_cache;

pub use error::{Result, StorageError};
pub use favorites::Favorites;
pub use keys::StorageKeys;
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use playlists::{PlaylistStore, UserPlaylist};
pub use preferences::PreferenceStore;
pub use recent::{RecentPlay, RecentPlays, DEFAULT_RECENT_CAPACITY};
pub use snapshot::{PlaybackSnapshot, SnapshotStore, DEFAULT_SNAPSHOT_FRESHNESS};
pub use track_cache::{TrackCache, DEFAULT_TRACK_CACHE_EXPIRY};

use std::sync::Arc;
use std::time::Duration;

/// Entry point handing out typed stores over one backend
#[derive(Clone)]
pub struct HarmonyStorage {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl HarmonyStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_keys(store, StorageKeys::default())
    }

    pub fn with_keys(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    /// Volatile storage, for tests and pages that must not persist
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn snapshots(&self, freshness: Duration) -> SnapshotStore {
        SnapshotStore::new(Arc::clone(&self.store), self.keys.now_playing(), freshness)
    }

    pub fn preferences(&self) -> PreferenceStore {
        PreferenceStore::new(
            Arc::clone(&self.store),
            self.keys.volume(),
            self.keys.mode(),
        )
    }

    pub fn favorites(&self) -> Favorites {
        Favorites::new(Arc::clone(&self.store), self.keys.favorites())
    }

    pub fn recent_plays(&self, capacity: usize) -> RecentPlays {
        RecentPlays::new(Arc::clone(&self.store), self.keys.recent_plays(), capacity)
    }

    pub fn playlists(&self) -> PlaylistStore {
        PlaylistStore::new(Arc::clone(&self.store), self.keys.playlists())
    }

    pub fn track_cache(&self, expiry: Duration) -> TrackCache {
        TrackCache::new(Arc::clone(&self.store), self.keys.track_cache(), expiry)
    }
}
