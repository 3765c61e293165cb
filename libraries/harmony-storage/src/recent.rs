//! Recently played tracks
//!
//! Bounded, most-recent-first list of plays. Replaying a track moves its
//! entry to the front instead of adding a duplicate.

use crate::error::Result;
use crate::kv::{read_json, write_json, KeyValueStore};
use harmony_core::TrackId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default number of recent plays kept
pub const DEFAULT_RECENT_CAPACITY: usize = 50;

/// A single play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentPlay {
    pub track_id: TrackId,
    pub played_at_epoch_millis: i64,
}

/// Recent-plays list with bounded size
#[derive(Clone)]
pub struct RecentPlays {
    store: Arc<dyn KeyValueStore>,
    key: String,

    /// Maximum number of entries
    capacity: usize,
}

impl RecentPlays {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, capacity: usize) -> Self {
        Self {
            store,
            key: key.into(),
            capacity,
        }
    }

    /// Record a play at the front of the list
    ///
    /// An existing entry for the same track is removed first; the oldest
    /// entries are discarded beyond capacity.
    pub fn record(&self, track_id: TrackId, now_millis: i64) -> Result<()> {
        let mut entries = self.entries();
        entries.retain(|e| e.track_id != track_id);
        entries.insert(
            0,
            RecentPlay {
                track_id,
                played_at_epoch_millis: now_millis,
            },
        );
        entries.truncate(self.capacity);
        self.save(&entries)
    }

    /// All entries, most recent first
    pub fn entries(&self) -> Vec<RecentPlay> {
        let mut entries: Vec<RecentPlay> =
            read_json(self.store.as_ref(), &self.key).unwrap_or_default();
        entries.truncate(self.capacity);
        entries
    }

    /// Track ids, most recent first
    pub fn ids(&self) -> Vec<TrackId> {
        self.entries().into_iter().map(|e| e.track_id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change capacity
    ///
    /// If new capacity is smaller than current length, oldest entries are discarded
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        self.capacity = capacity;
        let entries = self.entries();
        self.save(&entries)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)
    }

    fn save(&self, entries: &[RecentPlay]) -> Result<()> {
        write_json(self.store.as_ref(), &self.key, entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn recent(capacity: usize) -> RecentPlays {
        RecentPlays::new(Arc::new(MemoryStore::new()), "recent", capacity)
    }

    #[test]
    fn most_recent_first() {
        let plays = recent(10);
        plays.record("1".into(), 100).unwrap();
        plays.record("2".into(), 200).unwrap();
        plays.record("3".into(), 300).unwrap();

        assert_eq!(
            plays.ids(),
            vec![TrackId::from("3"), TrackId::from("2"), TrackId::from("1")]
        );
    }

    #[test]
    fn replay_moves_to_front() {
        let plays = recent(10);
        plays.record("1".into(), 100).unwrap();
        plays.record("2".into(), 200).unwrap();
        plays.record("1".into(), 300).unwrap();

        let entries = plays.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].track_id, TrackId::from("1"));
        assert_eq!(entries[0].played_at_epoch_millis, 300);
    }

    #[test]
    fn bounded_to_capacity() {
        let plays = recent(3);
        for i in 1..=5u64 {
            plays.record(i.into(), i as i64).unwrap();
        }

        // Oldest (1 and 2) discarded
        assert_eq!(
            plays.ids(),
            vec![TrackId::from("5"), TrackId::from("4"), TrackId::from("3")]
        );
    }

    #[test]
    fn shrinking_capacity_trims_oldest() {
        let mut plays = recent(5);
        for i in 1..=5u64 {
            plays.record(i.into(), i as i64).unwrap();
        }

        plays.set_capacity(2).unwrap();
        assert_eq!(plays.capacity(), 2);
        assert_eq!(plays.ids(), vec![TrackId::from("5"), TrackId::from("4")]);
    }

    #[test]
    fn default_capacity() {
        assert_eq!(DEFAULT_RECENT_CAPACITY, 50);
    }
}
