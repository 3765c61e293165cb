//! Favorite tracks

use crate::error::Result;
use crate::kv::{read_json, write_json, KeyValueStore};
use harmony_core::TrackId;
use std::sync::Arc;

/// Set of favorite track ids, kept in the order they were added
///
/// Every call reads through to the backend so independent pages see each
/// other's changes.
#[derive(Clone)]
pub struct Favorites {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl Favorites {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn ids(&self) -> Vec<TrackId> {
        let mut ids: Vec<TrackId> = read_json(self.store.as_ref(), &self.key).unwrap_or_default();
        dedup_in_order(&mut ids);
        ids
    }

    pub fn contains(&self, id: &TrackId) -> bool {
        self.ids().contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    /// Add a favorite; returns false if it was already present
    pub fn add(&self, id: TrackId) -> Result<bool> {
        let mut ids = self.ids();
        if ids.contains(&id) {
            return Ok(false);
        }
        ids.push(id);
        self.save(&ids)?;
        Ok(true)
    }

    /// Remove a favorite; returns false if it was not present
    pub fn remove(&self, id: &TrackId) -> Result<bool> {
        let mut ids = self.ids();
        let before = ids.len();
        ids.retain(|existing| existing != id);
        if ids.len() == before {
            return Ok(false);
        }
        self.save(&ids)?;
        Ok(true)
    }

    /// Flip membership; returns whether the track is now a favorite
    pub fn toggle(&self, id: TrackId) -> Result<bool> {
        if self.remove(&id)? {
            Ok(false)
        } else {
            self.add(id)
        }
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)
    }

    fn save(&self, ids: &[TrackId]) -> Result<()> {
        write_json(self.store.as_ref(), &self.key, ids)
    }
}

fn dedup_in_order(ids: &mut Vec<TrackId>) {
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn favorites() -> Favorites {
        Favorites::new(Arc::new(MemoryStore::new()), "fav")
    }

    #[test]
    fn toggle_adds_then_removes() {
        let favs = favorites();
        let id = TrackId::from("7");

        assert!(favs.toggle(id.clone()).unwrap());
        assert!(favs.contains(&id));
        assert!(!favs.toggle(id.clone()).unwrap());
        assert!(!favs.contains(&id));
    }

    #[test]
    fn add_is_idempotent_and_ordered() {
        let favs = favorites();
        assert!(favs.add("b".into()).unwrap());
        assert!(favs.add("a".into()).unwrap());
        assert!(!favs.add("b".into()).unwrap());

        assert_eq!(favs.ids(), vec![TrackId::from("b"), TrackId::from("a")]);
    }

    #[test]
    fn numeric_ids_from_legacy_data() {
        let backend = MemoryStore::new();
        backend.set("fav", "[1, 2, 2]").unwrap();
        let favs = Favorites::new(Arc::new(backend), "fav");

        assert_eq!(favs.len(), 2);
        assert!(favs.contains(&TrackId::from("2")));
    }
}
