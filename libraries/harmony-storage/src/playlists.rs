//! User playlists: named collections of track ids

use crate::error::{Result, StorageError};
use crate::kv::{read_json, write_json, KeyValueStore};
use harmony_core::TrackId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// A user-created playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPlaylist {
    /// Stable identifier (survives renames)
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub track_ids: Vec<TrackId>,
}

/// Persistent collection of user playlists
#[derive(Clone)]
pub struct PlaylistStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl PlaylistStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn list(&self) -> Vec<UserPlaylist> {
        read_json(self.store.as_ref(), &self.key).unwrap_or_default()
    }

    pub fn get(&self, id: &str) -> Option<UserPlaylist> {
        self.list().into_iter().find(|p| p.id == id)
    }

    /// Case-insensitive lookup by name
    pub fn find_by_name(&self, name: &str) -> Option<UserPlaylist> {
        let name = name.trim();
        self.list()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Create an empty playlist with a unique, non-blank name
    pub fn create(&self, name: &str) -> Result<UserPlaylist> {
        let name = validate_name(name)?;
        let mut playlists = self.list();
        ensure_unique(&playlists, &name, None)?;

        let playlist = UserPlaylist {
            id: Uuid::new_v4().to_string(),
            name,
            track_ids: Vec::new(),
        };
        playlists.push(playlist.clone());
        self.save(&playlists)?;
        Ok(playlist)
    }

    pub fn rename(&self, id: &str, name: &str) -> Result<UserPlaylist> {
        let name = validate_name(name)?;
        let mut playlists = self.list();
        ensure_unique(&playlists, &name, Some(id))?;

        let playlist = find_mut(&mut playlists, id)?;
        playlist.name = name;
        let renamed = playlist.clone();
        self.save(&playlists)?;
        Ok(renamed)
    }

    /// Delete a playlist; returns false if it did not exist
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut playlists = self.list();
        let before = playlists.len();
        playlists.retain(|p| p.id != id);
        if playlists.len() == before {
            return Ok(false);
        }
        self.save(&playlists)?;
        Ok(true)
    }

    /// Append a track; returns false if the playlist already contains it
    pub fn add_track(&self, id: &str, track_id: TrackId) -> Result<bool> {
        let mut playlists = self.list();
        let playlist = find_mut(&mut playlists, id)?;
        if playlist.track_ids.contains(&track_id) {
            return Ok(false);
        }
        playlist.track_ids.push(track_id);
        self.save(&playlists)?;
        Ok(true)
    }

    /// Remove a track; returns false if it was not in the playlist
    pub fn remove_track(&self, id: &str, track_id: &TrackId) -> Result<bool> {
        let mut playlists = self.list();
        let playlist = find_mut(&mut playlists, id)?;
        let before = playlist.track_ids.len();
        playlist.track_ids.retain(|t| t != track_id);
        if playlist.track_ids.len() == before {
            return Ok(false);
        }
        self.save(&playlists)?;
        Ok(true)
    }

    fn save(&self, playlists: &[UserPlaylist]) -> Result<()> {
        write_json(self.store.as_ref(), &self.key, playlists)
    }
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StorageError::Playlist("name must not be blank".to_string()));
    }
    Ok(name.to_string())
}

fn ensure_unique(playlists: &[UserPlaylist], name: &str, except_id: Option<&str>) -> Result<()> {
    let clash = playlists
        .iter()
        .any(|p| p.name.eq_ignore_ascii_case(name) && Some(p.id.as_str()) != except_id);
    if clash {
        return Err(StorageError::Playlist(format!(
            "a playlist named '{}' already exists",
            name
        )));
    }
    Ok(())
}

fn find_mut<'a>(playlists: &'a mut [UserPlaylist], id: &str) -> Result<&'a mut UserPlaylist> {
    playlists
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| StorageError::not_found("Playlist", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn playlists() -> PlaylistStore {
        PlaylistStore::new(Arc::new(MemoryStore::new()), "pl")
    }

    #[test]
    fn create_and_fill_playlist() {
        let store = playlists();
        let road = store.create("Road Trip").unwrap();

        assert!(store.add_track(&road.id, "1".into()).unwrap());
        assert!(store.add_track(&road.id, "2".into()).unwrap());
        assert!(!store.add_track(&road.id, "1".into()).unwrap());

        let loaded = store.get(&road.id).unwrap();
        assert_eq!(loaded.track_ids, vec![TrackId::from("1"), TrackId::from("2")]);
    }

    #[test]
    fn names_are_unique_and_non_blank() {
        let store = playlists();
        store.create("Chill").unwrap();

        assert!(matches!(store.create("chill"), Err(StorageError::Playlist(_))));
        assert!(matches!(store.create("   "), Err(StorageError::Playlist(_))));
    }

    #[test]
    fn rename_keeps_id() {
        let store = playlists();
        let p = store.create("Old").unwrap();
        let renamed = store.rename(&p.id, "New").unwrap();

        assert_eq!(renamed.id, p.id);
        assert!(store.find_by_name("new").is_some());
        assert!(store.find_by_name("old").is_none());

        // Renaming to its own name (different case) is allowed
        assert!(store.rename(&p.id, "NEW").is_ok());
    }

    #[test]
    fn remove_and_delete() {
        let store = playlists();
        let p = store.create("Gym").unwrap();
        store.add_track(&p.id, "9".into()).unwrap();

        assert!(store.remove_track(&p.id, &TrackId::from("9")).unwrap());
        assert!(!store.remove_track(&p.id, &TrackId::from("9")).unwrap());

        assert!(store.delete(&p.id).unwrap());
        assert!(!store.delete(&p.id).unwrap());
        assert!(matches!(
            store.add_track(&p.id, "1".into()),
            Err(StorageError::NotFound { .. })
        ));
    }
}
