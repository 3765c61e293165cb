//! Catalogue queries used by browsing pages

use crate::types::{Track, TrackId, TrackList};
use std::collections::BTreeSet;

/// Read-only view over a track list with search and tag helpers
#[derive(Debug, Clone)]
pub struct TrackLibrary {
    tracks: TrackList,
}

impl TrackLibrary {
    pub fn new(tracks: TrackList) -> Self {
        Self { tracks }
    }

    /// The underlying shared list
    pub fn tracks(&self) -> &TrackList {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Find a track by id
    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    /// Position of a track in the list
    pub fn index_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Case-insensitive search over title, artist, album and tags
    ///
    /// A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Track> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.tracks.iter().collect();
        }

        self.tracks
            .iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.artist.to_lowercase().contains(&needle)
                    || t.album.to_lowercase().contains(&needle)
                    || t.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Tracks carrying an exact tag
    pub fn by_tag(&self, tag: &str) -> Vec<&Track> {
        self.tracks.iter().filter(|t| t.tags.contains(tag)).collect()
    }

    /// Every tag used in the catalogue, sorted
    pub fn all_tags(&self) -> BTreeSet<&str> {
        self.tracks
            .iter()
            .flat_map(|t| t.tags.iter().map(String::as_str))
            .collect()
    }

    /// First `limit` tracks in catalogue order
    pub fn top(&self, limit: usize) -> &[Track] {
        &self.tracks[..limit.min(self.tracks.len())]
    }
}
