//! Storage key names

/// Key names used by the typed stores
///
/// All keys share a namespace prefix so several apps can share one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    prefix: String,
}

impl StorageKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn key(&self, name: &str) -> String {
        format!("{}.{}", self.prefix, name)
    }

    pub fn now_playing(&self) -> String {
        self.key("now_playing")
    }

    pub fn volume(&self) -> String {
        self.key("volume")
    }

    pub fn mode(&self) -> String {
        self.key("mode")
    }

    pub fn favorites(&self) -> String {
        self.key("favorites")
    }

    pub fn recent_plays(&self) -> String {
        self.key("recent_plays")
    }

    pub fn playlists(&self) -> String {
        self.key("playlists")
    }

    pub fn track_cache(&self) -> String {
        self.key("track_cache")
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new("harmony")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced() {
        let keys = StorageKeys::new("site");
        assert_eq!(keys.now_playing(), "site.now_playing");
        assert_eq!(StorageKeys::default().favorites(), "harmony.favorites");
    }
}
