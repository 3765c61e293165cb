/// ID types for Harmony entities
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Track identifier
///
/// Catalogues in the wild use both string and numeric ids, so deserialisation
/// accepts either and normalises to a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TrackId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for TrackId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl<'de> Deserialize<'de> for TrackId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = match RawId::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Unsigned(n) => n.to_string(),
            RawId::Signed(n) => n.to_string(),
            RawId::Float(n) => n.to_string(),
        };
        Ok(Self(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_string_and_number() {
        let ids: Vec<TrackId> = serde_json::from_str(r#"["a1", 7, -3]"#).unwrap();
        assert_eq!(ids[0].as_str(), "a1");
        assert_eq!(ids[1].as_str(), "7");
        assert_eq!(ids[2].as_str(), "-3");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&TrackId::from(42)).unwrap();
        assert_eq!(json, "\"42\"");
    }
}
