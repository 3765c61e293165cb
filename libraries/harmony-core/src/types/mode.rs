/// Playback mode shared by the engine and persisted preferences
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the engine chooses the next track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// Play the list once, stop after the last track
    #[default]
    #[serde(alias = "none", alias = "off")]
    Sequence,

    /// Loop the entire list
    #[serde(alias = "loop", alias = "all")]
    RepeatAll,

    /// Loop the current track
    #[serde(alias = "single", alias = "one")]
    RepeatOne,

    /// Visit every track once in random order, then reshuffle
    Shuffle,
}

impl PlaybackMode {
    /// All modes in cycle order
    pub const ALL: [PlaybackMode; 4] = [
        PlaybackMode::Sequence,
        PlaybackMode::RepeatAll,
        PlaybackMode::RepeatOne,
        PlaybackMode::Shuffle,
    ];

    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::RepeatAll => "repeat_all",
            Self::RepeatOne => "repeat_one",
            Self::Shuffle => "shuffle",
        }
    }

    /// Next mode for a single "mode" button
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::Sequence => Self::RepeatAll,
            Self::RepeatAll => Self::RepeatOne,
            Self::RepeatOne => Self::Shuffle,
            Self::Shuffle => Self::Sequence,
        }
    }
}

impl FromStr for PlaybackMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "sequence" | "none" | "off" => Ok(Self::Sequence),
            "repeat_all" | "loop" | "all" => Ok(Self::RepeatAll),
            "repeat_one" | "single" | "one" => Ok(Self::RepeatOne),
            "shuffle" => Ok(Self::Shuffle),
            _ => Err(CoreError::UnknownMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_visits_every_mode() {
        let mut mode = PlaybackMode::Sequence;
        for expected in PlaybackMode::ALL.iter().skip(1) {
            mode = mode.cycle();
            assert_eq!(mode, *expected);
        }
        assert_eq!(mode.cycle(), PlaybackMode::Sequence);
    }

    #[test]
    fn parses_legacy_names() {
        assert_eq!("loop".parse::<PlaybackMode>().unwrap(), PlaybackMode::RepeatAll);
        assert_eq!("single".parse::<PlaybackMode>().unwrap(), PlaybackMode::RepeatOne);
        assert_eq!("Repeat-One".parse::<PlaybackMode>().unwrap(), PlaybackMode::RepeatOne);
        assert!("bogus".parse::<PlaybackMode>().is_err());
    }

    #[test]
    fn serde_round_trip_uses_snake_case() {
        let json = serde_json::to_string(&PlaybackMode::RepeatAll).unwrap();
        assert_eq!(json, "\"repeat_all\"");
        let legacy: PlaybackMode = serde_json::from_str("\"loop\"").unwrap();
        assert_eq!(legacy, PlaybackMode::RepeatAll);
    }
}
