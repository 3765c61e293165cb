mod ids;
mod mode;
mod track;

pub use ids::TrackId;
pub use mode::PlaybackMode;
pub use track::{
    parse_duration, RawTrack, Track, TrackList, DEFAULT_COVER, UNKNOWN_ALBUM, UNKNOWN_ARTIST,
    UNKNOWN_TITLE,
};
