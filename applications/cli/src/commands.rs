//! Command implementations
//!
//! Each command returns the text to print. Track arguments accept a 1-based
//! position in the catalogue or a track id.

use crate::error::{CliError, Result};
use crate::session::Session;
use crate::view::{format_state, format_time, format_track};
use chrono::{Local, TimeZone};
use harmony_core::{PlaybackMode, TrackId};
use harmony_playback::{PlaybackEngine, PlaybackError};
use harmony_storage::UserPlaylist;

/// Resolve a track argument to an index in the catalogue
pub fn resolve_track(session: &Session, arg: &str) -> Result<usize> {
    let library = session.library();
    if let Ok(number) = arg.parse::<usize>() {
        if (1..=library.len()).contains(&number) {
            return Ok(number - 1);
        }
    }
    library
        .index_of(&TrackId::new(arg))
        .ok_or_else(|| CliError::UnknownTrack(arg.to_string()))
}

/// Acknowledge the engine's outstanding play request
///
/// The simulated output starts synchronously, so the request completes as
/// soon as the command returns.
pub(crate) fn settle(engine: &mut PlaybackEngine) {
    if let Some(token) = engine.pending_play() {
        engine.on_play_resolved(token);
    }
}

fn now_playing(engine: &PlaybackEngine) -> String {
    match (engine.current_index(), engine.current_track()) {
        (Some(index), Some(track)) => format_track(index, track).trim_start().to_string(),
        _ => "(nothing loaded)".to_string(),
    }
}

// ===== Transport =====

pub fn status(session: &Session) -> String {
    format_state(&session.engine().lock().state())
}

pub fn play(session: &Session, track: Option<&str>) -> Result<String> {
    let index = track.map(|arg| resolve_track(session, arg)).transpose()?;
    let mut engine = session.engine().lock();

    match index {
        Some(index) => engine.load(index)?,
        None if engine.current_index().is_none() => {
            if engine.tracks().is_empty() {
                return Err(CliError::Playback(PlaybackError::EmptyTrackList));
            }
            engine.load(0)?;
        }
        None => {}
    }

    if !engine.is_playing() {
        engine.play()?;
    }
    settle(&mut engine);
    Ok(format!("Playing {}", now_playing(&engine)))
}

pub fn pause(session: &Session) -> String {
    let mut engine = session.engine().lock();
    engine.pause();
    format!(
        "Paused at {} ({})",
        format_time(Some(engine.position())),
        now_playing(&engine)
    )
}

pub fn toggle(session: &Session) -> Result<String> {
    let mut engine = session.engine().lock();
    engine.toggle()?;
    settle(&mut engine);
    let verb = if engine.is_playing() { "Playing" } else { "Paused" };
    Ok(format!("{} {}", verb, now_playing(&engine)))
}

pub fn next(session: &Session) -> Result<String> {
    let mut engine = session.engine().lock();
    engine.next()?;
    settle(&mut engine);
    Ok(format!("Next: {}", now_playing(&engine)))
}

pub fn prev(session: &Session) -> Result<String> {
    let mut engine = session.engine().lock();
    engine.prev()?;
    settle(&mut engine);
    Ok(format!("Previous: {}", now_playing(&engine)))
}

/// Parse `m:ss` into seconds; anything else is rejected
fn parse_clock_time(text: &str) -> Option<f64> {
    let (minutes, seconds) = text.split_once(':')?;
    let minutes: f64 = minutes.trim().parse().ok()?;
    let seconds: f64 = seconds.trim().parse().ok()?;
    [minutes, seconds]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0)
        .then_some(minutes * 60.0 + seconds)
}

/// Seek to `40%`, `1:30` or a plain number of seconds
pub fn seek(session: &Session, target: &str) -> Result<String> {
    let target = target.trim();
    let mut engine = session.engine().lock();

    if let Some(percent) = target.strip_suffix('%') {
        let percent: f64 = percent
            .trim()
            .parse()
            .map_err(|_| CliError::InvalidArgument(format!("bad seek percentage: {}", target)))?;
        engine.seek(percent / 100.0)?;
    } else if target.contains(':') {
        let seconds = parse_clock_time(target)
            .ok_or_else(|| CliError::InvalidArgument(format!("bad seek position: {}", target)))?;
        engine.seek_to(seconds)?;
    } else {
        let seconds: f64 = target
            .parse()
            .map_err(|_| CliError::InvalidArgument(format!("bad seek position: {}", target)))?;
        engine.seek_to(seconds)?;
    }

    Ok(format!(
        "Position {} / {}",
        format_time(Some(engine.position())),
        format_time(engine.duration())
    ))
}

/// Show the volume, or set it from a percentage
pub fn volume(session: &Session, percent: Option<f64>) -> String {
    let mut engine = session.engine().lock();
    if let Some(percent) = percent {
        engine.set_volume(percent / 100.0);
    }
    format!(
        "Volume {:.0}%{}",
        engine.volume() * 100.0,
        if engine.is_muted() { " (muted)" } else { "" }
    )
}

pub fn mute(session: &Session) -> String {
    let mut engine = session.engine().lock();
    engine.toggle_mute();
    if engine.is_muted() {
        "Muted".to_string()
    } else {
        format!("Unmuted ({:.0}%)", engine.volume() * 100.0)
    }
}

/// Set the mode, or advance to the next one
pub fn mode(session: &Session, mode: Option<PlaybackMode>) -> String {
    let mut engine = session.engine().lock();
    let mode = match mode {
        Some(mode) => {
            engine.set_mode(mode);
            mode
        }
        None => engine.cycle_mode(),
    };
    format!("Mode {}", mode)
}

// ===== Library =====

pub fn tracks(session: &Session, query: Option<&str>, tag: Option<&str>) -> String {
    let library = session.library();
    if library.is_empty() {
        return "No tracks in the catalogue".to_string();
    }

    let mut matches = library.search(query.unwrap_or(""));
    if let Some(tag) = tag {
        matches.retain(|track| track.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)));
    }
    if matches.is_empty() {
        return "No matching tracks".to_string();
    }

    let favorites = session.storage().favorites();
    matches
        .into_iter()
        .filter_map(|track| {
            let index = library.index_of(&track.id)?;
            let star = if favorites.contains(&track.id) { " *" } else { "" };
            Some(format!("{}{}", format_track(index, track), star))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn tags(session: &Session) -> String {
    let tags = session.library().all_tags();
    if tags.is_empty() {
        return "No tags".to_string();
    }
    tags.into_iter().collect::<Vec<_>>().join(", ")
}

/// Reload the catalogue from disk
pub fn refresh(session: &mut Session) -> String {
    let count = session.refresh_library();
    format!("Loaded {} tracks", count)
}

/// Toggle a favorite; defaults to the current track
pub fn favorite(session: &Session, track: Option<&str>) -> Result<String> {
    let index = match track {
        Some(arg) => resolve_track(session, arg)?,
        None => session
            .engine()
            .lock()
            .current_index()
            .ok_or(CliError::Playback(PlaybackError::NoTrackLoaded))?,
    };
    let track = &session.library().tracks()[index];
    let added = session.storage().favorites().toggle(track.id.clone())?;
    let verb = if added { "Added" } else { "Removed" };
    Ok(format!("{} favorite: {}", verb, track.title))
}

pub fn favorites(session: &Session) -> String {
    let ids = session.storage().favorites().ids();
    if ids.is_empty() {
        return "No favorites".to_string();
    }
    list_ids(session, &ids)
}

pub fn recent(session: &Session, limit: usize) -> String {
    let entries = session
        .storage()
        .recent_plays(session.config().playback.recent_capacity)
        .entries();
    if entries.is_empty() {
        return "Nothing played yet".to_string();
    }

    entries
        .iter()
        .take(limit)
        .map(|entry| {
            let title = session
                .library()
                .get(&entry.track_id)
                .map_or_else(|| format!("(missing) {}", entry.track_id), |t| t.title.clone());
            let when = Local
                .timestamp_millis_opt(entry.played_at_epoch_millis)
                .single()
                .map_or_else(|| "?".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());
            format!("{}  {}", when, title)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn list_ids(session: &Session, ids: &[TrackId]) -> String {
    let library = session.library();
    ids.iter()
        .map(|id| match library.index_of(id) {
            Some(index) => format_track(index, &library.tracks()[index]),
            None => format!("  -. (missing) {}", id),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ===== Playlists =====

fn find_playlist(session: &Session, name_or_id: &str) -> Result<UserPlaylist> {
    let playlists = session.storage().playlists();
    playlists
        .find_by_name(name_or_id)
        .or_else(|| playlists.get(name_or_id))
        .ok_or_else(|| CliError::UnknownPlaylist(name_or_id.to_string()))
}

pub fn playlist_list(session: &Session) -> String {
    let playlists = session.storage().playlists().list();
    if playlists.is_empty() {
        return "No playlists".to_string();
    }
    playlists
        .iter()
        .map(|p| format!("{} ({} tracks)", p.name, p.track_ids.len()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn playlist_create(session: &Session, name: &str) -> Result<String> {
    let playlist = session.storage().playlists().create(name)?;
    Ok(format!("Created playlist '{}' ({})", playlist.name, playlist.id))
}

pub fn playlist_delete(session: &Session, name: &str) -> Result<String> {
    let playlist = find_playlist(session, name)?;
    session.storage().playlists().delete(&playlist.id)?;
    Ok(format!("Deleted playlist '{}'", playlist.name))
}

pub fn playlist_rename(session: &Session, name: &str, new_name: &str) -> Result<String> {
    let playlist = find_playlist(session, name)?;
    let renamed = session.storage().playlists().rename(&playlist.id, new_name)?;
    Ok(format!("Renamed '{}' to '{}'", playlist.name, renamed.name))
}

pub fn playlist_add(session: &Session, name: &str, track: &str) -> Result<String> {
    let playlist = find_playlist(session, name)?;
    let index = resolve_track(session, track)?;
    let track = &session.library().tracks()[index];
    let added = session
        .storage()
        .playlists()
        .add_track(&playlist.id, track.id.clone())?;
    Ok(if added {
        format!("Added '{}' to '{}'", track.title, playlist.name)
    } else {
        format!("'{}' is already in '{}'", track.title, playlist.name)
    })
}

pub fn playlist_remove(session: &Session, name: &str, track: &str) -> Result<String> {
    let playlist = find_playlist(session, name)?;
    // Removal accepts ids that are no longer in the catalogue
    let track_id = match resolve_track(session, track) {
        Ok(index) => session.library().tracks()[index].id.clone(),
        Err(_) => TrackId::new(track),
    };
    let removed = session
        .storage()
        .playlists()
        .remove_track(&playlist.id, &track_id)?;
    Ok(if removed {
        format!("Removed {} from '{}'", track_id, playlist.name)
    } else {
        format!("{} is not in '{}'", track_id, playlist.name)
    })
}

pub fn playlist_show(session: &Session, name: &str) -> Result<String> {
    let playlist = find_playlist(session, name)?;
    if playlist.track_ids.is_empty() {
        return Ok(format!("{} (empty)", playlist.name));
    }
    Ok(format!(
        "{}\n{}",
        playlist.name,
        list_ids(session, &playlist.track_ids)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use harmony_core::ManualClock;
    use std::sync::Arc;
    use tempfile::TempDir;

    const CATALOGUE: &str = r#"[
        {"id": "a", "title": "Alpha", "artist": "One", "duration": "1:00", "tags": ["calm"]},
        {"id": "b", "title": "Beta", "artist": "Two", "duration": "2:00", "tags": ["loud"]},
        {"id": "c", "title": "Gamma", "artist": "Three", "duration": "3:00"}
    ]"#;

    fn session(dir: &TempDir) -> Session {
        let catalogue = dir.path().join("tracks.json");
        std::fs::write(&catalogue, CATALOGUE).unwrap();
        let mut config = AppConfig::default();
        config.library.catalogue = catalogue;
        config.storage.state_file = dir.path().join("state.json");
        Session::open_with_clock(config, Arc::new(ManualClock::new(1_700_000_000_000))).unwrap()
    }

    #[test]
    fn resolves_numbers_and_ids() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir);
        assert_eq!(resolve_track(&session, "1").unwrap(), 0);
        assert_eq!(resolve_track(&session, "c").unwrap(), 2);
        assert!(matches!(
            resolve_track(&session, "4"),
            Err(CliError::UnknownTrack(_))
        ));
    }

    #[test]
    fn play_starts_first_track_and_settles() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir);
        let text = play(&session, None).unwrap();
        assert!(text.contains("Alpha"));

        let engine = session.engine().lock();
        assert!(engine.is_playing());
        assert_eq!(engine.pending_play(), None);
    }

    #[test]
    fn seek_accepts_three_forms() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir);
        play(&session, Some("b")).unwrap();

        seek(&session, "50%").unwrap();
        assert_eq!(session.engine().lock().position(), 60.0);
        seek(&session, "1:30").unwrap();
        assert_eq!(session.engine().lock().position(), 90.0);
        seek(&session, "15").unwrap();
        assert_eq!(session.engine().lock().position(), 15.0);
        assert!(matches!(
            seek(&session, "soon"),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn malformed_clock_time_is_rejected_without_moving() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir);
        play(&session, Some("b")).unwrap();
        seek(&session, "45").unwrap();

        for bad in ["a:b", "1:2:3", ":30", "1:", "-1:00", "1:inf"] {
            assert!(
                matches!(seek(&session, bad), Err(CliError::InvalidArgument(_))),
                "{bad} should be rejected"
            );
            assert_eq!(session.engine().lock().position(), 45.0);
        }
    }

    #[test]
    fn tag_filter_and_favorite_marker() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir);
        favorite(&session, Some("b")).unwrap();

        let listing = tracks(&session, None, Some("loud"));
        assert_eq!(listing, "  2. Beta - Two [2:00] *");
        assert_eq!(tags(&session), "calm, loud");
    }

    #[test]
    fn favorite_without_track_needs_a_loaded_one() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir);
        assert!(favorite(&session, None).is_err());

        play(&session, Some("3")).unwrap();
        assert_eq!(favorite(&session, None).unwrap(), "Added favorite: Gamma");
        assert_eq!(favorite(&session, None).unwrap(), "Removed favorite: Gamma");
    }

    #[test]
    fn playlist_lifecycle() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir);

        playlist_create(&session, "Road").unwrap();
        playlist_add(&session, "road", "1").unwrap();
        assert!(playlist_add(&session, "Road", "a").unwrap().contains("already"));
        playlist_rename(&session, "Road", "Trip").unwrap();

        let shown = playlist_show(&session, "trip").unwrap();
        assert_eq!(shown, "Trip\n  1. Alpha - One [1:00]");

        playlist_remove(&session, "Trip", "a").unwrap();
        assert_eq!(playlist_show(&session, "Trip").unwrap(), "Trip (empty)");

        playlist_delete(&session, "Trip").unwrap();
        assert!(matches!(
            playlist_show(&session, "Trip"),
            Err(CliError::UnknownPlaylist(_))
        ));
    }

    #[test]
    fn mode_cycles_without_argument() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir);
        assert_eq!(mode(&session, None), "Mode repeat_all");
        assert_eq!(mode(&session, Some(PlaybackMode::Shuffle)), "Mode shuffle");
    }
}
