//! Write-through persistence and restore

use harmony_core::{Clock, ManualClock, PlaybackMode, Track, TrackId, TrackList};
use harmony_playback::{AudioOutput, EngineConfig, EngineStatus, PlaybackEngine, SimulatedOutput};
use harmony_storage::{HarmonyStorage, KeyValueStore, MemoryStore, DEFAULT_SNAPSHOT_FRESHNESS};
use std::sync::Arc;

const START: i64 = 1_700_000_000_000;

fn tracks(ids: &[&str]) -> TrackList {
    ids.iter()
        .map(|id| Track::new(*id, format!("{}.mp3", id)).with_duration(240.0))
        .collect()
}

struct Fixture {
    backend: MemoryStore,
    storage: HarmonyStorage,
    clock: ManualClock,
}

impl Fixture {
    fn new() -> Self {
        let backend = MemoryStore::new();
        let storage = HarmonyStorage::new(Arc::new(backend.clone()));
        Self {
            backend,
            storage,
            clock: ManualClock::new(START),
        }
    }

    fn engine(&self, tracks: TrackList, config: EngineConfig) -> (PlaybackEngine, SimulatedOutput) {
        let output = SimulatedOutput::new();
        let engine = PlaybackEngine::new(config, Box::new(output.clone()))
            .with_tracks(tracks)
            .with_storage(&self.storage)
            .with_clock(Arc::new(self.clock.clone()));
        (engine, output)
    }
}

fn played_session(fx: &Fixture) {
    let (mut engine, _) = fx.engine(tracks(&["a", "b", "c"]), EngineConfig::default());
    engine.load(2).unwrap();
    engine.set_mode(PlaybackMode::RepeatAll);
    engine.set_volume(0.3);
    engine.play().unwrap();
    engine.seek_to(30.0).unwrap();
}

#[test]
fn snapshot_round_trips_within_freshness_window() {
    let fx = Fixture::new();
    played_session(&fx);
    fx.clock.advance(60_000);

    let (mut engine, output) = fx.engine(tracks(&["a", "b", "c"]), EngineConfig::default());
    assert!(engine.restore_from_storage());

    assert_eq!(engine.current_index(), Some(2));
    assert_eq!(engine.mode(), PlaybackMode::RepeatAll);
    assert_eq!(engine.volume(), 0.3);
    assert_eq!(engine.position(), 30.0);
    assert!(engine.is_playing());
    assert_eq!(output.position(), 30.0);
    assert_eq!(output.gain(), 0.3);
}

#[test]
fn stale_snapshot_is_discarded_but_preferences_survive() {
    let fx = Fixture::new();
    played_session(&fx);
    let freshness = i64::try_from(DEFAULT_SNAPSHOT_FRESHNESS.as_millis()).unwrap();
    fx.clock.advance(freshness + 1);

    let (mut engine, _) = fx.engine(tracks(&["a", "b", "c"]), EngineConfig::default());
    assert!(!engine.restore_from_storage());

    assert_eq!(engine.current_index(), None);
    assert_eq!(engine.status(), EngineStatus::Idle);
    assert_eq!(engine.volume(), 0.3);
    assert_eq!(engine.mode(), PlaybackMode::RepeatAll);
}

#[test]
fn restore_without_resume_stays_paused() {
    let fx = Fixture::new();
    played_session(&fx);

    let config = EngineConfig {
        resume_on_restore: false,
        ..EngineConfig::default()
    };
    let (mut engine, output) = fx.engine(tracks(&["a", "b", "c"]), config);
    assert!(engine.restore_from_storage());

    assert_eq!(engine.status(), EngineStatus::Paused);
    assert_eq!(output.play_count(), 0);
}

#[test]
fn restore_follows_track_id_into_reordered_list() {
    let fx = Fixture::new();
    played_session(&fx);

    let (mut engine, _) = fx.engine(tracks(&["c", "a", "b"]), EngineConfig::default());
    assert!(engine.restore_from_storage());

    assert_eq!(engine.current_index(), Some(0));
    assert_eq!(engine.current_track().unwrap().id, TrackId::from("c"));
}

#[test]
fn restore_into_shuffle_puts_restored_track_first() {
    let fx = Fixture::new();
    {
        let (mut engine, _) = fx.engine(tracks(&["a", "b", "c", "d"]), EngineConfig::default());
        engine.load(3).unwrap();
        engine.set_mode(PlaybackMode::Shuffle);
    }

    let (mut engine, _) = fx.engine(tracks(&["a", "b", "c", "d"]), EngineConfig::default());
    engine.restore_from_storage();

    assert_eq!(engine.mode(), PlaybackMode::Shuffle);
    assert_eq!(engine.shuffle_order()[0], 3);
    assert_eq!(engine.current_index(), Some(3));
}

#[test]
fn heartbeat_respects_interval() {
    let fx = Fixture::new();
    let (mut engine, output) = fx.engine(tracks(&["a"]), EngineConfig::default());
    engine.load(0).unwrap();
    engine.play().unwrap();

    output.advance(1.0);
    fx.clock.advance(1_000);
    assert!(!engine.heartbeat());

    output.advance(4.0);
    fx.clock.advance(4_000);
    assert!(engine.heartbeat());

    let snapshot = fx
        .storage
        .snapshots(DEFAULT_SNAPSHOT_FRESHNESS)
        .load(fx.clock.now_millis())
        .unwrap();
    assert_eq!(snapshot.position_seconds, 5.0);
    assert!(snapshot.is_playing);

    engine.pause();
    fx.clock.advance(10_000);
    assert!(!engine.heartbeat());
}

#[test]
fn save_now_ignores_heartbeat_interval() {
    let fx = Fixture::new();
    let (mut engine, output) = fx.engine(tracks(&["a"]), EngineConfig::default());
    engine.load(0).unwrap();
    engine.play().unwrap();

    output.advance(2.0);
    fx.clock.advance(2_000);
    assert!(!engine.heartbeat());
    engine.save_now();

    let snapshot = fx
        .storage
        .snapshots(DEFAULT_SNAPSHOT_FRESHNESS)
        .load(fx.clock.now_millis())
        .unwrap();
    assert_eq!(snapshot.position_seconds, 2.0);
    assert!(snapshot.is_playing);
}

#[test]
fn recent_play_recorded_once_per_load() {
    let fx = Fixture::new();
    let (mut engine, _) = fx.engine(tracks(&["a", "b"]), EngineConfig::default());

    engine.load(0).unwrap();
    engine.play().unwrap();
    engine.pause();
    engine.play().unwrap();
    fx.clock.advance(1_000);
    engine.next().unwrap();

    let recent = fx.storage.recent_plays(10).ids();
    assert_eq!(recent, vec![TrackId::from("b"), TrackId::from("a")]);
}

#[test]
fn unavailable_storage_never_breaks_transport() {
    let fx = Fixture::new();
    let (mut engine, _) = fx.engine(tracks(&["a", "b"]), EngineConfig::default());
    fx.backend.set_unavailable(true);

    engine.load(0).unwrap();
    engine.play().unwrap();
    engine.set_volume(0.1);
    engine.set_mode(PlaybackMode::Shuffle);
    engine.next().unwrap();
    assert!(engine.is_playing());
    assert!(!engine.restore_from_storage());
}

#[test]
fn corrupt_snapshot_is_treated_as_absent() {
    let fx = Fixture::new();
    fx.backend
        .set(&fx.storage.keys().now_playing(), "{\"currentIndex\": \"two\"")
        .unwrap();

    let (mut engine, _) = fx.engine(tracks(&["a"]), EngineConfig::default());
    assert!(!engine.restore_from_storage());
    assert_eq!(engine.status(), EngineStatus::Idle);
}
