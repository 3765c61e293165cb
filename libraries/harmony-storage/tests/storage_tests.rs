//! File-backed storage tests

use harmony_core::{PlaybackMode, Track, TrackId};
use harmony_storage::{
    HarmonyStorage, JsonFileStore, KeyValueStore, PlaybackSnapshot, StorageKeys,
    DEFAULT_RECENT_CAPACITY, DEFAULT_SNAPSHOT_FRESHNESS, DEFAULT_TRACK_CACHE_EXPIRY,
};
use std::sync::Arc;
use tempfile::TempDir;

fn open(dir: &TempDir) -> HarmonyStorage {
    HarmonyStorage::new(Arc::new(JsonFileStore::open(dir.path().join("state.json"))))
}

#[test]
fn state_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let storage = open(&dir);
        storage.preferences().set_volume(0.35).unwrap();
        storage.preferences().set_mode(PlaybackMode::Shuffle).unwrap();
        storage.favorites().add("7".into()).unwrap();
        storage
            .recent_plays(DEFAULT_RECENT_CAPACITY)
            .record("7".into(), 1_000)
            .unwrap();
        let playlist = storage.playlists().create("Evening").unwrap();
        storage
            .playlists()
            .add_track(&playlist.id, "7".into())
            .unwrap();
        storage
            .snapshots(DEFAULT_SNAPSHOT_FRESHNESS)
            .save(&PlaybackSnapshot {
                current_index: Some(2),
                track_id: Some("7".into()),
                position_seconds: 12.5,
                is_playing: true,
                mode: PlaybackMode::Shuffle,
                volume: 0.35,
                saved_at_epoch_millis: 1_000,
            })
            .unwrap();
    }

    let storage = open(&dir);
    assert_eq!(storage.preferences().volume(), Some(0.35));
    assert_eq!(storage.preferences().mode(), Some(PlaybackMode::Shuffle));
    assert!(storage.favorites().contains(&TrackId::from("7")));
    assert_eq!(
        storage.recent_plays(DEFAULT_RECENT_CAPACITY).ids(),
        vec![TrackId::from("7")]
    );

    let evening = storage.playlists().find_by_name("evening").unwrap();
    assert_eq!(evening.track_ids, vec![TrackId::from("7")]);

    let snapshot = storage
        .snapshots(DEFAULT_SNAPSHOT_FRESHNESS)
        .load(2_000)
        .unwrap();
    assert_eq!(snapshot.current_index, Some(2));
    assert_eq!(snapshot.position_seconds, 12.5);
}

#[test]
fn corrupt_file_opens_empty_and_is_rewritten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = JsonFileStore::open(&path);
    assert_eq!(store.get("anything").unwrap(), None);

    store.set("k", "v").unwrap();
    let reopened = JsonFileStore::open(&path);
    assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn corrupt_value_reads_as_absent() {
    let dir = TempDir::new().unwrap();
    let storage = open(&dir);
    storage
        .backend()
        .set(&storage.keys().favorites(), "[1, 2,")
        .unwrap();

    assert!(storage.favorites().is_empty());
    assert!(storage.favorites().add("1".into()).unwrap());
}

#[test]
fn custom_prefix_isolates_players() {
    let dir = TempDir::new().unwrap();
    let backend: Arc<dyn KeyValueStore> =
        Arc::new(JsonFileStore::open(dir.path().join("state.json")));

    let a = HarmonyStorage::with_keys(Arc::clone(&backend), StorageKeys::new("a"));
    let b = HarmonyStorage::with_keys(backend, StorageKeys::new("b"));

    a.favorites().add("1".into()).unwrap();
    assert!(b.favorites().is_empty());
}

#[test]
fn track_cache_round_trips_through_file() {
    let dir = TempDir::new().unwrap();
    let tracks = vec![
        Track::new("1", "one.mp3").with_title("One").with_tag("calm"),
        Track::new("2", "two.mp3").with_duration(200.0),
    ];
    open(&dir)
        .track_cache(DEFAULT_TRACK_CACHE_EXPIRY)
        .save(&tracks, 0)
        .unwrap();

    let cached = open(&dir)
        .track_cache(DEFAULT_TRACK_CACHE_EXPIRY)
        .load(1_000)
        .unwrap();
    assert_eq!(&cached[..], &tracks[..]);
}
