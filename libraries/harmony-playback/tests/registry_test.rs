//! Registry tests: one authoritative engine per process

use harmony_core::{ManualClock, Track, TrackList};
use harmony_playback::{
    AcquirePolicy, AudioOutput, ForeignOutputs, PlayerRegistry, SimulatedOutput,
};
use harmony_storage::HarmonyStorage;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn tracks(ids: &[&str]) -> TrackList {
    ids.iter()
        .map(|id| Track::new(*id, format!("{}.mp3", id)).with_duration(90.0))
        .collect()
}

/// Registry whose factory counts how many outputs it builds
fn counting_registry() -> (PlayerRegistry, Arc<AtomicUsize>) {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let registry = PlayerRegistry::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Box::new(SimulatedOutput::new()) as Box<dyn AudioOutput>
    });
    (registry, built)
}

#[test]
fn every_acquire_returns_the_same_engine() {
    let (registry, built) = counting_registry();
    let first = registry.acquire(tracks(&["a"]));

    for _ in 0..10 {
        let again = registry.acquire(tracks(&["a"]));
        assert!(again.ptr_eq(&first));
        assert!(registry.current().unwrap().ptr_eq(&first));
    }
    assert_eq!(built.load(Ordering::SeqCst), 1);
}

#[test]
fn second_module_attaches_without_replacing_list() {
    let (registry, built) = counting_registry();
    let home = tracks(&["a", "b", "c"]);
    let playlist_page = tracks(&["x", "y"]);

    let engine = registry.acquire(Arc::clone(&home));
    engine.with(|e| {
        e.load(1).unwrap();
        e.play().unwrap();
    });

    let other = registry.acquire(playlist_page.clone());

    assert!(other.ptr_eq(&engine));
    assert_eq!(built.load(Ordering::SeqCst), 1);
    let e = engine.lock();
    assert!(Arc::ptr_eq(e.tracks(), &home));
    assert_eq!(e.current_index(), Some(1));
    assert!(e.is_playing());
}

/// Registry over shared storage, as one page load would build it
fn persistent_registry(storage: &HarmonyStorage, clock: &ManualClock) -> PlayerRegistry {
    PlayerRegistry::new(|| Box::new(SimulatedOutput::new()) as Box<dyn AudioOutput>)
        .with_storage(storage.clone())
        .with_clock(Arc::new(clock.clone()))
}

fn previous_session(storage: &HarmonyStorage, clock: &ManualClock) {
    let registry = persistent_registry(storage, clock);
    let engine = registry.acquire(tracks(&["a", "b", "c"]));
    engine.with(|e| {
        e.load(2).unwrap();
        e.play().unwrap();
        e.seek_to(30.0).unwrap();
    });
}

#[test]
fn snapshot_applies_when_tracks_arrive_after_construction() {
    let storage = HarmonyStorage::in_memory();
    let clock = ManualClock::new(1_700_000_000_000);
    previous_session(&storage, &clock);
    clock.advance(10_000);

    let registry = persistent_registry(&storage, &clock);
    let engine = registry.acquire(tracks(&[]));
    engine.with(|e| {
        assert_eq!(e.current_index(), None);
        e.set_volume(0.4);
    });

    clock.advance(2_000);
    let same = registry.acquire(tracks(&["a", "b", "c"]));
    assert!(same.ptr_eq(&engine));

    let e = engine.lock();
    assert_eq!(e.current_index(), Some(2));
    assert_eq!(e.position(), 30.0);
    assert!(e.is_playing());
    assert_eq!(e.volume(), 0.4);
}

#[test]
fn deferred_snapshot_expires_like_a_stored_one() {
    let storage = HarmonyStorage::in_memory();
    let clock = ManualClock::new(1_700_000_000_000);
    previous_session(&storage, &clock);

    let registry = persistent_registry(&storage, &clock);
    let engine = registry.acquire(tracks(&[]));
    clock.advance(6 * 60 * 1000);
    registry.acquire(tracks(&["a", "b", "c"]));

    let e = engine.lock();
    assert_eq!(e.current_index(), None);
    assert!(!e.is_playing());
}

#[test]
fn explicit_replace_swaps_list() {
    let (registry, _) = counting_registry();
    let engine = registry.acquire(tracks(&["a", "b", "c"]));
    engine.with(|e| e.load(2).unwrap());

    let replacement = tracks(&["b", "z"]);
    registry.acquire_with(Arc::clone(&replacement), AcquirePolicy::ReplaceIfDifferent);

    let e = engine.lock();
    assert!(Arc::ptr_eq(e.tracks(), &replacement));
    assert_eq!(e.current_index(), Some(0));
}

#[test]
fn construction_and_play_silence_foreign_audio() {
    let stray = SimulatedOutput::new();
    let mut stray_handle = stray.clone();
    stray_handle.load(&Track::new("old", "old.mp3").with_duration(60.0)).unwrap();
    stray_handle.set_volume(1.0);
    stray_handle.play().unwrap();

    let environment = Arc::new(ForeignOutputs::new());
    environment.register(Box::new(stray.clone()));

    let registry = PlayerRegistry::new(|| Box::new(SimulatedOutput::new()))
        .with_environment(environment);
    let engine = registry.acquire(tracks(&["a"]));
    assert!(!stray.is_audible());

    // Something restarts the stray output behind the engine's back
    stray_handle.play().unwrap();
    assert!(stray.is_audible());

    engine.with(|e| {
        e.load(0).unwrap();
        e.play().unwrap();
    });
    assert!(!stray.is_audible());
}

#[test]
fn acquire_from_many_threads_builds_one_engine() {
    let (registry, built) = counting_registry();
    let registry = Arc::new(registry);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || registry.acquire(tracks(&["a", "b"])))
        })
        .collect();
    let engines: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert!(engines.iter().all(|e| e.ptr_eq(&engines[0])));
}
