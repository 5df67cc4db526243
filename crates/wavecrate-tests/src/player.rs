//! Integration tests for the preview player.
//!
//! Exercises the controller against a recording engine double: session
//! lifecycle, preference persistence across controller generations, and
//! the responsive hero layout.

use std::time::{Duration, Instant};

use wavecrate_player::{
    EngineEvent, MemoryStore, PlayerConfig, PlayerController, PrefKeys, Viewport,
};

use crate::support::{log, recorder, send, RecordingFactory, SharedMemoryStore, SharedRecorder};

// ── Helpers ────────────────────────────────────────────────────

fn viewport(width_px: f32) -> Viewport {
    Viewport {
        width_px,
        height_px: 900.0,
    }
}

fn hero_config(url: &str) -> PlayerConfig {
    PlayerConfig {
        audio_url: Some(url.to_string()),
        title: Some("Night Drive".to_string()),
        artist: Some("Mori".to_string()),
        hero_mode: true,
    }
}

fn controller(url: &str) -> (PlayerController, SharedRecorder) {
    let shared = recorder();
    let ctl = PlayerController::new(
        hero_config(url),
        Box::new(MemoryStore::new()),
        PrefKeys::default(),
        Box::new(RecordingFactory {
            shared: shared.clone(),
        }),
    );
    (ctl, shared)
}

fn controller_with_store(url: &str, store: SharedMemoryStore) -> (PlayerController, SharedRecorder) {
    let shared = recorder();
    let ctl = PlayerController::new(
        hero_config(url),
        Box::new(store),
        PrefKeys::default(),
        Box::new(RecordingFactory {
            shared: shared.clone(),
        }),
    );
    (ctl, shared)
}

// ── Session lifecycle ──────────────────────────────────────────

#[test]
fn at_most_one_engine_across_track_changes() {
    let (mut ctl, shared) = controller("a.mp3");
    ctl.mount(viewport(1280.0), Instant::now());
    ctl.set_audio_url(Some("b.mp3".to_string()));
    ctl.set_audio_url(Some("c.mp3".to_string()));

    assert_eq!(shared.borrow().live_engines, 1);
    // Every replacement destroys the occupant before creating its successor.
    let log = log(&shared);
    let mut live = 0i32;
    for entry in &log {
        if entry.starts_with("create:") {
            live += 1;
        } else if entry == "destroy" {
            live -= 1;
        }
        assert!((0..=1).contains(&live), "overlap in {log:?}");
    }
    assert_eq!(log.iter().filter(|l| l.starts_with("create:")).count(), 3);
}

#[test]
fn unmount_destroys_the_engine() {
    let (mut ctl, shared) = controller("a.mp3");
    ctl.mount(viewport(1280.0), Instant::now());
    assert_eq!(shared.borrow().live_engines, 1);

    ctl.unmount();
    assert_eq!(shared.borrow().live_engines, 0);
    assert!(!ctl.has_session());
}

// ── Preferences across controller generations ──────────────────

#[test]
fn volume_set_in_one_visit_applies_in_the_next() {
    let store = SharedMemoryStore::default();

    let (mut first, _) = controller_with_store("a.mp3", store.clone());
    first.mount(viewport(1280.0), Instant::now());
    first.set_volume(0.8);
    first.unmount();
    drop(first);

    let (mut second, shared) = controller_with_store("a.mp3", store);
    assert_eq!(second.state().volume, 0.8);
    second.mount(viewport(1280.0), Instant::now());
    send(&shared, EngineEvent::Ready { duration_sec: 60.0 });
    second.pump_events();
    assert!(log(&shared).contains(&"volume:0.8".to_string()));
}

#[test]
fn stored_position_restores_as_duration_fraction() {
    let store = SharedMemoryStore::default();
    store.seed("audioPlayer-currentTime", "30");

    let (mut ctl, shared) = controller_with_store("a.mp3", store);
    ctl.mount(viewport(1280.0), Instant::now());
    send(&shared, EngineEvent::Ready { duration_sec: 120.0 });
    ctl.pump_events();

    assert!(log(&shared).contains(&"seek:0.25".to_string()));
}

#[test]
fn stored_play_intent_resumes_playback() {
    let store = SharedMemoryStore::default();
    store.seed("audioPlayer-isPlaying", "true");

    let (mut ctl, shared) = controller_with_store("a.mp3", store);
    ctl.mount(viewport(1280.0), Instant::now());
    send(&shared, EngineEvent::Ready { duration_sec: 60.0 });
    ctl.pump_events();

    assert!(ctl.state().is_playing);
    assert!(log(&shared).contains(&"play".to_string()));
}

#[test]
fn teardown_flush_feeds_the_next_visit() {
    let store = SharedMemoryStore::default();

    let (mut first, shared) = controller_with_store("a.mp3", store.clone());
    first.mount(viewport(1280.0), Instant::now());
    shared.borrow_mut().time = 45.0;
    shared.borrow_mut().playing = true;
    first.unmount();

    assert_eq!(store.get("audioPlayer-currentTime"), Some("45".to_string()));
    assert_eq!(store.get("audioPlayer-isPlaying"), Some("true".to_string()));

    // Next visit resumes from where the flush left off.
    let (mut second, shared) = controller_with_store("a.mp3", store);
    second.mount(viewport(1280.0), Instant::now());
    send(&shared, EngineEvent::Ready { duration_sec: 90.0 });
    second.pump_events();
    assert!(log(&shared).contains(&"seek:0.5".to_string()));
    assert!(second.state().is_playing);
}

// ── Responsive layout ──────────────────────────────────────────

#[test]
fn waveform_height_follows_viewport_breakpoints() {
    for (width, height) in [(500.0, 36), (800.0, 48), (1920.0, 60)] {
        let (mut ctl, shared) = controller("a.mp3");
        ctl.mount(viewport(width), Instant::now());
        assert_eq!(log(&shared)[0], format!("create:h{height}"));
    }
}

#[test]
fn resize_across_breakpoint_updates_engine_in_place() {
    let (mut ctl, shared) = controller("a.mp3");
    shared.borrow_mut().live_resize = true;
    ctl.mount(viewport(1280.0), Instant::now());

    ctl.handle_resize(viewport(500.0));
    let log = log(&shared);
    assert!(log.contains(&"resize:36".to_string()));
    assert_eq!(log.iter().filter(|l| l.starts_with("create:")).count(), 1);
}

#[test]
fn hero_settles_past_threshold_and_unsettles_back() {
    let (mut ctl, _) = controller("a.mp3");
    let t0 = Instant::now();
    ctl.mount(viewport(1280.0), t0);
    assert!(!ctl.layout_state(t0).settled);

    ctl.begin_frame();
    ctl.handle_scroll(200.0);
    assert!(ctl.layout_state(t0).settled);

    ctl.begin_frame();
    ctl.handle_scroll(50.0);
    assert!(!ctl.layout_state(t0).settled);
}

#[test]
fn scroll_after_the_first_in_a_frame_is_dropped() {
    let (mut ctl, _) = controller("a.mp3");
    let t0 = Instant::now();
    ctl.mount(viewport(1280.0), t0);

    ctl.begin_frame();
    ctl.handle_scroll(200.0);
    ctl.handle_scroll(0.0);
    assert!(ctl.layout_state(t0).settled);
}

#[test]
fn transitions_stay_suppressed_briefly_after_mount() {
    let (mut ctl, _) = controller("a.mp3");
    let t0 = Instant::now();
    ctl.mount(viewport(1280.0), t0);

    assert!(!ctl.layout_state(t0).transitions_enabled);
    assert!(ctl.layout_state(t0 + Duration::from_millis(40)).transitions_enabled);
}

#[test]
fn hero_lift_scales_with_viewport_height() {
    let (mut ctl, _) = controller("a.mp3");
    let t0 = Instant::now();
    ctl.mount(
        Viewport {
            width_px: 1280.0,
            height_px: 1000.0,
        },
        t0,
    );
    // round(1000 * 0.33) - 100 + 64
    assert_eq!(ctl.layout_state(t0).lift_px, 294.0);
}

// ── End of track ───────────────────────────────────────────────

#[test]
fn finish_pauses_without_rewinding() {
    let store = SharedMemoryStore::default();
    store.seed("audioPlayer-isPlaying", "true");
    let (mut ctl, shared) = controller_with_store("a.mp3", store);
    ctl.mount(viewport(1280.0), Instant::now());
    send(&shared, EngineEvent::Ready { duration_sec: 10.0 });
    send(&shared, EngineEvent::Position { time_sec: 10.0 });
    send(&shared, EngineEvent::Finish);
    ctl.pump_events();

    assert!(!ctl.state().is_playing);
    assert_eq!(ctl.state().current_time_sec, 10.0);
    assert_eq!(
        log(&shared)
            .iter()
            .filter(|l| l.starts_with("seek:"))
            .count(),
        0
    );
}
