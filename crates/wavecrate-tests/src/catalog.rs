//! Integration tests for the catalog flow.
//!
//! Drives the pipeline end to end: CMS payload into display samples, peaks
//! JSON into bars, and the preview grid's one-active-voice playback against
//! the recording engine double.

use wavecrate_catalog::{flatten_packs, Peaks, PeaksFetcher, PreviewGrid, SamplePack, SamplesQuery};
use wavecrate_core::Result;
use wavecrate_player::EngineEvent;

use crate::support::{log, recorder, send, RecordingFactory, SharedRecorder};

// ── Helpers ────────────────────────────────────────────────────

const CMS_PAYLOAD: &str = r#"[
  {
    "packSlug": "night-drive",
    "packTitle": "Night Drive",
    "artist": { "name": "Mori", "slug": "mori" },
    "samples": [
      {
        "title": "Neon Keys",
        "bpm": 124,
        "key": "A Minor",
        "lengthSec": 8,
        "isFree": true,
        "previewUrl": "https://cdn.example.com/neon.mp3",
        "waveformPeaksUrl": "https://cdn.example.com/neon.json"
      },
      {
        "title": "Tunnel Bass",
        "bpm": 124,
        "isFree": false,
        "previewUrl": "https://cdn.example.com/tunnel.mp3",
        "waveformPeaksUrl": "https://cdn.example.com/tunnel.json"
      }
    ]
  }
]"#;

/// Serves stereo peaks JSON for every URL.
struct JsonFetcher;

impl PeaksFetcher for JsonFetcher {
    fn fetch(&self, _url: &str) -> Result<Peaks> {
        Peaks::from_json("[[0.1, -0.9, 0.2, 0.4], [0.6, 0.3, -0.5, 0.1]]")
    }
}

fn harness() -> (PreviewGrid, RecordingFactory, SharedRecorder) {
    let shared = recorder();
    let factory = RecordingFactory {
        shared: shared.clone(),
    };
    (PreviewGrid::new(), factory, shared)
}

// ── Payload to grid ────────────────────────────────────────────

#[test]
fn cms_payload_flattens_with_pack_identity() {
    let packs: Vec<SamplePack> = serde_json::from_str(CMS_PAYLOAD).unwrap();
    let samples = flatten_packs(packs);

    assert_eq!(samples.len(), 2);
    assert!(samples
        .iter()
        .all(|s| s.pack_slug.as_deref() == Some("night-drive")));
    assert_eq!(
        samples[0].artist.as_ref().and_then(|a| a.name.as_deref()),
        Some("Mori")
    );
    assert_eq!(samples[0].meta_line(), "A Minor · 124 BPM · 8s");
}

#[test]
fn grid_plays_flattened_samples_with_tile_theme() {
    let packs: Vec<SamplePack> = serde_json::from_str(CMS_PAYLOAD).unwrap();
    let samples = flatten_packs(packs);
    let (mut grid, factory, shared) = harness();

    grid.toggle(0, &samples[0], &JsonFetcher, &factory);
    assert_eq!(grid.active_index(), Some(0));

    let options = shared.borrow().created_options[0].clone();
    assert_eq!(options.wave_color, "#C1A8FF");
    assert_eq!(options.progress_color, "#FFFFFF");
    assert_eq!(options.cursor_width, 0);
    assert_eq!(options.height, 60);
    // Stereo peaks are mixed down before reaching the engine.
    assert_eq!(
        options.peaks.as_deref(),
        Some(&[0.6, -0.9, -0.5, 0.4][..])
    );
    assert!(log(&shared).contains(&"load:https://cdn.example.com/neon.mp3".to_string()));
}

// ── One active voice ───────────────────────────────────────────

#[test]
fn switching_tiles_keeps_a_single_voice() {
    let packs: Vec<SamplePack> = serde_json::from_str(CMS_PAYLOAD).unwrap();
    let samples = flatten_packs(packs);
    let (mut grid, factory, shared) = harness();

    grid.toggle(0, &samples[0], &JsonFetcher, &factory);
    grid.toggle(1, &samples[1], &JsonFetcher, &factory);

    assert_eq!(grid.active_index(), Some(1));
    assert_eq!(shared.borrow().live_engines, 1);
    let log = log(&shared);
    let destroy = log.iter().position(|l| l == "destroy").unwrap();
    let second_create = log
        .iter()
        .rposition(|l| l.starts_with("create:"))
        .unwrap();
    assert!(destroy < second_create);
}

#[test]
fn voice_plays_on_ready_and_releases_on_finish() {
    let packs: Vec<SamplePack> = serde_json::from_str(CMS_PAYLOAD).unwrap();
    let samples = flatten_packs(packs);
    let (mut grid, factory, shared) = harness();

    grid.toggle(0, &samples[0], &JsonFetcher, &factory);
    send(&shared, EngineEvent::Ready { duration_sec: 8.0 });
    grid.pump_events();
    assert!(log(&shared).contains(&"play".to_string()));

    send(&shared, EngineEvent::Finish);
    grid.pump_events();
    assert_eq!(grid.active_index(), None);
    assert_eq!(shared.borrow().live_engines, 0);
    assert!(grid.active_bars().is_empty());
}

// ── Query builder against the payload shape ────────────────────

#[test]
fn query_projection_matches_payload_fields() {
    let q = SamplesQuery::new().only_free(true).build();
    // The projection names are exactly what the payload deserializer reads.
    for field in ["previewUrl", "waveformPeaksUrl", "isFree", "lengthSec"] {
        assert!(q.contains(field), "missing {field} in {q}");
    }
    assert!(q.contains("samples[isFree == true]{"));
}
