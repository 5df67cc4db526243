//! Preview grid playback.
//!
//! The grid shows many samples but plays at most one: toggling a tile
//! always silences the current voice before a new one may start. Peaks are
//! fetched lazily per sample so tiles render a static image until played.

use tracing::{debug, warn};
use wavecrate_core::Result;
use wavecrate_player::{
    EngineEvent, EngineFactory, EngineOptions, PlaybackSession, SessionSlot,
};

use crate::peaks::Peaks;
use crate::sample::Sample;

/// Fetches a peaks payload for a sample. The network layer is an external
/// collaborator; implementations may hit a CDN, a cache, or fixtures.
pub trait PeaksFetcher {
    fn fetch(&self, url: &str) -> Result<Peaks>;
}

const TILE_WAVE_COLOR: &str = "#C1A8FF";
const TILE_PROGRESS_COLOR: &str = "#FFFFFF";
const TILE_HEIGHT_PX: u32 = 60;

fn tile_options(peaks: Option<Peaks>) -> EngineOptions {
    EngineOptions {
        wave_color: TILE_WAVE_COLOR.to_string(),
        progress_color: TILE_PROGRESS_COLOR.to_string(),
        cursor_width: 0,
        height: TILE_HEIGHT_PX,
        bar_width: 2,
        bar_gap: 1,
        peaks: peaks.map(Peaks::into_samples),
        ..EngineOptions::default()
    }
}

/// At-most-one-active-voice playback for the sample grid.
pub struct PreviewGrid {
    slot: SessionSlot,
    active_index: Option<usize>,
    /// Bars for the active tile, kept for the renderer.
    active_bars: Vec<f32>,
}

impl PreviewGrid {
    pub fn new() -> Self {
        Self {
            slot: SessionSlot::new(),
            active_index: None,
            active_bars: Vec::new(),
        }
    }

    /// Index of the tile currently holding the voice, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Resampled peak bars for the active tile.
    pub fn active_bars(&self) -> &[f32] {
        &self.active_bars
    }

    /// Playback progress of the active voice as `(position, duration)`.
    pub fn progress(&self) -> Option<(f64, f64)> {
        let session = self.slot.get()?;
        Some((session.engine().current_time(), session.engine().duration()))
    }

    /// Toggle playback for tile `index`.
    ///
    /// The current voice is always destroyed first. If the tile was not the
    /// active one and has a preview URL, its peaks are fetched and a fresh
    /// engine session starts (playing once ready). Fetch or create failures
    /// leave the grid silent.
    pub fn toggle(
        &mut self,
        index: usize,
        sample: &Sample,
        fetcher: &dyn PeaksFetcher,
        factory: &dyn EngineFactory,
    ) {
        let was_active = self.active_index.take();
        // Grid previews are throwaway; the snapshot is discarded.
        self.slot.clear();
        self.active_bars.clear();

        if was_active == Some(index) {
            return;
        }
        let Some(preview_url) = sample.preview_url.as_deref() else {
            return;
        };

        let peaks = match sample.waveform_peaks_url.as_deref() {
            Some(peaks_url) => match fetcher.fetch(peaks_url) {
                Ok(peaks) => Some(peaks),
                Err(e) => {
                    warn!(url = peaks_url, error = %e, "peaks fetch failed, tile stays idle");
                    return;
                }
            },
            // No peaks file; the engine decodes the preview itself.
            None => None,
        };
        let bars = peaks
            .as_ref()
            .map(|p| p.resample(128))
            .unwrap_or_default();

        let options = tile_options(peaks);
        let url = preview_url.to_string();
        let result = self.slot.replace(
            |_| {},
            || {
                let mut engine = factory.create(&options)?;
                engine.load(&url)?;
                Ok(PlaybackSession::new(url, engine))
            },
        );
        match result {
            Ok(id) => {
                debug!(index, session = %id, "preview voice started");
                self.active_index = Some(index);
                self.active_bars = bars;
            }
            Err(e) => {
                warn!(index, error = %e, "preview engine creation failed");
            }
        }
    }

    /// Drain engine events: play on ready, release the voice on finish.
    pub fn pump_events(&mut self) {
        let events: Vec<EngineEvent> = match self.slot.get() {
            Some(session) => session.engine().events().try_iter().collect(),
            None => return,
        };
        for event in events {
            match event {
                EngineEvent::Ready { .. } => {
                    if let Some(session) = self.slot.get_mut() {
                        session.engine_mut().play();
                    }
                }
                EngineEvent::Finish => {
                    self.slot.clear();
                    self.active_index = None;
                    self.active_bars.clear();
                }
                EngineEvent::Position { .. } | EngineEvent::Seeking { .. } => {}
            }
        }
    }

    /// Silence and release the voice (grid unmount).
    pub fn stop(&mut self) {
        self.slot.clear();
        self.active_index = None;
        self.active_bars.clear();
    }
}

impl Default for PreviewGrid {
    fn default() -> Self {
        Self::new()
    }
}
