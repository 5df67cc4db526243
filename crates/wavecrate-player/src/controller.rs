//! The player controller.
//!
//! Owns the full lifecycle of one playback session bound to a widget:
//! persisted preferences in, engine events out, deterministic
//! play/pause/seek/volume semantics in between.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::engine::{EngineEvent, EngineFactory, EngineOptions, EngineOptionsUpdate};
use crate::layout::{HoverIndicator, LayoutEngine, LayoutState, Viewport};
use crate::prefs::{PlayerPrefs, PrefKeys, PreferenceStore};
use crate::session::{PlaybackSession, SessionSlot, TeardownSnapshot};

/// Recognized widget options.
#[derive(Debug, Clone, Default)]
pub struct PlayerConfig {
    /// Required for rendering; absent means the widget renders nothing.
    pub audio_url: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Elevated-on-load, settle-on-scroll presentation.
    pub hero_mode: bool,
}

/// UI-observable playback state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub is_playing: bool,
    pub current_time_sec: f64,
    /// Known only after the engine reports ready.
    pub duration_sec: f64,
    pub volume: f64,
    pub ready: bool,
}

const DEFAULT_VOLUME: f64 = 0.5;

pub struct PlayerController {
    config: PlayerConfig,
    prefs: PlayerPrefs,
    factory: Box<dyn EngineFactory>,
    slot: SessionSlot,
    state: PlayerState,
    layout: LayoutEngine,
    hover: HoverIndicator,
    mounted: bool,
}

impl PlayerController {
    /// Build a controller, restoring persisted preferences (defaults:
    /// volume 0.5, position 0, paused).
    pub fn new(
        config: PlayerConfig,
        store: Box<dyn PreferenceStore>,
        keys: PrefKeys,
        factory: Box<dyn EngineFactory>,
    ) -> Self {
        let prefs = PlayerPrefs::new(store, keys);
        let state = PlayerState {
            is_playing: prefs.is_playing().unwrap_or(false),
            current_time_sec: prefs.current_time().unwrap_or(0.0),
            duration_sec: 0.0,
            volume: prefs.volume().unwrap_or(DEFAULT_VOLUME),
            ready: false,
        };
        let layout = LayoutEngine::new(config.hero_mode);
        Self {
            config,
            prefs,
            factory,
            slot: SessionSlot::new(),
            state,
            layout,
            hover: HoverIndicator::default(),
            mounted: false,
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn layout_state(&self, now: Instant) -> LayoutState {
        self.layout.state(now)
    }

    /// Whether a live engine session exists.
    pub fn has_session(&self) -> bool {
        !self.slot.is_empty()
    }

    /// First layout + session creation. Call once when the widget appears.
    pub fn mount(&mut self, viewport: Viewport, now: Instant) {
        self.mounted = true;
        self.layout.compute(viewport);
        self.layout.arm_transitions(now);
        self.replace_session();
        info!(
            hero = self.config.hero_mode,
            url = self.config.audio_url.as_deref().unwrap_or(""),
            "player mounted"
        );
    }

    /// Unconditional teardown flush. Runs on every exit path.
    pub fn unmount(&mut self) {
        self.teardown();
        self.mounted = false;
        debug!("player unmounted");
    }

    /// Change the session identity. An empty or absent URL tears the
    /// session down without creating a new one.
    pub fn set_audio_url(&mut self, audio_url: Option<String>) {
        if self.config.audio_url == audio_url {
            return;
        }
        self.config.audio_url = audio_url;
        if self.mounted {
            self.replace_session();
        }
    }

    /// Drain and apply pending engine events. Call once per UI frame;
    /// handlers are idempotent and short.
    pub fn pump_events(&mut self) {
        let events: Vec<EngineEvent> = match self.slot.get() {
            Some(session) => session.engine().events().try_iter().collect(),
            None => return,
        };
        for event in events {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Ready { duration_sec } => {
                self.state.duration_sec = duration_sec;
                self.state.ready = true;
                let volume = self.state.volume;
                let restore_time = self.prefs.current_time();
                let autoplay = self.prefs.is_playing() == Some(true);

                if let Some(session) = self.slot.get_mut() {
                    let engine = session.engine_mut();
                    engine.set_volume(volume);
                    if let Some(t) = restore_time {
                        // A persisted time at or past the ends is ignored.
                        if t > 0.0 && t < duration_sec {
                            engine.seek_to(t / duration_sec);
                        }
                    }
                    if autoplay {
                        engine.play();
                    }
                }
                if autoplay {
                    self.set_playing(true);
                }
                debug!(duration_sec, autoplay, "engine ready");
            }
            EngineEvent::Position { time_sec } | EngineEvent::Seeking { time_sec } => {
                self.set_current_time(time_sec);
            }
            EngineEvent::Finish => {
                // Position stays at the end; no auto-restart.
                self.set_playing(false);
            }
        }
    }

    /// Flip play/pause. No-op without an engine instance.
    pub fn toggle_play_pause(&mut self) {
        let playing = self.state.is_playing;
        let Some(session) = self.slot.get_mut() else {
            return;
        };
        if playing {
            session.engine_mut().pause();
        } else {
            session.engine_mut().play();
        }
        self.set_playing(!playing);
    }

    /// Set volume without recreating the session.
    pub fn set_volume(&mut self, volume: f64) {
        let volume = volume.clamp(0.0, 1.0);
        self.state.volume = volume;
        if let Some(session) = self.slot.get_mut() {
            session.engine_mut().set_volume(volume);
        }
        self.prefs.set_volume(volume);
    }

    /// Seek to a fraction of the duration (waveform click).
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        if !self.state.ready {
            return;
        }
        if let Some(session) = self.slot.get_mut() {
            session.engine_mut().seek_to(fraction.clamp(0.0, 1.0));
        }
    }

    /// Recompute layout for a new viewport. A waveform-height step prefers
    /// a live engine update; recreation is the fallback, with the position
    /// surviving through the persisted value restored at ready.
    pub fn handle_resize(&mut self, viewport: Viewport) {
        if !self.layout.compute(viewport) {
            return;
        }
        let update = EngineOptionsUpdate {
            height: Some(self.layout.waveform_height_px()),
        };
        let handled = match self.slot.get_mut() {
            Some(session) => session.engine_mut().apply_options(&update),
            None => true,
        };
        if !handled {
            debug!(height = self.layout.waveform_height_px(), "engine refused live resize");
            self.replace_session();
        }
    }

    /// Reset per-frame scroll coalescing.
    pub fn begin_frame(&mut self) {
        self.layout.begin_frame();
    }

    pub fn handle_scroll(&mut self, scroll_y_px: f32) {
        if self.layout.observe_scroll(scroll_y_px) {
            debug!(scroll_y_px, settled = self.layout.state(Instant::now()).settled, "settle flipped");
        }
    }

    pub fn pointer_moved(&mut self, x_px: f32, container_width_px: f32) {
        self.hover.pointer_moved(x_px, container_width_px);
    }

    pub fn pointer_left(&mut self) {
        self.hover.pointer_left();
    }

    pub fn hover_position(&self) -> Option<f32> {
        self.hover.position()
    }

    fn set_playing(&mut self, playing: bool) {
        self.state.is_playing = playing;
        self.prefs.set_is_playing(playing);
    }

    fn set_current_time(&mut self, time_sec: f64) {
        self.state.current_time_sec = time_sec;
        self.prefs.set_current_time(time_sec);
    }

    fn teardown(&mut self) {
        if let Some(snapshot) = self.slot.clear() {
            flush_snapshot(&mut self.prefs, snapshot);
        }
        self.state.ready = false;
        self.state.duration_sec = 0.0;
    }

    /// The one place sessions change hands. Tears down (and flushes) any
    /// occupant before the new engine is created.
    fn replace_session(&mut self) {
        let url = match self.config.audio_url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            // Nothing to render; not an error.
            _ => {
                self.teardown();
                return;
            }
        };
        self.state.ready = false;
        self.state.duration_sec = 0.0;
        let options = EngineOptions::player_bar(self.layout.waveform_height_px());

        let prefs = &mut self.prefs;
        let factory = self.factory.as_ref();
        let result = self.slot.replace(
            |snapshot| flush_snapshot(prefs, snapshot),
            || {
                let mut engine = factory.create(&options)?;
                // Fire-and-forget; readiness arrives as an event.
                engine.load(&url)?;
                Ok(PlaybackSession::new(url, engine))
            },
        );
        if let Err(e) = result {
            // Surfaced-but-silent degradation: controls stay inert.
            warn!(error = %e, "engine session creation failed");
        }
    }
}

fn flush_snapshot(prefs: &mut PlayerPrefs, snapshot: TeardownSnapshot) {
    prefs.set_current_time(snapshot.position_sec);
    prefs.set_is_playing(snapshot.was_playing);
}
