//! Clock-driven stand-in for the waveform rendering engine.
//!
//! The real engine is an external collaborator; this simulation gives the
//! demo app honest transport semantics (ready on load, positions while
//! playing, finish at the end) without decoding any audio. It advances
//! lazily whenever its event feed is polled.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use wavecrate_core::Result;
use wavecrate_player::{
    EngineEvent, EngineFactory, EngineOptions, EngineOptionsUpdate, WaveformEngine,
};

const POSITION_EMIT_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Default)]
struct SimState {
    duration_sec: f64,
    base_position_sec: f64,
    playing_since: Option<Instant>,
    loaded: bool,
    last_position_emit: Option<Instant>,
}

impl SimState {
    fn position_at(&self, now: Instant) -> f64 {
        let elapsed = self
            .playing_since
            .map(|since| (now - since).as_secs_f64())
            .unwrap_or(0.0);
        (self.base_position_sec + elapsed).min(self.duration_sec)
    }
}

pub struct SimEngine {
    durations: HashMap<String, f64>,
    default_duration_sec: f64,
    state: Mutex<SimState>,
    tx: Sender<EngineEvent>,
    rx: Receiver<EngineEvent>,
}

impl SimEngine {
    fn new(durations: HashMap<String, f64>, default_duration_sec: f64) -> Self {
        let (tx, rx) = unbounded();
        Self {
            durations,
            default_duration_sec,
            state: Mutex::new(SimState::default()),
            tx,
            rx,
        }
    }

    /// Advance the clock: emit throttled positions and the finish event.
    fn advance(&self) {
        let now = Instant::now();
        let mut state = self.state.lock();
        if !state.loaded || state.playing_since.is_none() {
            return;
        }
        let position = state.position_at(now);
        if position >= state.duration_sec {
            state.base_position_sec = state.duration_sec;
            state.playing_since = None;
            let _ = self.tx.send(EngineEvent::Finish);
            return;
        }
        let due = state
            .last_position_emit
            .map_or(true, |at| now - at >= POSITION_EMIT_INTERVAL);
        if due {
            state.last_position_emit = Some(now);
            let _ = self.tx.send(EngineEvent::Position { time_sec: position });
        }
    }
}

impl WaveformEngine for SimEngine {
    fn load(&mut self, url: &str) -> Result<()> {
        let duration_sec = self
            .durations
            .get(url)
            .copied()
            .unwrap_or(self.default_duration_sec);
        let mut state = self.state.lock();
        state.duration_sec = duration_sec;
        state.loaded = true;
        // Nothing to decode; ready is immediate.
        let _ = self.tx.send(EngineEvent::Ready { duration_sec });
        Ok(())
    }

    fn play(&mut self) {
        let mut state = self.state.lock();
        if state.playing_since.is_none() {
            if state.base_position_sec >= state.duration_sec {
                state.base_position_sec = 0.0;
            }
            state.playing_since = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        let now = Instant::now();
        let mut state = self.state.lock();
        state.base_position_sec = state.position_at(now);
        state.playing_since = None;
    }

    fn is_playing(&self) -> bool {
        self.state.lock().playing_since.is_some()
    }

    fn current_time(&self) -> f64 {
        self.state.lock().position_at(Instant::now())
    }

    fn duration(&self) -> f64 {
        self.state.lock().duration_sec
    }

    fn seek_to(&mut self, fraction: f64) {
        let mut state = self.state.lock();
        let time_sec = fraction.clamp(0.0, 1.0) * state.duration_sec;
        state.base_position_sec = time_sec;
        if state.playing_since.is_some() {
            state.playing_since = Some(Instant::now());
        }
        let _ = self.tx.send(EngineEvent::Seeking { time_sec });
    }

    fn set_volume(&mut self, _volume: f64) {
        // The simulation produces no audio.
    }

    fn apply_options(&mut self, update: &EngineOptionsUpdate) -> bool {
        // Height is a pure drawing concern here; live update is fine.
        update.height.is_some()
    }

    fn events(&self) -> &Receiver<EngineEvent> {
        self.advance();
        &self.rx
    }
}

/// Builds [`SimEngine`] sessions with per-URL demo durations.
#[derive(Clone, Default)]
pub struct SimEngineFactory {
    durations: HashMap<String, f64>,
    default_duration_sec: f64,
}

impl SimEngineFactory {
    pub fn new(default_duration_sec: f64) -> Self {
        Self {
            durations: HashMap::new(),
            default_duration_sec,
        }
    }

    pub fn with_duration(mut self, url: impl Into<String>, duration_sec: f64) -> Self {
        self.durations.insert(url.into(), duration_sec);
        self
    }
}

impl EngineFactory for SimEngineFactory {
    fn create(&self, _options: &EngineOptions) -> Result<Box<dyn WaveformEngine>> {
        Ok(Box::new(SimEngine::new(
            self.durations.clone(),
            self.default_duration_sec,
        )))
    }
}
