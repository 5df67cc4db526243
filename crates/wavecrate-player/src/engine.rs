//! The waveform rendering-engine contract.
//!
//! The engine is an external collaborator: it decodes audio, draws the
//! waveform, and reports back through an event feed. WaveCrate only defines
//! the seam. Loading is fire-and-forget; readiness arrives as an event.

use crossbeam_channel::Receiver;
use wavecrate_core::Result;

/// Decoding backend requested from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineBackend {
    /// Full decode path with sample-accurate rendering.
    #[default]
    WebAudio,
    /// Streamed playback through a media element.
    MediaElement,
}

/// Visual and playback options handed to the engine at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    pub wave_color: String,
    pub progress_color: String,
    pub cursor_color: String,
    pub bar_width: u32,
    pub bar_gap: u32,
    pub bar_radius: u32,
    pub cursor_width: u32,
    pub fill_parent: bool,
    pub height: u32,
    pub normalize: bool,
    pub backend: EngineBackend,
    /// Precomputed amplitude envelope; lets the engine draw without decoding.
    pub peaks: Option<Vec<f32>>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            wave_color: "#FFFFFF".to_string(),
            progress_color: "#78DCE8".to_string(),
            cursor_color: "#78DCE8".to_string(),
            bar_width: 2,
            bar_gap: 0,
            bar_radius: 0,
            cursor_width: 1,
            fill_parent: true,
            height: 60,
            normalize: true,
            backend: EngineBackend::WebAudio,
            peaks: None,
        }
    }
}

impl EngineOptions {
    /// Player-bar theme at the given waveform height.
    pub fn player_bar(height: u32) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }
}

/// Live-updatable subset of [`EngineOptions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptionsUpdate {
    pub height: Option<u32>,
}

/// Asynchronous notifications from the engine.
///
/// Delivered on a channel the controller drains once per UI frame, so
/// handlers stay short and ordering matches the engine's own event queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// Decoding finished; duration is now known.
    Ready { duration_sec: f64 },
    /// Playback position advanced.
    Position { time_sec: f64 },
    /// A seek is in flight; position already reflects the target.
    Seeking { time_sec: f64 },
    /// Playback reached the end. The engine leaves its position at the end.
    Finish,
}

/// Transport controls and event feed of one engine session.
///
/// Dropping the engine releases the session; the engine must abandon any
/// in-flight load without delivering further events.
pub trait WaveformEngine {
    /// Start loading `url`. Asynchronous: completion is observed via
    /// [`EngineEvent::Ready`], failure as indefinite pre-ready state.
    fn load(&mut self, url: &str) -> Result<()>;

    fn play(&mut self);
    fn pause(&mut self);
    fn is_playing(&self) -> bool;

    /// Current playback position in seconds.
    fn current_time(&self) -> f64;
    /// Total duration in seconds; `0.0` until ready.
    fn duration(&self) -> f64;

    /// Seek to a fraction of the duration, `0.0..=1.0`.
    fn seek_to(&mut self, fraction: f64);
    /// Set output volume, `0.0..=1.0`.
    fn set_volume(&mut self, volume: f64);

    /// Apply a live options update. Returns `false` if the engine cannot
    /// honor it in place, in which case the caller recreates the session.
    fn apply_options(&mut self, update: &EngineOptionsUpdate) -> bool;

    /// The engine's event feed.
    fn events(&self) -> &Receiver<EngineEvent>;
}

/// Construction seam for engine sessions.
///
/// The widget hands the factory its options; the factory binds the session
/// to whatever container the host provides.
pub trait EngineFactory {
    fn create(&self, options: &EngineOptions) -> Result<Box<dyn WaveformEngine>>;
}
