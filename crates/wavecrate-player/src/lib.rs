//! WaveCrate Player - Audio preview player core
//!
//! Owns one waveform-engine session per mounted widget and keeps its state
//! consistent with persisted preferences and responsive layout.
//!
//! Architecture:
//! - `engine`: the consumed rendering-engine contract (transport + events)
//! - `session`: owned session handle with a single replace/teardown point
//! - `prefs`: key-value preference store (volume, position, play intent)
//! - `layout`: responsive waveform height, hero lift, settle-on-scroll
//! - `controller`: mediates engine events, user actions, and persistence

pub mod controller;
pub mod engine;
pub mod layout;
pub mod prefs;
pub mod session;

pub use controller::{PlayerConfig, PlayerController, PlayerState};
pub use engine::{
    EngineBackend, EngineEvent, EngineFactory, EngineOptions, EngineOptionsUpdate, WaveformEngine,
};
pub use layout::{
    waveform_height_for_width, HoverIndicator, LayoutState, SettlePolicy, TransitionGate, Viewport,
};
pub use prefs::{JsonFileStore, MemoryStore, PlayerPrefs, PrefKeys, PreferenceStore};
pub use session::{PlaybackSession, SessionSlot, TeardownSnapshot};
