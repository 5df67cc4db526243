//! WaveCrate UI - egui widgets for the storefront
//!
//! Presentation only: widgets reflect controller state and forward user
//! actions; they hold no playback state of their own.
//!
//! - `theme`: site palette and spacing constants
//! - `anim`: entrance tweens and smoothed values
//! - `waveform`: peak-bar waveform with progress and hover marker
//! - `player_bar`: the floating audio preview player
//! - `card`: sample tiles for the catalog grid

pub mod anim;
pub mod card;
pub mod player_bar;
pub mod theme;
pub mod waveform;

pub use anim::{FadeUp, Smoothed};
pub use card::{CardAction, SampleCard};
pub use player_bar::PlayerBar;
pub use theme::Theme;
pub use waveform::{WaveformResponse, WaveformView};
