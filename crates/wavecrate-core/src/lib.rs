//! WaveCrate Core - Foundation types for the sample-pack front end
//!
//! This crate provides the small set of types shared by every WaveCrate
//! crate: the error type and `Result` alias, and time display helpers.

pub mod error;
pub mod time;

pub use error::{Result, WaveCrateError};
pub use time::format_clock;
