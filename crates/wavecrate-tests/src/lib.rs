//! Integration test crate for WaveCrate.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on multiple wavecrate crates to verify they work together.

#[cfg(test)]
mod support;

#[cfg(test)]
mod player;

#[cfg(test)]
mod catalog;
