//! Owned handle for the single live engine session.
//!
//! Invariant: at most one live engine exists per slot, and the occupant is
//! torn down (with its state snapshot handed to the caller) before a new
//! session is built. [`SessionSlot::replace`] is the only way to install a
//! session, so no code path can hold two engines at once.

use tracing::debug;
use uuid::Uuid;
use wavecrate_core::Result;

use crate::engine::WaveformEngine;

/// One playback session: an engine bound to an audio URL.
///
/// The URL is the session's identity; changing it means destroying this
/// session and creating another.
pub struct PlaybackSession {
    id: Uuid,
    audio_url: String,
    engine: Box<dyn WaveformEngine>,
}

impl PlaybackSession {
    pub fn new(audio_url: impl Into<String>, engine: Box<dyn WaveformEngine>) -> Self {
        Self {
            id: Uuid::new_v4(),
            audio_url: audio_url.into(),
            engine,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn audio_url(&self) -> &str {
        &self.audio_url
    }

    pub fn engine(&self) -> &dyn WaveformEngine {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> &mut dyn WaveformEngine {
        self.engine.as_mut()
    }

    /// Read the state that must survive teardown.
    pub fn snapshot(&self) -> TeardownSnapshot {
        TeardownSnapshot {
            position_sec: self.engine.current_time(),
            was_playing: self.engine.is_playing(),
        }
    }
}

/// Last known engine state, captured right before the engine is released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeardownSnapshot {
    pub position_sec: f64,
    pub was_playing: bool,
}

/// The single mutation point for session ownership.
#[derive(Default)]
pub struct SessionSlot {
    current: Option<PlaybackSession>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn get(&self) -> Option<&PlaybackSession> {
        self.current.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut PlaybackSession> {
        self.current.as_mut()
    }

    pub fn audio_url(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.audio_url())
    }

    /// Tear down the occupant, if any, returning its final snapshot.
    pub fn clear(&mut self) -> Option<TeardownSnapshot> {
        let session = self.current.take()?;
        let snapshot = session.snapshot();
        debug!(id = %session.id(), url = session.audio_url(), "session torn down");
        // Dropping the engine releases any in-flight load.
        Some(snapshot)
    }

    /// Replace the occupant.
    ///
    /// The old session is torn down and `on_teardown` runs (flushing its
    /// snapshot) strictly before `build` is called, so the persistence write
    /// is complete before the next session's creation begins.
    pub fn replace(
        &mut self,
        on_teardown: impl FnOnce(TeardownSnapshot),
        build: impl FnOnce() -> Result<PlaybackSession>,
    ) -> Result<Uuid> {
        if let Some(snapshot) = self.clear() {
            on_teardown(snapshot);
        }
        let session = build()?;
        let id = session.id();
        debug!(%id, url = session.audio_url(), "session installed");
        self.current = Some(session);
        Ok(id)
    }
}
