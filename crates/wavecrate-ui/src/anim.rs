//! Animation helpers for the storefront widgets.
//!
//! Declarative tween configuration only; no animation state machine. The
//! entrance constants come from the site's card stagger (0.6 s rise from
//! 30 px below, 50 ms apart).

use std::time::{Duration, Instant};

/// A value that eases toward its target a little each frame.
#[derive(Debug, Clone)]
pub struct Smoothed {
    pub current: f32,
    pub target: f32,
    /// Convergence speed; higher snaps faster.
    pub speed: f32,
}

impl Smoothed {
    pub fn new(value: f32, speed: f32) -> Self {
        Self {
            current: value,
            target: value,
            speed,
        }
    }

    /// Advance by `dt` seconds and return the current value.
    pub fn tick(&mut self, dt: f32) -> f32 {
        self.current += (self.target - self.current) * (1.0 - (-self.speed * dt).exp());
        self.current
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn snap(&mut self) {
        self.current = self.target;
    }

    pub fn settled(&self) -> bool {
        (self.current - self.target).abs() < 0.001
    }
}

impl Default for Smoothed {
    fn default() -> Self {
        Self::new(0.0, 10.0)
    }
}

const FADE_UP_DURATION: Duration = Duration::from_millis(600);
const FADE_UP_RISE_PX: f32 = 30.0;
const FADE_UP_STAGGER: Duration = Duration::from_millis(50);

/// Fade-up entrance tween: opacity 0→1 while rising from below.
#[derive(Debug, Clone, Copy)]
pub struct FadeUp {
    started_at: Option<Instant>,
    delay: Duration,
}

impl FadeUp {
    pub fn new() -> Self {
        Self {
            started_at: None,
            delay: Duration::ZERO,
        }
    }

    /// Entrance for the `index`-th item of a staggered group.
    pub fn staggered(index: usize) -> Self {
        Self {
            started_at: None,
            delay: FADE_UP_STAGGER * index as u32,
        }
    }

    /// Begin the tween. Later calls are no-ops.
    pub fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now + self.delay);
        }
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        let Some(start) = self.started_at else {
            return 0.0;
        };
        if now <= start {
            return 0.0;
        }
        let t = ((now - start).as_secs_f32() / FADE_UP_DURATION.as_secs_f32()).min(1.0);
        ease_out(t)
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        self.progress(now)
    }

    /// Vertical offset from the resting position, in pixels.
    pub fn offset_y(&self, now: Instant) -> f32 {
        FADE_UP_RISE_PX * (1.0 - self.progress(now))
    }

    pub fn finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

impl Default for FadeUp {
    fn default() -> Self {
        Self::new()
    }
}

/// power1.out
fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}
