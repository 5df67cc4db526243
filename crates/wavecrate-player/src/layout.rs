//! Responsive layout for the player widget.
//!
//! Runs independently of playback: waveform height by breakpoint, hero lift,
//! settle-on-scroll, transition gating, and the hover indicator.

use std::time::{Duration, Instant};

/// Scroll distance after which a hero widget settles into place.
pub const SCROLL_SETTLE_THRESHOLD_PX: f32 = 150.0;

/// Viewport breakpoints for the waveform height step function.
const BREAKPOINT_SM_PX: f32 = 640.0;
const BREAKPOINT_LG_PX: f32 = 1024.0;

/// Hero lift: distance below the hero title the widget floats before
/// settling. Derived from viewport height, clamped to a comfortable minimum.
const HERO_MIN_LIFT_PX: f32 = 160.0;
const HERO_BOTTOM_OFFSET_PX: f32 = 100.0;
const HERO_CONTENT_ADJUST_PX: f32 = 64.0;
const HERO_VIEWPORT_RATIO: f32 = 0.33;

/// Delay between first layout and enabling transitions, so the initial
/// paint never animates from an undefined position.
const TRANSITION_ARM_DELAY: Duration = Duration::from_millis(30);

/// Viewport dimensions in CSS-style pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width_px: f32,
    pub height_px: f32,
}

/// Waveform pixel height as a step function of viewport width.
pub fn waveform_height_for_width(width_px: f32) -> u32 {
    if width_px < BREAKPOINT_SM_PX {
        36
    } else if width_px < BREAKPOINT_LG_PX {
        48
    } else {
        60
    }
}

/// Vertical offset for a hero-mode widget at rest above its settled spot.
pub fn hero_lift_px(viewport_height_px: f32) -> f32 {
    let target_from_bottom = (viewport_height_px * HERO_VIEWPORT_RATIO)
        .round()
        .max(HERO_MIN_LIFT_PX);
    (target_from_bottom - HERO_BOTTOM_OFFSET_PX + HERO_CONTENT_ADJUST_PX).max(HERO_MIN_LIFT_PX)
}

/// Capability-gated scroll observer.
///
/// Whether scroll tracking is active is decided at construction, not by
/// branching inside every callback: static widgets start settled and never
/// look at scroll at all.
pub enum SettlePolicy {
    Hero {
        settled: bool,
        evaluated_this_frame: bool,
    },
    Static,
}

impl SettlePolicy {
    pub fn for_mode(hero_mode: bool) -> Self {
        if hero_mode {
            Self::Hero {
                settled: false,
                evaluated_this_frame: false,
            }
        } else {
            Self::Static
        }
    }

    pub fn settled(&self) -> bool {
        match self {
            Self::Hero { settled, .. } => *settled,
            Self::Static => true,
        }
    }

    /// Reset scroll coalescing; call once per animation frame.
    pub fn begin_frame(&mut self) {
        if let Self::Hero {
            evaluated_this_frame,
            ..
        } = self
        {
            *evaluated_this_frame = false;
        }
    }

    /// Observe a scroll position. Evaluated at most once per frame.
    /// Returns `true` when the settled flag flipped.
    pub fn observe_scroll(&mut self, scroll_y_px: f32) -> bool {
        match self {
            Self::Hero {
                settled,
                evaluated_this_frame,
            } => {
                if *evaluated_this_frame {
                    return false;
                }
                *evaluated_this_frame = true;
                let now_settled = scroll_y_px > SCROLL_SETTLE_THRESHOLD_PX;
                let changed = now_settled != *settled;
                *settled = now_settled;
                changed
            }
            Self::Static => false,
        }
    }
}

/// Suppresses transition animations until shortly after the first layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionGate {
    enabled_at: Option<Instant>,
}

impl TransitionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the gate at first layout. Later calls are no-ops.
    pub fn arm(&mut self, now: Instant) {
        if self.enabled_at.is_none() {
            self.enabled_at = Some(now + TRANSITION_ARM_DELAY);
        }
    }

    pub fn enabled(&self, now: Instant) -> bool {
        self.enabled_at.is_some_and(|at| now >= at)
    }
}

/// Thin marker tracking the pointer inside the waveform container.
///
/// Purely presentational; nothing is retained once the pointer leaves.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoverIndicator {
    x_px: f32,
    visible: bool,
}

impl HoverIndicator {
    pub fn pointer_moved(&mut self, x_px: f32, container_width_px: f32) {
        self.x_px = x_px.clamp(0.0, container_width_px.max(0.0));
        self.visible = true;
    }

    pub fn pointer_left(&mut self) {
        self.visible = false;
        self.x_px = 0.0;
    }

    /// Marker position while the pointer is inside the container.
    pub fn position(&self) -> Option<f32> {
        self.visible.then_some(self.x_px)
    }
}

/// Derived layout values the presentation layer reads each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutState {
    pub waveform_height_px: u32,
    pub lift_px: f32,
    pub settled: bool,
    pub transitions_enabled: bool,
}

/// Owns the layout policy for one widget.
pub struct LayoutEngine {
    hero_mode: bool,
    waveform_height_px: u32,
    lift_px: f32,
    settle: SettlePolicy,
    transitions: TransitionGate,
}

impl LayoutEngine {
    pub fn new(hero_mode: bool) -> Self {
        Self {
            hero_mode,
            waveform_height_px: 60,
            lift_px: 0.0,
            settle: SettlePolicy::for_mode(hero_mode),
            transitions: TransitionGate::new(),
        }
    }

    /// Recompute height and lift for a viewport.
    /// Returns `true` when the waveform height stepped to a new value.
    pub fn compute(&mut self, viewport: Viewport) -> bool {
        let height = waveform_height_for_width(viewport.width_px);
        let changed = height != self.waveform_height_px;
        self.waveform_height_px = height;
        self.lift_px = if self.hero_mode {
            hero_lift_px(viewport.height_px)
        } else {
            0.0
        };
        changed
    }

    pub fn waveform_height_px(&self) -> u32 {
        self.waveform_height_px
    }

    pub fn arm_transitions(&mut self, now: Instant) {
        self.transitions.arm(now);
    }

    pub fn begin_frame(&mut self) {
        self.settle.begin_frame();
    }

    pub fn observe_scroll(&mut self, scroll_y_px: f32) -> bool {
        self.settle.observe_scroll(scroll_y_px)
    }

    pub fn state(&self, now: Instant) -> LayoutState {
        LayoutState {
            waveform_height_px: self.waveform_height_px,
            lift_px: self.lift_px,
            settled: self.settle.settled(),
            transitions_enabled: self.transitions.enabled(now),
        }
    }
}
