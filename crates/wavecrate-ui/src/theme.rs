//! Site palette: dark storefront with cyan and lavender accents.

use egui::Color32;

/// Central theme matching the web styling.
pub struct Theme;

impl Theme {
    // ── Typography ─────────────────────────────────────────────
    pub const FONT_XS: f32 = 11.0; // meta lines, badges
    pub const FONT_SM: f32 = 13.0; // body, buttons
    pub const FONT_MD: f32 = 15.0; // card titles
    pub const FONT_LG: f32 = 18.0; // section headers

    // ── Spacing ────────────────────────────────────────────────
    pub const SPACE_SM: f32 = 8.0;
    pub const SPACE_MD: f32 = 16.0;
    pub const SPACE_LG: f32 = 24.0;

    // ── Backgrounds (zinc scale) ───────────────────────────────
    pub const fn bg() -> Color32 {
        Color32::from_rgb(9, 9, 11)
    }
    pub const fn bg_panel() -> Color32 {
        Color32::from_rgb(24, 24, 27)
    }
    pub const fn bg_raised() -> Color32 {
        Color32::from_rgb(39, 39, 42)
    }
    /// Player bar backdrop (black @ 80%).
    pub const fn bg_player() -> Color32 {
        Color32::from_rgba_premultiplied(0, 0, 0, 204)
    }

    // ── Borders ────────────────────────────────────────────────
    pub const fn border() -> Color32 {
        Color32::from_rgb(63, 63, 70)
    }
    pub const fn border_stone() -> Color32 {
        Color32::from_rgb(168, 162, 158)
    }

    // ── Text ───────────────────────────────────────────────────
    pub const fn text() -> Color32 {
        Color32::from_rgb(244, 244, 245)
    }
    pub const fn text_muted() -> Color32 {
        Color32::from_rgb(113, 113, 122)
    }

    // ── Accents ────────────────────────────────────────────────
    /// Player progress, cursor, and controls.
    pub const fn brand_cyan() -> Color32 {
        Color32::from_rgb(120, 220, 232)
    }
    /// Grid tile waveforms.
    pub const fn accent_lavender() -> Color32 {
        Color32::from_rgb(193, 168, 255)
    }
    pub const fn wave_white() -> Color32 {
        Color32::from_rgb(255, 255, 255)
    }
}
