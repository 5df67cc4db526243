//! Peak-bar waveform widget.
//!
//! Draws an amplitude-bar strip with a progress split, reports pointer
//! position for the hover marker, and click position as a seek fraction.

use egui::{pos2, vec2, Color32, Rect, Sense, Stroke, Ui};

use crate::theme::Theme;

/// How a waveform strip renders at a given width.
#[derive(Debug, Clone, Copy)]
pub struct BarLayout {
    pub bar_width: f32,
    pub bar_gap: f32,
}

impl Default for BarLayout {
    fn default() -> Self {
        Self {
            bar_width: 2.0,
            bar_gap: 1.0,
        }
    }
}

impl BarLayout {
    /// Number of bars that fit in `width_px`.
    pub fn bar_count(&self, width_px: f32) -> usize {
        let step = self.bar_width + self.bar_gap;
        if step <= 0.0 || width_px <= 0.0 {
            return 0;
        }
        (width_px / step).floor() as usize
    }
}

/// Map bar `i` of `count` onto an amplitude from `bars`.
fn amplitude_at(bars: &[f32], i: usize, count: usize) -> f32 {
    if bars.is_empty() || count == 0 {
        return 0.0;
    }
    let idx = i * bars.len() / count;
    bars[idx.min(bars.len() - 1)].clamp(0.0, 1.0)
}

/// Interaction results for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveformResponse {
    /// Seek target as a fraction of the width, when clicked.
    pub clicked_fraction: Option<f32>,
    /// Pointer x relative to the widget, while hovered.
    pub pointer_x: Option<f32>,
    pub hovered: bool,
}

/// One waveform strip.
pub struct WaveformView<'a> {
    bars: &'a [f32],
    progress: f32,
    height_px: f32,
    layout: BarLayout,
    wave_color: Color32,
    progress_color: Color32,
    hover_marker: Option<f32>,
}

impl<'a> WaveformView<'a> {
    /// Player-bar styling: white bars, cyan progress.
    pub fn player(bars: &'a [f32], progress: f32, height_px: f32) -> Self {
        Self {
            bars,
            progress: progress.clamp(0.0, 1.0),
            height_px,
            layout: BarLayout {
                bar_width: 2.0,
                bar_gap: 0.0,
            },
            wave_color: Theme::wave_white(),
            progress_color: Theme::brand_cyan(),
            hover_marker: None,
        }
    }

    /// Grid-tile styling: lavender bars, white progress.
    pub fn tile(bars: &'a [f32], progress: f32) -> Self {
        Self {
            bars,
            progress: progress.clamp(0.0, 1.0),
            height_px: 60.0,
            layout: BarLayout::default(),
            wave_color: Theme::accent_lavender(),
            progress_color: Theme::wave_white(),
            hover_marker: None,
        }
    }

    /// Draw the hover marker at `x_px` from the left edge.
    pub fn with_hover_marker(mut self, x_px: Option<f32>) -> Self {
        self.hover_marker = x_px;
        self
    }

    pub fn show(self, ui: &mut Ui) -> WaveformResponse {
        let width = ui.available_width();
        let (response, painter) =
            ui.allocate_painter(vec2(width, self.height_px), Sense::click());
        let rect = response.rect;

        let count = self.layout.bar_count(rect.width());
        let step = self.layout.bar_width + self.layout.bar_gap;
        let progress_x = rect.left() + rect.width() * self.progress;

        for i in 0..count {
            let amp = amplitude_at(self.bars, i, count);
            let bar_h = (amp * rect.height()).max(2.0);
            let x = rect.left() + i as f32 * step;
            let bar = Rect::from_min_size(
                pos2(x, rect.center().y - bar_h / 2.0),
                vec2(self.layout.bar_width, bar_h),
            );
            let color = if x < progress_x {
                self.progress_color
            } else {
                self.wave_color
            };
            painter.rect_filled(bar, 0.0, color);
        }

        if let Some(x) = self.hover_marker {
            let line_x = rect.left() + x.clamp(0.0, rect.width());
            painter.line_segment(
                [pos2(line_x, rect.top()), pos2(line_x, rect.bottom())],
                Stroke::new(1.0, Theme::brand_cyan()),
            );
        }

        let pointer_x = response
            .hover_pos()
            .map(|pos| (pos.x - rect.left()).clamp(0.0, rect.width()));
        let clicked_fraction = if response.clicked() {
            response
                .interact_pointer_pos()
                .map(|pos| ((pos.x - rect.left()) / rect.width().max(1.0)).clamp(0.0, 1.0))
        } else {
            None
        };

        WaveformResponse {
            clicked_fraction,
            pointer_x,
            hovered: response.hovered(),
        }
    }
}
