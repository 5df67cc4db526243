//! Sample tiles for the catalog grid.

use std::time::Instant;

use egui::{Button, Frame, Margin, RichText, Rounding, Stroke, Ui};
use wavecrate_catalog::Sample;

use crate::anim::FadeUp;
use crate::theme::Theme;
use crate::waveform::WaveformView;

/// User intent reported back from one card.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardAction {
    pub toggle_play: bool,
    pub download: bool,
}

pub struct SampleCard<'a> {
    sample: &'a Sample,
    is_active: bool,
    /// Bars and progress for the active tile; empty bars render flat.
    bars: &'a [f32],
    progress: f32,
    entrance: Option<&'a FadeUp>,
}

impl<'a> SampleCard<'a> {
    pub fn new(sample: &'a Sample, is_active: bool) -> Self {
        Self {
            sample,
            is_active,
            bars: &[],
            progress: 0.0,
            entrance: None,
        }
    }

    pub fn waveform(mut self, bars: &'a [f32], progress: f32) -> Self {
        self.bars = bars;
        self.progress = progress;
        self
    }

    pub fn entrance(mut self, anim: &'a FadeUp) -> Self {
        self.entrance = Some(anim);
        self
    }

    pub fn show(self, ui: &mut Ui, now: Instant) -> CardAction {
        let mut action = CardAction::default();

        if let Some(anim) = self.entrance {
            ui.add_space(anim.offset_y(now));
            ui.set_opacity(anim.opacity(now));
        }

        Frame::none()
            .fill(Theme::bg())
            .stroke(Stroke::new(1.0, Theme::bg_raised()))
            .rounding(Rounding::same(12.0))
            .inner_margin(Margin::same(Theme::SPACE_MD))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(&self.sample.title)
                                .size(Theme::FONT_MD)
                                .color(Theme::text()),
                        );
                        ui.label(
                            RichText::new(self.sample.meta_line())
                                .size(Theme::FONT_XS)
                                .color(Theme::text_muted()),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                        let badge = if self.sample.is_free { "free" } else { "locked" };
                        ui.label(
                            RichText::new(badge)
                                .size(Theme::FONT_XS)
                                .color(Theme::text_muted()),
                        );
                    });
                });

                ui.add_space(Theme::SPACE_SM);
                WaveformView::tile(self.bars, self.progress).show(ui);
                ui.add_space(Theme::SPACE_SM);

                ui.horizontal(|ui| {
                    let label = if self.is_active { "pause" } else { "play" };
                    let play = Button::new(
                        RichText::new(label)
                            .size(Theme::FONT_SM)
                            .color(Theme::accent_lavender()),
                    )
                    .frame(false);
                    if ui.add(play).clicked() {
                        action.toggle_play = true;
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let download = Button::new(
                            RichText::new("download").size(Theme::FONT_SM),
                        );
                        if ui.add_enabled(self.sample.is_free, download).clicked() {
                            action.download = true;
                        }
                    });
                });
            });

        action
    }
}
