//! The floating audio preview player.
//!
//! Reflects [`PlayerController`] state and forwards user actions; playback
//! semantics live entirely in the controller.

use std::time::Instant;

use egui::{Button, Frame, Margin, RichText, Slider, Stroke, Ui};
use wavecrate_core::format_clock;
use wavecrate_player::{LayoutState, PlayerController};

use crate::theme::Theme;
use crate::waveform::WaveformView;

/// Width reserved for the time display and volume slider.
const TRAILING_CONTROLS_PX: f32 = 230.0;

pub struct PlayerBar;

impl PlayerBar {
    /// Vertical offset of the bar above its resting position.
    pub fn vertical_offset(layout: &LayoutState) -> f32 {
        if layout.settled {
            0.0
        } else {
            layout.lift_px
        }
    }

    /// Draw the bar. Renders nothing without an audio URL.
    pub fn show(ui: &mut Ui, controller: &mut PlayerController, bars: &[f32], now: Instant) {
        let has_url = controller
            .config()
            .audio_url
            .as_deref()
            .is_some_and(|url| !url.is_empty());
        if !has_url {
            return;
        }

        let state = *controller.state();
        let layout = controller.layout_state(now);
        let title = controller
            .config()
            .title
            .clone()
            .unwrap_or_else(|| "Unknown Track".to_string());
        let artist = controller
            .config()
            .artist
            .clone()
            .unwrap_or_else(|| "Unknown Artist".to_string());

        Frame::none()
            .fill(Theme::bg_player())
            .stroke(Stroke::new(1.0, Theme::border_stone()))
            .inner_margin(Margin::symmetric(Theme::SPACE_MD, Theme::SPACE_SM + 4.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let symbol = if state.is_playing { "⏸" } else { "▶" };
                    let button = Button::new(RichText::new(symbol).size(Theme::FONT_LG))
                        .fill(Theme::brand_cyan())
                        .min_size(egui::vec2(40.0, 40.0));
                    if ui.add_enabled(controller.has_session(), button).clicked() {
                        controller.toggle_play_pause();
                    }

                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(&title)
                                .size(Theme::FONT_SM)
                                .color(Theme::text()),
                        );
                        ui.label(
                            RichText::new(&artist)
                                .size(Theme::FONT_XS)
                                .color(Theme::text_muted()),
                        );
                    });

                    let wave_width =
                        (ui.available_width() - TRAILING_CONTROLS_PX).max(80.0);
                    ui.scope(|ui| {
                        ui.set_width(wave_width);
                        let progress = if state.duration_sec > 0.0 {
                            (state.current_time_sec / state.duration_sec) as f32
                        } else {
                            0.0
                        };
                        let response = WaveformView::player(
                            bars,
                            progress,
                            layout.waveform_height_px as f32,
                        )
                        .with_hover_marker(controller.hover_position())
                        .show(ui);

                        match response.pointer_x {
                            Some(x) => controller.pointer_moved(x, wave_width),
                            None => controller.pointer_left(),
                        }
                        if let Some(fraction) = response.clicked_fraction {
                            controller.seek_to_fraction(fraction as f64);
                        }
                    });

                    ui.label(
                        RichText::new(format!(
                            "{} / {}",
                            format_clock(state.current_time_sec),
                            format_clock(state.duration_sec)
                        ))
                        .monospace()
                        .size(Theme::FONT_SM)
                        .color(Theme::text()),
                    );

                    let mut volume = state.volume as f32;
                    let slider = Slider::new(&mut volume, 0.0..=1.0).show_value(false);
                    if ui.add(slider).changed() {
                        controller.set_volume(volume as f64);
                    }
                });
            });
    }
}
