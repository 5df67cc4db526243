//! WaveCrate storefront demo.
//!
//! Wires the player controller, preview grid, and widgets into an eframe
//! shell with a simulated waveform engine, so the whole preview flow can be
//! exercised without a CDN or an audio device:
//! - a hero player bar that rides elevated until the page settles,
//! - a sample grid with one-voice preview playback,
//! - preferences persisted to the platform data directory.

mod sim;

use std::time::{Duration, Instant};

use anyhow::Result;
use egui::{Align2, CentralPanel, Id, RichText, ScrollArea};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use wavecrate_catalog::{flatten_packs, Artist, Peaks, PeaksFetcher, PreviewGrid, Sample, SamplePack};
use wavecrate_player::{
    JsonFileStore, MemoryStore, PlayerConfig, PlayerController, PrefKeys, PreferenceStore,
    Viewport,
};
use wavecrate_ui::{FadeUp, PlayerBar, SampleCard, Theme};

use crate::sim::SimEngineFactory;

const HERO_PREVIEW_URL: &str = "https://cdn.wavecrate.example/previews/night-drive.mp3";
const GRID_COLUMNS: usize = 3;

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("WaveCrate storefront starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 840.0])
            .with_min_inner_size([480.0, 400.0])
            .with_title("WaveCrate"),
        ..Default::default()
    };
    eframe::run_native(
        "WaveCrate",
        options,
        Box::new(|_cc| Ok(Box::new(WavecrateApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}

/// Deterministic demo peaks derived from the URL, so every sample gets a
/// distinct but stable waveform.
struct SyntheticPeaksFetcher;

fn synth_peaks(seed: u64, len: usize) -> Vec<f32> {
    let mut state = seed | 1;
    (0..len)
        .map(|i| {
            // xorshift noise under a soft attack/decay envelope
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let noise = (state % 1000) as f32 / 1000.0;
            let t = i as f32 / len as f32;
            let envelope = (t * 8.0).min(1.0) * (1.0 - t * 0.6);
            (0.15 + 0.85 * noise) * envelope
        })
        .collect()
}

fn url_seed(url: &str) -> u64 {
    url.bytes().fold(0xcbf2_9ce4_8422_2325, |acc, b| {
        (acc ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

impl PeaksFetcher for SyntheticPeaksFetcher {
    fn fetch(&self, url: &str) -> wavecrate_core::Result<Peaks> {
        Ok(Peaks::from_samples(synth_peaks(url_seed(url), 256)))
    }
}

fn preference_store() -> Box<dyn PreferenceStore> {
    match dirs::data_dir() {
        Some(dir) => Box::new(JsonFileStore::open(dir.join("wavecrate").join("player.json"))),
        None => {
            warn!("no platform data directory, preferences will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

fn demo_catalog() -> Vec<Sample> {
    let track = |title: &str, bpm: f32, key: &str, len: f32, free: bool| Sample {
        title: title.to_string(),
        bpm: Some(bpm),
        key: Some(key.to_string()),
        length_sec: Some(len),
        is_free: free,
        preview_url: Some(format!(
            "https://cdn.wavecrate.example/previews/{}.mp3",
            title.to_lowercase().replace(' ', "-")
        )),
        waveform_peaks_url: Some(format!(
            "https://cdn.wavecrate.example/peaks/{}.json",
            title.to_lowercase().replace(' ', "-")
        )),
        ..Sample::default()
    };
    let packs = vec![
        SamplePack {
            pack_slug: Some("night-drive".to_string()),
            pack_title: Some("Night Drive".to_string()),
            artist: Some(Artist {
                name: Some("Mori".to_string()),
                slug: Some("mori".to_string()),
            }),
            samples: vec![
                track("Neon Keys", 124.0, "A Minor", 8.0, true),
                track("Tunnel Bass", 124.0, "A Minor", 4.0, false),
                track("Vapor Pad", 80.0, "C Major", 16.0, false),
            ],
        },
        SamplePack {
            pack_slug: Some("dust-and-tape".to_string()),
            pack_title: Some("Dust and Tape".to_string()),
            artist: Some(Artist {
                name: Some("Hale".to_string()),
                slug: Some("hale".to_string()),
            }),
            samples: vec![
                track("Worn Break", 92.0, "F Minor", 9.0, true),
                track("Cassette Chord", 92.0, "F Minor", 6.0, false),
                track("Hiss Riser", 140.0, "G Minor", 3.0, true),
            ],
        },
    ];
    flatten_packs(packs)
}

struct WavecrateApp {
    controller: PlayerController,
    grid: PreviewGrid,
    samples: Vec<Sample>,
    hero_bars: Vec<f32>,
    card_anims: Vec<FadeUp>,
    factory: SimEngineFactory,
    fetcher: SyntheticPeaksFetcher,
    mounted: bool,
}

impl WavecrateApp {
    fn new() -> Self {
        let samples = demo_catalog();
        let mut factory = SimEngineFactory::new(6.0).with_duration(HERO_PREVIEW_URL, 187.0);
        for sample in &samples {
            if let (Some(url), Some(len)) = (sample.preview_url.as_deref(), sample.length_sec) {
                factory = factory.with_duration(url, f64::from(len));
            }
        }

        let config = PlayerConfig {
            audio_url: Some(HERO_PREVIEW_URL.to_string()),
            title: Some("Night Drive".to_string()),
            artist: Some("Mori".to_string()),
            hero_mode: true,
        };
        let controller = PlayerController::new(
            config,
            preference_store(),
            PrefKeys::default(),
            Box::new(factory.clone()),
        );

        let card_anims = (0..samples.len()).map(FadeUp::staggered).collect();
        Self {
            controller,
            grid: PreviewGrid::new(),
            samples,
            hero_bars: synth_peaks(url_seed(HERO_PREVIEW_URL), 256),
            card_anims,
            factory,
            fetcher: SyntheticPeaksFetcher,
            mounted: false,
        }
    }

    fn show_hero(&self, ui: &mut egui::Ui, screen_height: f32) {
        ui.add_space(screen_height * 0.18);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("WAVECRATE")
                    .size(52.0)
                    .color(Theme::text())
                    .strong(),
            );
            ui.label(
                RichText::new("curated sample packs, previewed in place")
                    .size(Theme::FONT_MD)
                    .color(Theme::text_muted()),
            );
        });
        // Room for the elevated player bar before the grid begins.
        ui.add_space(screen_height * 0.5);
    }

    fn show_grid(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.label(
            RichText::new("samples")
                .size(Theme::FONT_LG)
                .color(Theme::text()),
        );
        ui.add_space(Theme::SPACE_MD);

        let active_index = self.grid.active_index();
        let progress = self
            .grid
            .progress()
            .map(|(t, d)| if d > 0.0 { (t / d) as f32 } else { 0.0 })
            .unwrap_or(0.0);

        let mut toggled = None;
        let mut downloads = Vec::new();
        for (row, chunk) in self.samples.chunks(GRID_COLUMNS).enumerate() {
            let grid = &self.grid;
            let anims = &self.card_anims;
            ui.columns(GRID_COLUMNS, |cols| {
                for (col, sample) in chunk.iter().enumerate() {
                    let index = row * GRID_COLUMNS + col;
                    let is_active = active_index == Some(index);
                    let (bars, progress) = if is_active {
                        (grid.active_bars(), progress)
                    } else {
                        (&[][..], 0.0)
                    };
                    let action = SampleCard::new(sample, is_active)
                        .waveform(bars, progress)
                        .entrance(&anims[index])
                        .show(&mut cols[col], now);
                    if action.toggle_play {
                        toggled = Some(index);
                    }
                    if action.download {
                        downloads.push(index);
                    }
                }
            });
            ui.add_space(Theme::SPACE_MD);
        }

        if let Some(index) = toggled {
            self.grid
                .toggle(index, &self.samples[index], &self.fetcher, &self.factory);
        }
        for index in downloads {
            info!(title = %self.samples[index].title, "download requested");
        }
    }
}

impl eframe::App for WavecrateApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let screen = ctx.screen_rect();
        let viewport = Viewport {
            width_px: screen.width(),
            height_px: screen.height(),
        };

        if !self.mounted {
            self.controller.mount(viewport, now);
            for anim in &mut self.card_anims {
                anim.start(now);
            }
            self.mounted = true;
        } else {
            self.controller.handle_resize(viewport);
        }
        self.controller.begin_frame();
        self.controller.pump_events();
        self.grid.pump_events();

        CentralPanel::default()
            .frame(egui::Frame::default().fill(Theme::bg()))
            .show(ctx, |ui| {
                let output = ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.add_space(Theme::SPACE_LG);
                        self.show_hero(ui, screen.height());
                        ui.horizontal(|ui| {
                            ui.add_space(Theme::SPACE_LG);
                            ui.vertical(|ui| {
                                self.show_grid(ui, now);
                            });
                            ui.add_space(Theme::SPACE_LG);
                        });
                        // Leave the last row clear of the docked bar.
                        ui.add_space(120.0);
                    });
                self.controller.handle_scroll(output.state.offset.y);
            });

        let layout = self.controller.layout_state(now);
        let lift = PlayerBar::vertical_offset(&layout);
        egui::Area::new(Id::new("player-bar"))
            .anchor(Align2::CENTER_BOTTOM, egui::vec2(0.0, -16.0 - lift))
            .show(ctx, |ui| {
                ui.set_width((screen.width() * 0.7).clamp(360.0, 980.0));
                PlayerBar::show(ui, &mut self.controller, &self.hero_bars, now);
            });

        // The sim engine only advances when polled.
        ctx.request_repaint_after(Duration::from_millis(33));
    }
}

impl Drop for WavecrateApp {
    fn drop(&mut self) {
        self.grid.stop();
        self.controller.unmount();
    }
}
