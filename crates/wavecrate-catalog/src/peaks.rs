//! Precomputed waveform peaks.
//!
//! Peaks files hold an amplitude envelope so a waveform can be drawn
//! without decoding the audio. Payloads are either a flat array or one
//! array per channel; channels are mixed down by maximum magnitude.

use serde::Deserialize;
use wavecrate_core::{Result, WaveCrateError};

#[derive(Deserialize)]
#[serde(untagged)]
enum PeaksPayload {
    Mono(Vec<f32>),
    Channels(Vec<Vec<f32>>),
}

/// Mono amplitude envelope for waveform display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Peaks {
    samples: Vec<f32>,
}

impl Peaks {
    pub fn from_samples(samples: Vec<f32>) -> Self {
        Self { samples }
    }

    /// Parse a peaks JSON payload.
    pub fn from_json(json: &str) -> Result<Self> {
        let payload: PeaksPayload = serde_json::from_str(json)
            .map_err(|e| WaveCrateError::Peaks(format!("malformed peaks payload: {e}")))?;
        Ok(match payload {
            PeaksPayload::Mono(samples) => Self { samples },
            PeaksPayload::Channels(channels) => Self::mix_down(&channels),
        })
    }

    fn mix_down(channels: &[Vec<f32>]) -> Self {
        let len = channels.iter().map(Vec::len).max().unwrap_or(0);
        let mut samples = vec![0.0f32; len];
        for channel in channels {
            for (i, &v) in channel.iter().enumerate() {
                if v.abs() > samples[i].abs() {
                    samples[i] = v;
                }
            }
        }
        Self { samples }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Reduce to `columns` bars, keeping the peak magnitude per bucket.
    /// Returns all-zero bars when there is no data.
    pub fn resample(&self, columns: usize) -> Vec<f32> {
        if columns == 0 {
            return Vec::new();
        }
        if self.samples.is_empty() {
            return vec![0.0; columns];
        }
        let mut bars = Vec::with_capacity(columns);
        let len = self.samples.len();
        for col in 0..columns {
            let start = col * len / columns;
            let end = (((col + 1) * len) / columns).max(start + 1).min(len);
            let peak = self.samples[start..end]
                .iter()
                .fold(0.0f32, |acc, &v| acc.max(v.abs()));
            bars.push(peak);
        }
        bars
    }
}
