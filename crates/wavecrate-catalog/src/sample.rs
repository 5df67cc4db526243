//! Catalog data model.
//!
//! Mirrors the CMS payload shape: packs of samples, flattened for display
//! with the pack and artist fields stamped onto each sample.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// One sample as the front end consumes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub bpm: Option<f32>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub length_sec: Option<f32>,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub waveform_png_url: Option<String>,
    #[serde(default)]
    pub waveform_peaks_url: Option<String>,
    #[serde(default)]
    pub pack_slug: Option<String>,
    #[serde(default)]
    pub pack_title: Option<String>,
    #[serde(default)]
    pub artist: Option<Artist>,
}

impl Sample {
    /// `key · bpm BPM · lengths` meta line for cards.
    pub fn meta_line(&self) -> String {
        let mut parts = Vec::new();
        if let Some(key) = &self.key {
            parts.push(key.clone());
        }
        if let Some(bpm) = self.bpm {
            parts.push(format!("{bpm:.0} BPM"));
        }
        if let Some(len) = self.length_sec {
            parts.push(format!("{len:.0}s"));
        }
        parts.join(" · ")
    }
}

/// One pack as returned by the samples query projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplePack {
    #[serde(default)]
    pub pack_slug: Option<String>,
    #[serde(default)]
    pub pack_title: Option<String>,
    #[serde(default)]
    pub artist: Option<Artist>,
    #[serde(default)]
    pub samples: Vec<Sample>,
}

/// Flatten packs into display samples, stamping pack identity and artist
/// onto each entry (the API route's shape).
pub fn flatten_packs(packs: Vec<SamplePack>) -> Vec<Sample> {
    packs
        .into_iter()
        .flat_map(|pack| {
            let pack_slug = pack.pack_slug;
            let pack_title = pack.pack_title;
            let artist = pack.artist;
            pack.samples.into_iter().map(move |mut sample| {
                sample.pack_slug = pack_slug.clone();
                sample.pack_title = pack_title.clone();
                sample.artist = artist.clone();
                sample
            })
        })
        .collect()
}
