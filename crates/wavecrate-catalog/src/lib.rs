//! WaveCrate Catalog - CMS-backed sample catalog
//!
//! The data model and query builder for the sample-pack catalog, waveform
//! peaks handling, and the preview grid's at-most-one-active-voice player.

pub mod grid;
pub mod peaks;
pub mod query;
pub mod sample;

pub use grid::{PeaksFetcher, PreviewGrid};
pub use peaks::Peaks;
pub use query::{SamplesQuery, SortOrder};
pub use sample::{flatten_packs, Artist, Sample, SamplePack};
