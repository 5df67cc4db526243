//! GROQ query builder for the samples catalog.
//!
//! Builds the pack-level query string the CMS expects: pack filters at the
//! outer level, sample filters applied inside the `samples[]` projection,
//! paging over the ordered result.

use std::fmt::Write;

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    BpmAsc,
    BpmDesc,
}

impl SortOrder {
    fn expr(self) -> &'static str {
        match self {
            SortOrder::Newest => "_createdAt desc",
            SortOrder::BpmAsc => "samples[].bpm asc",
            SortOrder::BpmDesc => "samples[].bpm desc",
        }
    }
}

/// Filter parameters for one catalog page.
#[derive(Debug, Clone, Default)]
pub struct SamplesQuery {
    start: usize,
    end: Option<usize>,
    q: Option<String>,
    key: Option<String>,
    instrument_slug: Option<String>,
    format_slug: Option<String>,
    artist_slug: Option<String>,
    pack_slug: Option<String>,
    only_free: bool,
    order: SortOrder,
}

const DEFAULT_PAGE_SIZE: usize = 12;

impl SamplesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paging window `[start, end)`; defaults to `[0, 12)`.
    pub fn page(mut self, start: usize, end: usize) -> Self {
        self.start = start;
        self.end = Some(end);
        self
    }

    /// Title prefix search.
    pub fn search(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn instrument(mut self, slug: impl Into<String>) -> Self {
        self.instrument_slug = Some(slug.into());
        self
    }

    pub fn format(mut self, slug: impl Into<String>) -> Self {
        self.format_slug = Some(slug.into());
        self
    }

    pub fn artist(mut self, slug: impl Into<String>) -> Self {
        self.artist_slug = Some(slug.into());
        self
    }

    pub fn pack(mut self, slug: impl Into<String>) -> Self {
        self.pack_slug = Some(slug.into());
        self
    }

    pub fn only_free(mut self, only_free: bool) -> Self {
        self.only_free = only_free;
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Render the GROQ query string.
    pub fn build(&self) -> String {
        let mut filters = vec![
            "_type == 'samplePack'".to_string(),
            "count(samples[]) > 0".to_string(),
        ];
        if let Some(slug) = &self.pack_slug {
            filters.push(format!("slug.current == \"{}\"", escape(slug)));
        }

        let mut inner = Vec::new();
        if let Some(q) = &self.q {
            inner.push(format!("title match \"{}*\"", escape(q)));
        }
        if let Some(key) = &self.key {
            inner.push(format!("key == \"{}\"", escape(key)));
        }
        if self.only_free {
            inner.push("isFree == true".to_string());
        }
        if let Some(slug) = &self.instrument_slug {
            inner.push(format!(
                "\"{}\" in instruments[]->slug.current",
                escape(slug)
            ));
        }
        if let Some(slug) = &self.format_slug {
            inner.push(format!("\"{}\" in formats[]->slug.current", escape(slug)));
        }
        if let Some(slug) = &self.artist_slug {
            inner.push(format!(
                "\"{}\" in createdByArtists[]->slug.current",
                escape(slug)
            ));
        }
        let sample_filter = if inner.is_empty() {
            String::new()
        } else {
            inner.join(" && ")
        };

        let end = self.end.unwrap_or(self.start + DEFAULT_PAGE_SIZE);
        let mut out = String::new();
        let _ = write!(
            out,
            "*[{filters}] | order({order})[{start}...{end}]{{\n  title,\n  slug,\n  \"packSlug\": slug.current,\n  \"packTitle\": title,\n  \"artist\": createdByArtists[0]->{{name, slug}},\n  samples[{sample_filter}]{{\n    title,\n    slug,\n    bpm,\n    key,\n    lengthSec,\n    isFree,\n    previewUrl,\n    waveformPngUrl,\n    waveformPeaksUrl,\n    r2Key\n  }}\n}}",
            filters = filters.join(" && "),
            order = self.order.expr(),
            start = self.start,
        );
        out
    }
}

/// Escape double quotes so filter values cannot break out of the literal.
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
