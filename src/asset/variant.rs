//! Responsive image descriptors.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use super::ImageFormat;

/// One encoded file of a logical image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    /// MIME type, e.g. `image/avif`.
    pub media_type: String,
    /// Public URL of the file.
    pub url: String,
    /// Intrinsic width from an `@<n>w` stem suffix, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

impl ImageSource {
    pub fn new(format: ImageFormat, url: impl Into<String>, width: Option<u32>) -> Self {
        Self {
            media_type: format.media_type().to_string(),
            url: url.into(),
            width,
        }
    }

    /// `srcset` candidate (`url` or `url 768w`).
    pub fn candidate(&self) -> String {
        match self.width {
            Some(w) => format!("{} {}w", self.url, w),
            None => self.url.clone(),
        }
    }

    fn fallback_key(&self) -> (u8, Reverse<u32>) {
        let rank = ImageFormat::from_media_type(&self.media_type)
            .map(ImageFormat::support_rank)
            .unwrap_or(u8::MAX);
        // No width means the full-size original
        (rank, Reverse(self.width.unwrap_or(u32::MAX)))
    }
}

/// `<source>` element data: every candidate of one media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSet {
    pub media_type: String,
    pub srcset: String,
}

/// One logical image (e.g. `portada`) of a slug, in all its encodings.
///
/// Built once by the manifest step and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVariant {
    /// Normalized slug.
    pub slug: String,
    /// Variant name (file stem).
    pub variant: String,
    /// Sources in discovery order.
    pub sources: Vec<ImageSource>,
    /// URL for the plain `<img src>`.
    pub fallback: String,
    /// `<source>` sets, derived from `sources`.
    #[serde(default)]
    pub srcsets: Vec<SourceSet>,
}

impl ImageVariant {
    /// Create a variant from its first source.
    pub fn new(slug: impl Into<String>, variant: impl Into<String>, source: ImageSource) -> Self {
        let fallback = source.url.clone();
        let sources = vec![source];
        Self {
            slug: slug.into(),
            variant: variant.into(),
            srcsets: group_by_type(&sources),
            sources,
            fallback,
        }
    }

    /// Add another encoding/width and re-pick the fallback.
    ///
    /// The fallback is the most widely supported encoding; ties go to the
    /// widest candidate, then to the earliest discovered.
    pub fn push_source(&mut self, source: ImageSource) {
        self.sources.push(source);
        if let Some(best) = self.sources.iter().min_by_key(|s| s.fallback_key()) {
            self.fallback = best.url.clone();
        }
        self.regroup();
    }

    /// Rebuild `srcsets` from `sources`.
    pub(super) fn regroup(&mut self) {
        self.srcsets = group_by_type(&self.sources);
    }
}

/// Group candidates by media type, in first-appearance order.
fn group_by_type(sources: &[ImageSource]) -> Vec<SourceSet> {
    let mut sets: Vec<(String, Vec<String>)> = Vec::new();
    for source in sources {
        match sets.iter_mut().find(|(mt, _)| *mt == source.media_type) {
            Some((_, candidates)) => candidates.push(source.candidate()),
            None => sets.push((source.media_type.clone(), vec![source.candidate()])),
        }
    }
    sets.into_iter()
        .map(|(media_type, candidates)| SourceSet {
            media_type,
            srcset: candidates.join(", "),
        })
        .collect()
}
