//! Slug-keyed image index and the manifest that carries it.
//!
//! ```text
//! assets/proyectos/Baño-Gris/portada.avif ┐
//! assets/proyectos/Baño-Gris/portada.jpg  ┴─> projects["bano-gris"]["portada"]
//! ```
//!
//! The index is plain data: the manifest step fills it from a directory scan
//! and the runtime only reads it.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ImageFormat, ImageSource, ImageVariant};
use crate::core::DetailKind;
use crate::core::slug::normalize;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid asset manifest `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),
}

// ============================================================================
// AssetIndex
// ============================================================================

/// Normalized slug → variant name → image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetIndex {
    entries: BTreeMap<String, BTreeMap<String, ImageVariant>>,
}

impl AssetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find an image by slug (any encoding/case/accents) and variant name.
    ///
    /// A miss is a normal outcome: callers render a placeholder.
    pub fn lookup(&self, slug: &str, variant: &str) -> Option<&ImageVariant> {
        self.entries.get(&normalize(slug))?.get(variant)
    }

    /// Insert under the variant's normalized slug, returning what it replaced.
    pub fn insert(&mut self, mut image: ImageVariant) -> Option<ImageVariant> {
        image.slug = normalize(&image.slug);
        self.entries
            .entry(image.slug.clone())
            .or_default()
            .insert(image.variant.clone(), image)
    }

    /// Normalized slugs with at least one image.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of variants across all slugs.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-key after deserializing, in case the file was edited by hand.
    fn rekeyed(self) -> Self {
        let mut index = Self::new();
        for mut image in self.entries.into_values().flat_map(BTreeMap::into_values) {
            image.regroup();
            index.insert(image);
        }
        index
    }
}

// ============================================================================
// IndexBuilder
// ============================================================================

/// Two slug folders that normalize alike provided the same variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    pub collection: String,
    /// Normalized slug both folders map to.
    pub slug: String,
    pub variant: String,
    /// Folder whose files are indexed (discovered last).
    pub kept: String,
    /// Folder whose files were dropped.
    pub shadowed: String,
}

/// Accumulates discovered files of one collection into an [`AssetIndex`].
///
/// Files are expected in discovery order. Files of the same folder and stem
/// are coalesced into one variant. When another folder normalizes to the same
/// slug and provides the same variant, the later folder wins and a
/// [`Collision`] is recorded.
#[derive(Debug)]
pub struct IndexBuilder {
    collection: String,
    index: AssetIndex,
    /// (normalized slug, variant) → folder name the entry came from.
    origins: FxHashMap<(String, String), String>,
    collisions: Vec<Collision>,
}

impl IndexBuilder {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            index: AssetIndex::new(),
            origins: FxHashMap::default(),
            collisions: Vec::new(),
        }
    }

    /// Add `<slug_dir>/<file_name>` served at `url`.
    ///
    /// Returns `false` (and ignores the file) when it is not a recognized image.
    pub fn add(&mut self, slug_dir: &str, file_name: &str, url: impl Into<String>) -> bool {
        let Some(stem) = parse_file_name(file_name) else {
            return false;
        };

        let slug = normalize(slug_dir);
        let source = ImageSource::new(stem.format, url, stem.width);
        let key = (slug.clone(), stem.variant.to_string());

        match self.origins.get(&key) {
            Some(origin) if origin == slug_dir => {
                if let Some(image) = self
                    .index
                    .entries
                    .get_mut(&slug)
                    .and_then(|m| m.get_mut(stem.variant))
                {
                    image.push_source(source);
                }
            }
            Some(origin) => {
                self.collisions.push(Collision {
                    collection: self.collection.clone(),
                    slug: slug.clone(),
                    variant: stem.variant.to_string(),
                    kept: slug_dir.to_string(),
                    shadowed: origin.clone(),
                });
                self.index
                    .insert(ImageVariant::new(slug, stem.variant, source));
                self.origins.insert(key, slug_dir.to_string());
            }
            None => {
                self.index
                    .insert(ImageVariant::new(slug, stem.variant, source));
                self.origins.insert(key, slug_dir.to_string());
            }
        }
        true
    }

    pub fn finish(self) -> (AssetIndex, Vec<Collision>) {
        (self.index, self.collisions)
    }
}

/// Parsed image file name: `<variant>[@<width>w][.<anything>].<ext>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStem<'a> {
    variant: &'a str,
    width: Option<u32>,
    format: ImageFormat,
}

/// The variant is everything before the first `.`; the format comes from the
/// last extension.
fn parse_file_name(name: &str) -> Option<FileStem<'_>> {
    let (_, ext) = name.rsplit_once('.')?;
    let format = ImageFormat::from_extension(ext)?;
    let (stem, _) = name.split_once('.')?;

    let (variant, width) = match stem.rsplit_once('@') {
        Some((base, suffix)) => match suffix.strip_suffix('w').and_then(|n| n.parse().ok()) {
            Some(w) => (base, Some(w)),
            None => (stem, None),
        },
        None => (stem, None),
    };

    (!variant.is_empty()).then_some(FileStem {
        variant,
        width,
        format,
    })
}

// ============================================================================
// AssetManifest
// ============================================================================

/// Build output consumed by the runtime: one index per content collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub projects: AssetIndex,
    #[serde(default)]
    pub posts: AssetIndex,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collisions: Vec<Collision>,
}

impl AssetManifest {
    /// Index serving a detail kind.
    pub fn index(&self, kind: DetailKind) -> &AssetIndex {
        match kind {
            DetailKind::Project => &self.projects,
            DetailKind::Post => &self.posts,
        }
    }

    pub fn from_json(path: &Path, json: &str) -> Result<Self, AssetError> {
        let manifest: Self =
            serde_json::from_str(json).map_err(|e| AssetError::Json(path.to_path_buf(), e))?;
        Ok(Self {
            projects: manifest.projects.rekeyed(),
            posts: manifest.posts.rekeyed(),
            collisions: manifest.collisions,
        })
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let json =
            fs::read_to_string(path).map_err(|e| AssetError::Io(path.to_path_buf(), e))?;
        Self::from_json(path, &json)
    }

    pub fn write(&self, path: &Path) -> Result<(), AssetError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AssetError::Json(path.to_path_buf(), e))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AssetError::Io(parent.to_path_buf(), e))?;
        }
        fs::write(path, json + "\n").map_err(|e| AssetError::Io(path.to_path_buf(), e))
    }
}
