//! Responsive image index.
//!
//! - `scan` walks the asset tree (build step)
//! - `index` holds the slug/variant mapping and its JSON manifest
//! - `variant` describes one logical image and its sources

mod format;
mod index;
mod scan;
mod variant;

// Types
pub use format::ImageFormat;
pub use index::{AssetError, AssetIndex, AssetManifest, Collision, IndexBuilder};
pub use variant::{ImageSource, ImageVariant, SourceSet};

// Scanning (pure functions)
pub use scan::scan_manifest;
