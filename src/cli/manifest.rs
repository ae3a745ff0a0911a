//! `estudio manifest`: scan the asset tree into the image manifest.

use std::path::Path;

use anyhow::{Context, Result};

use crate::asset::scan_manifest;
use crate::config::SiteConfig;
use crate::utils::plural_count;
use crate::{log, warn};

pub fn write_manifest(config: &SiteConfig, output: Option<&Path>) -> Result<()> {
    let manifest = scan_manifest(&config.assets);

    for c in &manifest.collisions {
        warn!(
            "manifest";
            "`{}/{}` shadows `{}/{}` for variant `{}` (both are `{}`)",
            c.collection, c.kept, c.collection, c.shadowed, c.variant, c.slug
        );
    }

    let path = output.unwrap_or(config.assets.manifest.as_path());
    manifest
        .write(path)
        .with_context(|| format!("failed to write manifest `{}`", path.display()))?;

    log!(
        "manifest";
        "{} ({}) and {} ({}) -> {}",
        plural_count(manifest.projects.slugs().count(), "project"),
        plural_count(manifest.projects.len(), "image"),
        plural_count(manifest.posts.slugs().count(), "post"),
        plural_count(manifest.posts.len(), "image"),
        path.display()
    );
    Ok(())
}
