//! Loading shared by the commands that read the site.

use anyhow::{Context, Result};

use crate::asset::{AssetManifest, scan_manifest};
use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::debug;

/// Load every content collection.
pub fn load_content(config: &SiteConfig) -> Result<ContentStore> {
    ContentStore::load(&config.content)
        .with_context(|| format!("failed to load content from `{}`", config.content.dir.display()))
}

/// Read the manifest, or scan the asset tree when none was built yet.
pub fn load_manifest(config: &SiteConfig) -> Result<AssetManifest> {
    let path = &config.assets.manifest;
    if !path.exists() {
        debug!("manifest"; "`{}` not found, scanning `{}`", path.display(), config.assets.dir.display());
        return Ok(scan_manifest(&config.assets));
    }
    AssetManifest::load(path).with_context(|| format!("failed to read manifest `{}`", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(root: &std::path::Path) -> SiteConfig {
        SiteConfig::load(root, std::path::Path::new("estudio.toml")).unwrap()
    }

    #[test]
    fn test_manifest_falls_back_to_scan() {
        let dir = TempDir::new().unwrap();
        let slug_dir = dir.path().join("src/assets/proyectos/cocina");
        fs::create_dir_all(&slug_dir).unwrap();
        fs::write(slug_dir.join("portada.jpg"), b"").unwrap();

        let manifest = load_manifest(&config_in(dir.path())).unwrap();
        assert!(manifest.projects.lookup("cocina", "portada").is_some());
    }

    #[test]
    fn test_broken_manifest_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/data")).unwrap();
        fs::write(dir.path().join("src/data/assets.json"), "{").unwrap();

        let err = load_manifest(&config_in(dir.path())).unwrap_err();
        assert!(err.to_string().contains("assets.json"));
    }
}
