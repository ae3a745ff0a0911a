//! Asset directory scanning (reads the filesystem, writes nothing).
//!
//! ```text
//! assets/
//! ├── proyectos/                  -> collection (projects)
//! │   └── cocina-blanco-norte/    -> slug
//! │       ├── portada.avif        -> variant "portada"
//! │       ├── portada.jpg         -> same variant, another source
//! │       └── antes@768w.webp     -> variant "antes", 768w candidate
//! └── posts/
//!     └── luz-natural/
//!         └── cover.jpg
//! ```

use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use super::{AssetIndex, AssetManifest, Collision, IndexBuilder};
use crate::config::AssetsConfig;
use crate::core::slug::encode_component;
use crate::debug;

const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Scan both collections into a manifest.
pub fn scan_manifest(config: &AssetsConfig) -> AssetManifest {
    let (projects, mut collisions) = scan_collection(&config.dir, &config.projects, &config.url_prefix);
    let (posts, post_collisions) = scan_collection(&config.dir, &config.posts, &config.url_prefix);
    collisions.extend(post_collisions);

    AssetManifest {
        projects,
        posts,
        collisions,
    }
}

/// Scan `<assets_dir>/<collection>/<slug>/<file>`.
///
/// Files are visited in sorted path order, which makes source order and
/// collision winners reproducible. A missing collection directory yields an
/// empty index.
pub fn scan_collection(
    assets_dir: &Path,
    collection: &str,
    url_prefix: &str,
) -> (AssetIndex, Vec<Collision>) {
    let root = assets_dir.join(collection);
    let mut builder = IndexBuilder::new(collection);

    for path in collect_files(&root) {
        let Some((slug_dir, file_name)) = slug_and_file(&root, &path) else {
            debug!("assets"; "skipping `{}` (not <slug>/<file>)", path.display());
            continue;
        };

        let url = asset_url(url_prefix, &[collection, slug_dir, file_name]);
        if !builder.add(slug_dir, file_name, url) {
            debug!("assets"; "skipping `{}` (not an image)", path.display());
        }
    }

    builder.finish()
}

/// All regular files below `dir`, sorted.
fn collect_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(|e| e.path())
        .collect();
    files.sort();
    files
}

/// Split `root/<slug>/<file>` into its two components.
fn slug_and_file<'a>(root: &Path, path: &'a Path) -> Option<(&'a str, &'a str)> {
    let rel = path.strip_prefix(root).ok()?;
    let mut parts = rel.iter();
    let slug = parts.next()?.to_str()?;
    let file = parts.next()?.to_str()?;
    parts.next().is_none().then_some((slug, file))
}

/// Public URL with every segment percent-encoded.
fn asset_url(prefix: &str, segments: &[&str]) -> String {
    let mut url = prefix.trim_end_matches('/').to_string();
    for segment in segments {
        url.push('/');
        url.push_str(&encode_component(segment));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"img").unwrap();
    }

    fn config(dir: &Path) -> AssetsConfig {
        AssetsConfig {
            dir: dir.to_path_buf(),
            ..AssetsConfig::default()
        }
    }

    #[test]
    fn test_scan_missing_dir() {
        let dir = TempDir::new().unwrap();
        let manifest = scan_manifest(&config(&dir.path().join("nope")));
        assert!(manifest.projects.is_empty());
        assert!(manifest.posts.is_empty());
    }

    #[test]
    fn test_scan_collections() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "proyectos/cocina-blanco-norte/portada.avif");
        touch(root, "proyectos/cocina-blanco-norte/portada.jpg");
        touch(root, "proyectos/cocina-blanco-norte/antes.jpg");
        touch(root, "proyectos/cocina-blanco-norte/.DS_Store");
        touch(root, "proyectos/cocina-blanco-norte/notas.txt");
        touch(root, "proyectos/stray.jpg");
        touch(root, "proyectos/a/deep/nested.jpg");
        touch(root, "posts/luz-natural/cover.webp");

        let manifest = scan_manifest(&config(root));

        assert_eq!(manifest.projects.len(), 2);
        let portada = manifest.projects.lookup("cocina-blanco-norte", "portada").unwrap();
        assert_eq!(
            portada.sources.iter().map(|s| s.url.as_str()).collect::<Vec<_>>(),
            [
                "/assets/proyectos/cocina-blanco-norte/portada.avif",
                "/assets/proyectos/cocina-blanco-norte/portada.jpg",
            ]
        );
        assert_eq!(portada.fallback, "/assets/proyectos/cocina-blanco-norte/portada.jpg");
        assert!(manifest.projects.lookup("a", "nested").is_none());

        let cover = manifest.posts.lookup("luz-natural", "cover").unwrap();
        assert_eq!(cover.sources[0].media_type, "image/webp");
        assert!(manifest.collisions.is_empty());
    }

    #[test]
    fn test_scan_encodes_urls_and_reports_collisions() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "proyectos/Baño/portada.jpg");
        touch(root, "proyectos/bano/portada.jpg");

        let manifest = scan_manifest(&config(root));

        // "Baño" sorts before "bano"; the later folder wins
        let portada = manifest.projects.lookup("baño", "portada").unwrap();
        assert_eq!(portada.fallback, "/assets/proyectos/bano/portada.jpg");
        assert_eq!(manifest.collisions.len(), 1);
        assert_eq!(manifest.collisions[0].shadowed, "Baño");
    }

    #[test]
    fn test_asset_url() {
        assert_eq!(
            asset_url("/assets/", &["proyectos", "baño gris", "portada.jpg"]),
            "/assets/proyectos/ba%C3%B1o%20gris/portada.jpg"
        );
        assert_eq!(asset_url("", &["posts", "x", "cover.jpg"]), "/posts/x/cover.jpg");
    }
}
