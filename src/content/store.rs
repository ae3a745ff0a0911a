//! Read-only content collections keyed by normalized slug.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::{Post, Project, Service, Testimonial};
use crate::config::ContentConfig;
use crate::core::DetailKind;
use crate::core::slug::normalize;
use crate::debug;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid JSON in `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("`{0}` must contain a JSON array of records")]
    NotAnArray(PathBuf),
}

/// Two records of one collection whose slugs normalize alike.
///
/// Only the first is reachable; the later one is reported by `validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateSlug {
    pub kind: DetailKind,
    pub slug: String,
    /// Positions in the collection, first is the one that resolves.
    pub indices: (usize, usize),
}

/// Pre-loaded site content. Built once, never mutated.
#[derive(Debug, Default)]
pub struct ContentStore {
    projects: Vec<Project>,
    posts: Vec<Post>,
    testimonials: Vec<Testimonial>,
    services: Vec<Service>,
    project_keys: FxHashMap<String, usize>,
    post_keys: FxHashMap<String, usize>,
    duplicates: Vec<DuplicateSlug>,
}

impl ContentStore {
    pub fn new(
        projects: Vec<Project>,
        posts: Vec<Post>,
        testimonials: Vec<Testimonial>,
        services: Vec<Service>,
    ) -> Self {
        let mut duplicates = Vec::new();
        let project_keys = index_slugs(
            DetailKind::Project,
            projects.iter().map(|p| p.slug.as_str()),
            &mut duplicates,
        );
        let post_keys = index_slugs(
            DetailKind::Post,
            posts.iter().map(|p| p.slug.as_str()),
            &mut duplicates,
        );

        Self {
            projects,
            posts,
            testimonials,
            services,
            project_keys,
            post_keys,
            duplicates,
        }
    }

    /// Load every collection named in `[content]`.
    ///
    /// A missing file is an empty collection; a malformed file is an error.
    pub fn load(config: &ContentConfig) -> Result<Self, ContentError> {
        Ok(Self::new(
            load_collection(&config.projects_path())?,
            load_collection(&config.posts_path())?,
            load_collection(&config.testimonials_path())?,
            load_collection(&config.services_path())?,
        ))
    }

    /// Find a project by slug, comparing normalized forms.
    pub fn project(&self, slug: &str) -> Option<&Project> {
        self.project_keys
            .get(&normalize(slug))
            .and_then(|&i| self.projects.get(i))
    }

    /// Find a post by slug, comparing normalized forms.
    pub fn post(&self, slug: &str) -> Option<&Post> {
        self.post_keys
            .get(&normalize(slug))
            .and_then(|&i| self.posts.get(i))
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn duplicates(&self) -> &[DuplicateSlug] {
        &self.duplicates
    }
}

/// Map normalized slug → first position. Empty slugs are not routable.
fn index_slugs<'a>(
    kind: DetailKind,
    slugs: impl Iterator<Item = &'a str>,
    duplicates: &mut Vec<DuplicateSlug>,
) -> FxHashMap<String, usize> {
    let mut keys = FxHashMap::default();
    for (i, slug) in slugs.enumerate() {
        if slug.is_empty() {
            continue;
        }
        let key = normalize(slug);
        match keys.get(&key) {
            Some(&first) => duplicates.push(DuplicateSlug {
                kind,
                slug: key,
                indices: (first, i),
            }),
            None => {
                keys.insert(key, i);
            }
        }
    }
    keys
}

/// Read a JSON array, skipping elements that don't fit the record shape.
fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ContentError> {
    if !path.exists() {
        debug!("content"; "`{}` not found, collection is empty", path.display());
        return Ok(Vec::new());
    }

    let text = fs::read_to_string(path).map_err(|e| ContentError::Io(path.to_path_buf(), e))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| ContentError::Json(path.to_path_buf(), e))?;
    let serde_json::Value::Array(items) = value else {
        return Err(ContentError::NotAnArray(path.to_path_buf()));
    };

    let records = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match T::deserialize(item) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("content"; "skipping record {} of `{}`: {}", i, path.display(), e);
                None
            }
        })
        .collect();
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(slug: &str, title: &str) -> Project {
        Project {
            slug: slug.into(),
            title: title.into(),
            ..Project::default()
        }
    }

    #[test]
    fn test_lookup_is_normalized_on_both_sides() {
        let store = ContentStore::new(
            vec![project("Baño-Terrazo-Gris", "Baño"), project("cocina", "Cocina")],
            vec![],
            vec![],
            vec![],
        );

        for slug in ["bano-terrazo-gris", "ba%C3%B1o-terrazo-gris", "BAÑO-TERRAZO-GRIS"] {
            assert_eq!(store.project(slug).map(|p| p.title.as_str()), Some("Baño"));
        }
        assert!(store.project("does-not-exist").is_none());
        assert!(store.post("cocina").is_none());
    }

    #[test]
    fn test_duplicates_first_wins() {
        let store = ContentStore::new(
            vec![project("café", "first"), project("", "no slug"), project("Cafe", "second")],
            vec![],
            vec![],
            vec![],
        );
        assert_eq!(store.project("cafe").unwrap().title, "first");
        assert_eq!(
            store.duplicates(),
            &[DuplicateSlug {
                kind: DetailKind::Project,
                slug: "cafe".into(),
                indices: (0, 2),
            }]
        );
        // Slug-less records stay listed but are not routable
        assert_eq!(store.projects().len(), 3);
        assert!(store.project("").is_none());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        let data = dir.path();
        fs::write(
            data.join("projects.json"),
            r#"[{"slug":"cocina-blanco-norte","title":"Cocina"}, 42, {"title":"sin slug"}]"#,
        )
        .unwrap();
        fs::write(
            data.join("posts.json"),
            r#"[{"slug":"luz-natural","title":"Luz","gallery":["a","b"]}]"#,
        )
        .unwrap();
        fs::write(data.join("services.json"), r#"[["Asesoría","Online"], "roto"]"#).unwrap();

        let config = ContentConfig {
            dir: data.to_path_buf(),
            ..ContentConfig::default()
        };
        let store = ContentStore::load(&config).unwrap();

        assert_eq!(store.projects().len(), 2);
        assert!(store.project("cocina-blanco-norte").is_some());
        assert_eq!(store.post("luz-natural").unwrap().gallery, ["a", "b"]);
        assert_eq!(store.services().len(), 1);
        // testimonials.json is absent
        assert!(store.testimonials().is_empty());
    }

    #[test]
    fn test_load_rejects_non_array() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("projects.json"), r#"{"slug":"x"}"#).unwrap();
        let config = ContentConfig {
            dir: dir.path().to_path_buf(),
            ..ContentConfig::default()
        };
        assert!(matches!(
            ContentStore::load(&config),
            Err(ContentError::NotAnArray(_))
        ));
    }

    #[test]
    fn test_load_rejects_broken_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("posts.json"), "[{").unwrap();
        let config = ContentConfig {
            dir: dir.path().to_path_buf(),
            ..ContentConfig::default()
        };
        let err = ContentStore::load(&config).unwrap_err();
        assert!(matches!(err, ContentError::Json(..)));
        assert!(err.to_string().contains("posts.json"));
    }
}
