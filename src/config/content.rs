//! `[content]` section: where the JSON data collections live.
//!
//! ```toml
//! [content]
//! dir = "src/data"
//! projects = "projects.json"
//! posts = "posts.json"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Data directory (relative to the config file).
    pub dir: PathBuf,
    /// File names inside `dir`.
    pub projects: PathBuf,
    pub posts: PathBuf,
    pub testimonials: PathBuf,
    pub services: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: "src/data".into(),
            projects: "projects.json".into(),
            posts: "posts.json".into(),
            testimonials: "testimonials.json".into(),
            services: "services.json".into(),
        }
    }
}

impl ContentConfig {
    pub fn projects_path(&self) -> PathBuf {
        self.dir.join(&self.projects)
    }

    pub fn posts_path(&self) -> PathBuf {
        self.dir.join(&self.posts)
    }

    pub fn testimonials_path(&self) -> PathBuf {
        self.dir.join(&self.testimonials)
    }

    pub fn services_path(&self) -> PathBuf {
        self.dir.join(&self.services)
    }
}
