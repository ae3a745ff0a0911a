//! `[assets]` section: image tree layout and manifest location.
//!
//! ```toml
//! [assets]
//! dir = "src/assets"
//! projects = "proyectos"   # <dir>/proyectos/<slug>/<variant>.<ext>
//! posts = "posts"
//! url_prefix = "/assets"
//! manifest = "src/data/assets.json"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Asset root (relative to the config file).
    pub dir: PathBuf,
    /// Collection folder holding project images.
    pub projects: String,
    /// Collection folder holding post images.
    pub posts: String,
    /// URL the asset root is served under.
    pub url_prefix: String,
    /// Where `estudio manifest` writes and the runtime reads.
    pub manifest: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: "src/assets".into(),
            projects: "proyectos".into(),
            posts: "posts".into(),
            url_prefix: "/assets".into(),
            manifest: "src/data/assets.json".into(),
        }
    }
}

impl AssetsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, name) in [("assets.projects", &self.projects), ("assets.posts", &self.posts)] {
            if name.is_empty() || name.contains(['/', '\\']) {
                return Err(ConfigError::validation(
                    field,
                    format!("`{name}` must be a single folder name"),
                ));
            }
        }
        if self.projects == self.posts {
            return Err(ConfigError::validation(
                "assets.posts",
                "projects and posts must use different folders",
            ));
        }
        if !self.url_prefix.is_empty() && !self.url_prefix.starts_with('/') {
            return Err(ConfigError::validation(
                "assets.url_prefix",
                "must be empty or start with `/`",
            ));
        }
        Ok(())
    }
}
