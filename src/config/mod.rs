//! Site configuration management for `estudio.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                         |
//! |--------------|-------------------------------------------------|
//! | `[content]`  | JSON data directory and collection file names   |
//! | `[assets]`   | Image tree layout, URL prefix, manifest path    |
//! | `[contact]`  | Messaging hand-off (phone, base URL)            |
//!
//! Every section has defaults, so an empty file (or no file at all) is a
//! valid configuration for the standard site layout.

mod assets;
mod contact;
mod content;
mod error;
mod util;

pub use assets::AssetsConfig;
pub use contact::ContactConfig;
pub use content::ContentConfig;
pub use error::ConfigError;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{debug, warn};
use util::{find_config_file, resolve_against};

/// Root configuration structure representing estudio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute path to the config file, empty when running on defaults.
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file.
    #[serde(skip)]
    pub root: PathBuf,

    pub content: ContentConfig,
    pub assets: AssetsConfig,
    pub contact: ContactConfig,
}

impl SiteConfig {
    /// Search upward from `cwd` for `config_name` and load it.
    ///
    /// Without a config file the defaults apply, rooted at `cwd`.
    pub fn load(cwd: &Path, config_name: &Path) -> Result<Self, ConfigError> {
        let (mut config, root) = match find_config_file(cwd, config_name) {
            Some(path) => {
                let root = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| cwd.to_path_buf());
                let mut config = Self::from_path(&path)?;
                config.config_path = path;
                (config, root)
            }
            None => {
                debug!("config"; "`{}` not found, using defaults", config_name.display());
                (Self::default(), cwd.to_path_buf())
            }
        };

        config.finalize(&root);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        for field in &ignored {
            warn!("config"; "unknown field `{}` ignored", field);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Resolve relative paths against the project root.
    fn finalize(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        self.content.dir = resolve_against(root, &self.content.dir);
        self.assets.dir = resolve_against(root, &self.assets.dir);
        self.assets.manifest = resolve_against(root, &self.assets.manifest);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.assets.validate()?;
        self.contact.validate()
    }

    #[inline]
    pub fn get_root(&self) -> &Path {
        &self.root
    }
}

/// Parse config, failing on unknown fields (catches typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}
