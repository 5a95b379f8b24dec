// SPDX-License-Identifier: MPL-2.0
//! This module handles the backfill layout configuration: where the metadata
//! document lives and which directories are searched for images.
//!
//! # Examples
//!
//! ```no_run
//! use geo_backfill::config::{self, Config};
//! use std::path::Path;
//!
//! // Load `<root>/geo_backfill.toml`, falling back to defaults
//! let config = config::load(Path::new(".")).unwrap_or_default();
//!
//! // Resolve the document path against the repository root
//! let document = config.data_file_in(Path::new("."));
//! assert!(document.ends_with("imagesMeta.json"));
//! ```

pub mod defaults;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::{CONFIG_FILE, DEFAULT_DATA_FILE, DEFAULT_IMAGES_DIR, DEFAULT_PUBLIC_DIR};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            public_dir: default_public_dir(),
            images_dir: default_images_dir(),
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_public_dir() -> PathBuf {
    PathBuf::from(DEFAULT_PUBLIC_DIR)
}

fn default_images_dir() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGES_DIR)
}

impl Config {
    /// Metadata document path under `root`. Absolute entries are kept as is.
    pub fn data_file_in(&self, root: &Path) -> PathBuf {
        root.join(&self.data_file)
    }

    pub fn public_dir_in(&self, root: &Path) -> PathBuf {
        root.join(&self.public_dir)
    }

    pub fn images_dir_in(&self, root: &Path) -> PathBuf {
        root.join(&self.images_dir)
    }
}

/// Loads `<root>/geo_backfill.toml` when present, defaults otherwise.
pub fn load(root: &Path) -> Result<Config> {
    let path = root.join(CONFIG_FILE);
    if path.exists() {
        return load_from_path(&path);
    }
    Ok(Config::default())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
