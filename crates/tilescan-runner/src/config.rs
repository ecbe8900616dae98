//! YAML configuration file support.
//!
//! Every field is optional; anything left out keeps its built-in default and
//! command-line flags are applied on top afterwards.
//!
//! ```yaml
//! manifest: downloaded_tiles.json
//! tiles_dir: tiles
//! region:
//!   min_x: 598
//!   max_x: 606
//!   max_y: 1450
//! bundle:
//!   root: .
//!   output: project_bundle.txt
//!   extensions: [".html", ".js"]
//! ```

use crate::RunnerError;
use serde::Deserialize;
use std::path::Path;
use tilescan_bundle::BundleConfig;
use tilescan_inventory::InventoryConfig;

/// Contents of a `tilescan` config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileConfig {
    /// Analyzer settings, at the top level of the file.
    #[serde(flatten)]
    pub inventory: InventoryConfig,
    /// Bundler settings, under `bundle:`.
    #[serde(default)]
    pub bundle: BundleConfig,
}

impl FileConfig {
    /// Parse a config from YAML text. An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, RunnerError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| RunnerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml).map_err(|source| RunnerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, RunnerError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
