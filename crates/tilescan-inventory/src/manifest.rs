//! Download manifest loading.
//!
//! The manifest is a JSON object written by the tile downloader:
//!
//! ```json
//! {
//!   "downloaded": ["600-1400", "601-1400"],
//!   "empty": ["601-1400"]
//! }
//! ```
//!
//! Both fields are optional and default to empty. Duplicate keys collapse.
//! `empty` is expected to be a subset of `downloaded`, but this is not
//! enforced; see [`Manifest::empty_not_downloaded`].

use crate::{InventoryError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

/// Default manifest file name.
pub const DEFAULT_MANIFEST_FILE: &str = "downloaded_tiles.json";

/// Set of downloaded tile keys and the subset known to be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    /// Keys of every tile that has been fetched.
    #[serde(default)]
    pub downloaded: HashSet<String>,
    /// Keys of fetched tiles that contain no data.
    #[serde(default)]
    pub empty: HashSet<String>,
}

impl Manifest {
    /// Load a manifest from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => InventoryError::ManifestNotFound {
                path: path.to_path_buf(),
            },
            _ => InventoryError::Io(e),
        })?;

        serde_json::from_str(&content).map_err(|source| InventoryError::ManifestUnreadable {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check if a key is recorded as empty.
    pub fn is_empty_tile(&self, key: &str) -> bool {
        self.empty.contains(key)
    }

    /// Keys listed as empty that were never listed as downloaded.
    pub fn empty_not_downloaded(&self) -> impl Iterator<Item = &str> {
        self.empty
            .iter()
            .filter(|key| !self.downloaded.contains(*key))
            .map(String::as_str)
    }
}

impl std::str::FromStr for Manifest {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_deduplicates() {
        let manifest: Manifest =
            r#"{"downloaded": ["600-100", "600-100", "601-100"], "empty": ["600-100"]}"#
                .parse()
                .unwrap();
        assert_eq!(manifest.downloaded.len(), 2);
        assert_eq!(manifest.empty.len(), 1);
        assert!(manifest.is_empty_tile("600-100"));
        assert!(!manifest.is_empty_tile("601-100"));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let manifest: Manifest = "{}".parse().unwrap();
        assert!(manifest.downloaded.is_empty());
        assert!(manifest.empty.is_empty());

        let manifest: Manifest = r#"{"downloaded": ["1-2"], "other": 5}"#.parse().unwrap();
        assert_eq!(manifest.downloaded.len(), 1);
        assert!(manifest.empty.is_empty());
    }

    #[test]
    fn test_wrong_field_type_is_error() {
        assert!(r#"{"downloaded": [1, 2]}"#.parse::<Manifest>().is_err());
        assert!(r#"["600-100"]"#.parse::<Manifest>().is_err());
    }

    #[test]
    fn test_empty_not_downloaded() {
        let manifest: Manifest = r#"{"downloaded": ["1-1"], "empty": ["1-1", "2-2"]}"#
            .parse()
            .unwrap();
        let stray: Vec<&str> = manifest.empty_not_downloaded().collect();
        assert_eq!(stray, vec!["2-2"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("downloaded_tiles.json");

        match Manifest::load(&path) {
            Err(InventoryError::ManifestNotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("expected ManifestNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"downloaded\": [").unwrap();

        let err = Manifest::load(file.path()).unwrap_err();
        assert!(matches!(err, InventoryError::ManifestUnreadable { .. }));
        assert!(err.is_manifest_failure());
    }

    #[test]
    fn test_load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"downloaded": ["600-100"], "empty": []}}"#).unwrap();

        let manifest = Manifest::load(file.path()).unwrap();
        assert!(manifest.downloaded.contains("600-100"));
    }
}
