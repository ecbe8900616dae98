//! Error types for the inventory crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when analyzing a tile inventory.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The manifest file does not exist.
    #[error("{} not found", path.display())]
    ManifestNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The manifest exists but is not valid JSON of the expected shape.
    #[error("Invalid JSON format in {}: {source}", path.display())]
    ManifestUnreadable {
        /// Path of the manifest.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A tile key does not have the `<x>-<y>` form.
    #[error("Invalid tile key format: {key}")]
    InvalidTileKey {
        /// The offending key, verbatim.
        key: String,
    },

    /// Region bounds that can never match a tile.
    #[error("Invalid region: min_x {min_x} is greater than max_x {max_x}")]
    InvalidRegion {
        /// Inclusive lower x bound.
        min_x: i64,
        /// Inclusive upper x bound.
        max_x: i64,
    },
}

impl InventoryError {
    /// Whether this error ends an analysis run before any report is produced.
    pub fn is_manifest_failure(&self) -> bool {
        matches!(
            self,
            InventoryError::ManifestNotFound { .. }
                | InventoryError::ManifestUnreadable { .. }
                | InventoryError::Io(_)
        )
    }
}
