//! Error types for the bundle crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a bundle.
#[derive(Debug, Error)]
pub enum BundleError {
    /// Directory traversal failed.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// A matching source file could not be read as UTF-8 text.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing a source file's section into the bundle failed.
    #[error("Failed to write {} into bundle: {source}", path.display())]
    Write {
        /// Source file whose section was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The bundle file could not be created or flushed.
    #[error("Failed to write bundle {}: {source}", path.display())]
    Output {
        /// Output file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
