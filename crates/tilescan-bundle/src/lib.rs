//! # tilescan-bundle
//!
//! Concatenate the source files of a project into one text file, for pasting
//! a whole project somewhere at once.
//!
//! Files are selected by extension or exact file name while walking the
//! project tree; build output directories are pruned. Each file appears in the
//! bundle as:
//!
//! ```text
//! --- ./path/to/file.js ---
//! <file contents>
//!
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use tilescan_bundle::{bundle, BundleConfig};
//!
//! let summary = bundle(&BundleConfig::default())?;
//! println!("Bundled {} files into {}", summary.files, summary.output.display());
//! # Ok::<(), tilescan_bundle::BundleError>(())
//! ```

mod error;

pub use error::BundleError;

use serde::Deserialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Result type for bundle operations.
pub type Result<T> = std::result::Result<T, BundleError>;

/// Default bundle file name.
pub const DEFAULT_OUTPUT_FILE: &str = "project_bundle.txt";

/// Extensions bundled by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".html", ".js"];

/// Exact file names bundled by default.
pub const DEFAULT_FILE_NAMES: &[&str] = &["CMakeLists.txt"];

/// Directory names pruned by default (compared case-insensitively).
pub const DEFAULT_SKIP_DIRS: &[&str] = &["build", "out", "dist", "node_modules"];

/// Which files to bundle and where to write them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Directory to walk.
    pub root: PathBuf,
    /// Bundle file to write.
    pub output: PathBuf,
    /// File name suffixes to include, e.g. `.js`.
    pub extensions: Vec<String>,
    /// Exact file names to include, e.g. `CMakeLists.txt`.
    pub file_names: Vec<String>,
    /// Directory names to skip at any depth.
    pub skip_dirs: Vec<String>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            file_names: DEFAULT_FILE_NAMES.iter().map(|s| s.to_string()).collect(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl BundleConfig {
    /// Check if a file name should be bundled.
    pub fn matches(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
            || self.file_names.iter().any(|name| name == file_name)
    }

    /// Check if a directory name should be pruned.
    pub fn skips_dir(&self, dir_name: &str) -> bool {
        let lower = dir_name.to_lowercase();
        self.skip_dirs.iter().any(|d| d.to_lowercase() == lower)
    }

    fn keep_entry(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        entry
            .file_name()
            .to_str()
            .map_or(true, |name| !self.skips_dir(name))
    }
}

/// Summary of a written bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSummary {
    /// Number of files bundled.
    pub files: usize,
    /// Bytes written to the bundle.
    pub bytes: u64,
    /// Path of the bundle.
    pub output: PathBuf,
}

/// Walk `config.root` and return the files to bundle, in file-name order per
/// directory.
///
/// The output file is never returned, even when it matches.
pub fn collect_files(config: &BundleConfig) -> Result<Vec<PathBuf>> {
    let output = fs::canonicalize(&config.output).ok();
    let mut files = Vec::new();

    let walker = WalkDir::new(&config.root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| config.keep_entry(e));

    for entry in walker {
        let entry = entry?;
        // Follows symlinks, so a linked source file is bundled. Linked
        // directories are not descended into.
        if !entry.path().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !config.matches(name) {
            continue;
        }
        if output.is_some() && fs::canonicalize(entry.path()).ok() == output {
            debug!("Skipping bundle output {}", entry.path().display());
            continue;
        }
        files.push(entry.into_path());
    }

    Ok(files)
}

/// Write each file as a `--- path ---` section followed by its contents.
///
/// Returns the number of bytes written.
pub fn write_bundle<W: Write>(files: &[PathBuf], writer: &mut W) -> Result<u64> {
    let mut written = 0u64;

    for path in files {
        let contents = fs::read_to_string(path).map_err(|source| BundleError::Read {
            path: path.clone(),
            source,
        })?;
        let header = format!("--- {} ---\n", path.display());

        write_section(writer, &header, &contents).map_err(|source| BundleError::Write {
            path: path.clone(),
            source,
        })?;
        written += (header.len() + contents.len() + 2) as u64;
    }

    Ok(written)
}

fn write_section<W: Write>(writer: &mut W, header: &str, contents: &str) -> std::io::Result<()> {
    writer.write_all(header.as_bytes())?;
    writer.write_all(contents.as_bytes())?;
    writer.write_all(b"\n\n")
}

/// Collect matching files under `config.root` and write them to
/// `config.output`.
pub fn bundle(config: &BundleConfig) -> Result<BundleSummary> {
    let files = collect_files(config)?;
    debug!("Bundling {} files from {}", files.len(), config.root.display());

    let output_err = |source| BundleError::Output {
        path: config.output.clone(),
        source,
    };
    let file = fs::File::create(&config.output).map_err(output_err)?;
    let mut writer = BufWriter::new(file);
    let bytes = write_bundle(&files, &mut writer)?;
    writer.flush().map_err(output_err)?;

    Ok(BundleSummary {
        files: files.len(),
        bytes,
        output: config.output.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matching() {
        let config = BundleConfig::default();
        assert!(config.matches("index.html"));
        assert!(config.matches("app.js"));
        assert!(config.matches("CMakeLists.txt"));
        assert!(!config.matches("app.json"));
        assert!(!config.matches("cmakelists.txt"));
        assert!(!config.matches("main.rs"));
    }

    #[test]
    fn test_skip_dirs_case_insensitive() {
        let config = BundleConfig::default();
        assert!(config.skips_dir("build"));
        assert!(config.skips_dir("Build"));
        assert!(config.skips_dir("NODE_MODULES"));
        assert!(!config.skips_dir("src"));
    }

    #[test]
    fn test_write_bundle_format() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.js");
        let b = dir.path().join("b.html");
        fs::write(&a, "let a = 1;").unwrap();
        fs::write(&b, "<p>b</p>").unwrap();

        let mut out = Vec::new();
        let bytes = write_bundle(&[a.clone(), b.clone()], &mut out).unwrap();

        let expected = format!(
            "--- {} ---\nlet a = 1;\n\n--- {} ---\n<p>b</p>\n\n",
            a.display(),
            b.display()
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert_eq!(bytes, expected.len() as u64);
    }

    #[test]
    fn test_write_bundle_rejects_binary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.js");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = write_bundle(&[path.clone()], &mut Vec::new()).unwrap_err();
        match err {
            BundleError::Read { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected Read error, got {:?}", other),
        }
    }
}
