//! Analysis results and their console rendering.

use crate::RegionFilter;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Bytes per mebibyte, used for the human-readable size.
const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Outcome of one analysis pass over a manifest.
///
/// `empty_tiles + non_empty_tiles` always equals [`TileReport::total_analyzed`],
/// and both count only tiles that parsed and fell inside `region`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TileReport {
    /// Region the tiles were selected with.
    pub region: RegionFilter,
    /// Number of valid tile keys inside the region.
    pub tiles_in_range: usize,
    /// In-range tiles listed as empty.
    pub empty_tiles: usize,
    /// In-range tiles not listed as empty.
    pub non_empty_tiles: usize,
    /// Sum of the sizes of the non-empty tile images that were found.
    pub total_size_bytes: u64,
    /// Non-empty tiles whose image does not exist.
    pub missing_files: usize,
    /// Non-empty tiles whose image exists but could not be stat-ed.
    pub stat_failures: usize,
    /// Manifest keys that are not of the form `<x>-<y>`, sorted.
    pub invalid_keys: Vec<String>,
    /// Expected image paths that were missing, in processing order.
    pub missing_paths: Vec<PathBuf>,
}

impl TileReport {
    /// Create an empty report for a region.
    pub fn new(region: RegionFilter) -> Self {
        Self {
            region,
            ..Default::default()
        }
    }

    /// Total number of classified tiles.
    pub fn total_analyzed(&self) -> usize {
        self.empty_tiles + self.non_empty_tiles
    }

    /// Total size in mebibytes.
    pub fn total_size_mib(&self) -> f64 {
        self.total_size_bytes as f64 / BYTES_PER_MIB
    }

    /// Number of non-empty tiles whose image was not missing.
    pub fn found_files(&self) -> usize {
        self.non_empty_tiles.saturating_sub(self.missing_files)
    }

    /// Average image size over the non-empty tiles that were found, or 0 when
    /// there are none.
    pub fn average_size(&self) -> f64 {
        match self.found_files() {
            0 => 0.0,
            found => self.total_size_bytes as f64 / found as f64,
        }
    }
}

impl fmt::Display for TileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Found {} tiles in range {}", self.tiles_in_range, self.region)?;

        writeln!(f)?;
        writeln!(f, "Tile Analysis Results:")?;
        writeln!(f, "Empty tiles: {}", self.empty_tiles)?;
        writeln!(f, "Non-empty tiles: {}", self.non_empty_tiles)?;
        writeln!(f, "Total tiles analyzed: {}", self.total_analyzed())?;

        writeln!(f)?;
        writeln!(f, "File Analysis Results:")?;
        writeln!(
            f,
            "Total file size: {} bytes ({:.2} MB)",
            group_thousands(self.total_size_bytes),
            self.total_size_mib()
        )?;
        writeln!(f, "Missing files: {}", self.missing_files)?;

        if self.tiles_in_range > 0 {
            writeln!(f, "Average file size: {:.2} bytes", self.average_size())?;
        }

        Ok(())
    }
}

/// Format an integer with `,` between groups of three digits.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
