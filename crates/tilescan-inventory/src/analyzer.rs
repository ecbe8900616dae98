//! Tile selection, classification and size aggregation.

use crate::manifest::DEFAULT_MANIFEST_FILE;
use crate::{Manifest, RegionFilter, Result, TileCoord, TileReport};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default directory holding the sharded tile images.
pub const DEFAULT_TILES_DIR: &str = "tiles";

/// Configuration for an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Path to the download manifest.
    #[serde(alias = "manifest_path")]
    pub manifest: PathBuf,
    /// Root of the sharded tile directory tree.
    pub tiles_dir: PathBuf,
    /// Tiles to analyze.
    pub region: RegionFilter,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST_FILE),
            tiles_dir: PathBuf::from(DEFAULT_TILES_DIR),
            region: RegionFilter::default(),
        }
    }
}

/// A manifest entry that parsed and fell inside the region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedTile {
    /// Parsed coordinates.
    pub coord: TileCoord,
    /// Key as written in the manifest.
    pub key: String,
}

/// Result of parsing and filtering the downloaded keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// In-range tiles in ascending `(x, y)` order.
    pub tiles: Vec<SelectedTile>,
    /// Keys that could not be parsed, sorted.
    pub invalid_keys: Vec<String>,
}

/// What was found on disk for a non-empty tile.
#[derive(Debug)]
pub enum TileFileStatus {
    /// The image exists with this size in bytes.
    Found(u64),
    /// No file at the expected path.
    Missing,
    /// The path could not be stat-ed for another reason.
    Unreadable(std::io::Error),
}

/// Stat a tile image path.
///
/// Errors that mean nothing can exist at the path (no such entry, or a shard
/// component that is a regular file) are `Missing`. Anything else, such as a
/// shard directory without search permission, is `Unreadable`.
pub fn stat_tile_file(path: &Path) -> TileFileStatus {
    match std::fs::metadata(path) {
        Ok(meta) => TileFileStatus::Found(meta.len()),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            TileFileStatus::Missing
        }
        Err(e) => TileFileStatus::Unreadable(e),
    }
}

/// Parse every downloaded key and keep those inside `region`.
///
/// Invalid keys are logged and collected, never fatal.
pub fn select_tiles(manifest: &Manifest, region: &RegionFilter) -> Selection {
    let mut selection = Selection::default();

    for key in &manifest.downloaded {
        match TileCoord::parse_key(key) {
            Ok(coord) if region.contains(coord) => selection.tiles.push(SelectedTile {
                coord,
                key: key.clone(),
            }),
            Ok(_) => {}
            Err(e) => {
                warn!("{}", e);
                selection.invalid_keys.push(key.clone());
            }
        }
    }

    // Two keys can parse to the same coordinate ("7-9" and "07-9"), so break
    // ties on the key to keep the order total.
    selection
        .tiles
        .sort_by(|a, b| a.coord.cmp(&b.coord).then_with(|| a.key.cmp(&b.key)));
    selection.invalid_keys.sort();
    selection
}

/// Classify selected tiles as empty or non-empty and total the image sizes.
pub fn classify(
    selection: Selection,
    manifest: &Manifest,
    tiles_dir: &Path,
    region: RegionFilter,
) -> TileReport {
    let mut report = TileReport::new(region);
    report.tiles_in_range = selection.tiles.len();
    report.invalid_keys = selection.invalid_keys;

    for tile in &selection.tiles {
        if manifest.is_empty_tile(&tile.key) {
            report.empty_tiles += 1;
            continue;
        }
        report.non_empty_tiles += 1;

        let path = tile.coord.shard_path(tiles_dir);
        match stat_tile_file(&path) {
            TileFileStatus::Found(size) => report.total_size_bytes += size,
            TileFileStatus::Missing => {
                warn!("File not found: {}", path.display());
                report.missing_files += 1;
                report.missing_paths.push(path);
            }
            TileFileStatus::Unreadable(e) => {
                warn!("Could not get size of {}: {}", path.display(), e);
                report.stat_failures += 1;
            }
        }
    }

    report
}

/// Analyzer for a tile download directory.
///
/// # Example
///
/// ```no_run
/// use tilescan_inventory::{InventoryConfig, TileAnalyzer};
///
/// let analyzer = TileAnalyzer::new(InventoryConfig::default());
/// let report = analyzer.run()?;
/// print!("{}", report);
/// # Ok::<(), tilescan_inventory::InventoryError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TileAnalyzer {
    config: InventoryConfig,
}

impl TileAnalyzer {
    /// Create an analyzer with the given configuration.
    pub fn new(config: InventoryConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Load the configured manifest and analyze it.
    ///
    /// Fails only if the region is invalid or the manifest cannot be loaded.
    pub fn run(&self) -> Result<TileReport> {
        self.config.region.validate()?;
        let manifest = Manifest::load(&self.config.manifest)?;
        debug!(
            "Loaded {} downloaded and {} empty keys from {}",
            manifest.downloaded.len(),
            manifest.empty.len(),
            self.config.manifest.display()
        );
        Ok(self.analyze(&manifest))
    }

    /// Analyze an already loaded manifest.
    pub fn analyze(&self, manifest: &Manifest) -> TileReport {
        let stray = manifest.empty_not_downloaded().count();
        if stray > 0 {
            debug!("{} empty keys are not listed as downloaded; ignoring them", stray);
        }

        let selection = select_tiles(manifest, &self.config.region);
        debug!(
            "Selected {} tiles in range {}",
            selection.tiles.len(),
            self.config.region
        );

        classify(selection, manifest, &self.config.tiles_dir, self.config.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(json: &str) -> Manifest {
        json.parse().unwrap()
    }

    #[test]
    fn test_select_filters_and_sorts() {
        let manifest = manifest(
            r#"{"downloaded": ["606-10", "598-1449", "597-10", "607-10", "600-1450", "600-5"]}"#,
        );
        let selection = select_tiles(&manifest, &RegionFilter::default());

        let coords: Vec<TileCoord> = selection.tiles.iter().map(|t| t.coord).collect();
        assert_eq!(
            coords,
            vec![
                TileCoord::new(598, 1449),
                TileCoord::new(600, 5),
                TileCoord::new(606, 10),
            ]
        );
        assert!(selection.invalid_keys.is_empty());
    }

    #[test]
    fn test_select_collects_invalid_keys() {
        let manifest = manifest(r#"{"downloaded": ["600-10", "bad", "600-x", "", "1-2-3"]}"#);
        let selection = select_tiles(&manifest, &RegionFilter::default());

        assert_eq!(selection.tiles.len(), 1);
        assert_eq!(selection.invalid_keys, vec!["", "1-2-3", "600-x", "bad"]);
    }

    #[test]
    fn test_empty_tiles_never_touch_disk() {
        // Nonexistent tiles_dir: an empty tile must not be reported missing.
        let manifest = manifest(r#"{"downloaded": ["600-100"], "empty": ["600-100"]}"#);
        let config = InventoryConfig {
            tiles_dir: PathBuf::from("/nonexistent/tiles"),
            ..Default::default()
        };
        let report = TileAnalyzer::new(config).analyze(&manifest);

        assert_eq!(report.empty_tiles, 1);
        assert_eq!(report.non_empty_tiles, 0);
        assert_eq!(report.missing_files, 0);
    }

    #[test]
    fn test_missing_non_empty_tile() {
        let manifest = manifest(r#"{"downloaded": ["600-100", "601-100"]}"#);
        let config = InventoryConfig {
            tiles_dir: PathBuf::from("/nonexistent/tiles"),
            ..Default::default()
        };
        let report = TileAnalyzer::new(config).analyze(&manifest);

        assert_eq!(report.non_empty_tiles, 2);
        assert_eq!(report.missing_files, 2);
        assert_eq!(
            report.missing_paths,
            vec![
                PathBuf::from("/nonexistent/tiles/9/1/600_100.png"),
                PathBuf::from("/nonexistent/tiles/9/1/601_100.png"),
            ]
        );
        assert_eq!(report.average_size(), 0.0);
    }

    #[test]
    fn test_stat_tile_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1_1.png");
        std::fs::write(&path, [0u8; 42]).unwrap();

        assert!(matches!(stat_tile_file(&path), TileFileStatus::Found(42)));
        assert!(matches!(
            stat_tile_file(&dir.path().join("2_2.png")),
            TileFileStatus::Missing
        ));
    }

    #[test]
    fn test_stat_through_regular_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("9");
        std::fs::write(&blocker, b"not a directory").unwrap();

        assert!(matches!(
            stat_tile_file(&blocker.join("1").join("600_100.png")),
            TileFileStatus::Missing
        ));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: InventoryConfig =
            serde_json::from_str(r#"{"tiles_dir": "data/tiles", "region": {"min_x": 0}}"#)
                .unwrap();
        assert_eq!(config.manifest, PathBuf::from(DEFAULT_MANIFEST_FILE));
        assert_eq!(config.tiles_dir, PathBuf::from("data/tiles"));
        assert_eq!(config.region.min_x, 0);
        assert_eq!(config.region.max_x, 606);
    }

    #[test]
    fn test_run_rejects_inverted_region() {
        let config = InventoryConfig {
            region: RegionFilter {
                min_x: 5,
                max_x: 1,
                max_y: 10,
            },
            ..Default::default()
        };
        assert!(TileAnalyzer::new(config).run().is_err());
    }
}
