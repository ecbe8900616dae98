//! # tilescan-inventory
//!
//! Inventory analysis for a directory of downloaded map tiles.
//!
//! A tile downloader records what it fetched in a JSON manifest
//! (`downloaded_tiles.json`): the keys of every downloaded tile and the keys
//! of the tiles that turned out to contain no data. This crate reads that
//! manifest, selects the tiles inside a coordinate region, and checks the
//! sharded image tree on disk to report how many tiles are empty, how much
//! space the non-empty ones take, and which images are missing.
//!
//! ## Overview
//!
//! - [`TileCoord`] parses `"<x>-<y>"` keys and maps a tile to its image path
//!   `tiles/{x/64}/{y/64}/{x}_{y}.png`.
//! - [`Manifest`] loads the downloaded/empty key sets.
//! - [`RegionFilter`] selects tiles with `min_x <= x <= max_x` and `y < max_y`.
//! - [`TileAnalyzer`] runs the whole pass and returns a [`TileReport`], whose
//!   `Display` impl renders the console report.
//!
//! Malformed keys and missing or unreadable images are logged with
//! `tracing::warn!` and counted; only a missing or unreadable manifest fails
//! the run.
//!
//! ## Example
//!
//! ```no_run
//! use tilescan_inventory::{InventoryConfig, RegionFilter, TileAnalyzer};
//!
//! let config = InventoryConfig {
//!     region: RegionFilter::new(598, 606, 1450)?,
//!     ..Default::default()
//! };
//!
//! let report = TileAnalyzer::new(config).run()?;
//! println!("{} empty, {} non-empty", report.empty_tiles, report.non_empty_tiles);
//! # Ok::<(), tilescan_inventory::InventoryError>(())
//! ```

mod analyzer;
mod error;
mod manifest;
mod region;
mod report;
mod tile;

pub use analyzer::{
    classify, stat_tile_file, select_tiles, InventoryConfig, SelectedTile, Selection,
    TileAnalyzer, TileFileStatus, DEFAULT_TILES_DIR,
};
pub use error::InventoryError;
pub use manifest::{Manifest, DEFAULT_MANIFEST_FILE};
pub use region::{RegionFilter, DEFAULT_MAX_X, DEFAULT_MAX_Y, DEFAULT_MIN_X};
pub use report::TileReport;
pub use tile::{TileCoord, KEY_SEPARATOR, SHARD_SIZE, TILE_EXTENSION};

/// Result type for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;
