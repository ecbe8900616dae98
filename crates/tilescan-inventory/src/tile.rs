//! Tile coordinates, tile keys and the sharded on-disk layout.
//!
//! ## Tile Keys
//!
//! The manifest names each tile with a key of the form `"<x>-<y>"`, for
//! example `"600-1402"`. A key must split on `-` into exactly two integer
//! parts. Because `-` is the separator, negative coordinates cannot be
//! written as keys. Digits may be grouped with single underscores
//! (`"1_000-5"`), and values outside the `i64` range are rejected.
//!
//! ## Shard Layout
//!
//! Tile images are stored under a tiles root, sharded into directories of
//! [`SHARD_SIZE`] x [`SHARD_SIZE`] tiles to keep directory fan-out small:
//!
//! ```text
//! tiles/{floor(x / 64)}/{floor(y / 64)}/{x}_{y}.png
//! ```

use crate::{InventoryError, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Number of tiles along each axis of a shard directory.
pub const SHARD_SIZE: i64 = 64;

/// Separator between the coordinates of a tile key.
pub const KEY_SEPARATOR: char = '-';

/// File extension of stored tile images.
pub const TILE_EXTENSION: &str = "png";

/// Integer grid coordinates of a map tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileCoord {
    /// X coordinate (column).
    pub x: i64,
    /// Y coordinate (row).
    pub y: i64,
}

impl TileCoord {
    /// Create a new tile coordinate.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Parse a tile key like `"600-1402"`.
    pub fn parse_key(key: &str) -> Result<Self> {
        let invalid = || InventoryError::InvalidTileKey {
            key: key.to_string(),
        };

        let mut parts = key.split(KEY_SEPARATOR);
        let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        let x = parse_coordinate(x).ok_or_else(invalid)?;
        let y = parse_coordinate(y).ok_or_else(invalid)?;

        Ok(Self { x, y })
    }

    /// The key this coordinate is written as in a manifest.
    pub fn key(&self) -> String {
        format!("{}{}{}", self.x, KEY_SEPARATOR, self.y)
    }

    /// Shard directory indices `(floor(x / 64), floor(y / 64))`.
    pub fn shard(&self) -> (i64, i64) {
        (self.x.div_euclid(SHARD_SIZE), self.y.div_euclid(SHARD_SIZE))
    }

    /// File name of the tile image, `{x}_{y}.png`.
    pub fn file_name(&self) -> String {
        format!("{}_{}.{}", self.x, self.y, TILE_EXTENSION)
    }

    /// Get the image path for this tile under `tiles_root`.
    pub fn shard_path(&self, tiles_root: &Path) -> PathBuf {
        let (shard_x, shard_y) = self.shard();
        tiles_root
            .join(shard_x.to_string())
            .join(shard_y.to_string())
            .join(self.file_name())
    }
}

/// Parse one key component: an optionally signed integer, surrounded by
/// optional whitespace, with single `_` allowed between digits (`1_000`).
fn parse_coordinate(part: &str) -> Option<i64> {
    let part = part.trim();
    let digits = part.strip_prefix('+').unwrap_or(part);
    if digits.contains('_') {
        let grouped = digits
            .split('_')
            .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()));
        if !grouped {
            return None;
        }
        return digits.replace('_', "").parse().ok();
    }
    part.parse().ok()
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for TileCoord {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_key(s)
    }
}
