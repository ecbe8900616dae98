//! Coordinate region used to select tiles for analysis.

use crate::{InventoryError, Result, TileCoord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default inclusive lower x bound.
pub const DEFAULT_MIN_X: i64 = 598;

/// Default inclusive upper x bound.
pub const DEFAULT_MAX_X: i64 = 606;

/// Default exclusive upper y bound.
pub const DEFAULT_MAX_Y: i64 = 1450;

/// Rectangular selection of tiles: `min_x <= x <= max_x` and `y < max_y`.
///
/// The x range is inclusive on both ends while the y bound is exclusive and
/// there is no lower y bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionFilter {
    /// Inclusive lower x bound.
    pub min_x: i64,
    /// Inclusive upper x bound.
    pub max_x: i64,
    /// Exclusive upper y bound.
    pub max_y: i64,
}

impl Default for RegionFilter {
    fn default() -> Self {
        Self {
            min_x: DEFAULT_MIN_X,
            max_x: DEFAULT_MAX_X,
            max_y: DEFAULT_MAX_Y,
        }
    }
}

impl RegionFilter {
    /// Create a region, rejecting an empty x range.
    pub fn new(min_x: i64, max_x: i64, max_y: i64) -> Result<Self> {
        let region = Self { min_x, max_x, max_y };
        region.validate()?;
        Ok(region)
    }

    /// Check that the x range is not inverted.
    pub fn validate(&self) -> Result<()> {
        if self.min_x > self.max_x {
            return Err(InventoryError::InvalidRegion {
                min_x: self.min_x,
                max_x: self.max_x,
            });
        }
        Ok(())
    }

    /// Check if a tile lies inside the region.
    pub fn contains(&self, coord: TileCoord) -> bool {
        (self.min_x..=self.max_x).contains(&coord.x) && coord.y < self.max_y
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X:[{},{}], Y:<{}", self.min_x, self.max_x, self.max_y)
    }
}
