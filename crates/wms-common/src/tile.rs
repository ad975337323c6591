//! Tile grid definitions.
//!
//! A tile grid divides a projected extent into square tiles at a fixed ladder
//! of resolutions. Rows count down from the top-left origin (XYZ / WMTS
//! convention).

use crate::{BoundingBox, CrsCode};
use serde::{Deserialize, Serialize};

/// Half the circumference of the Web Mercator sphere, in meters.
pub const WEB_MERCATOR_HALF_EXTENT: f64 = 20037508.342789244;

/// Default tile edge in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Highest zoom level in the default Web Mercator grid.
pub const DEFAULT_MAX_ZOOM: u32 = 28;

/// A tile coordinate (z/x/y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level (index into the resolution ladder)
    pub z: u32,
    /// Column (x)
    pub x: u32,
    /// Row (y), counted from the top
    pub y: u32,
}

impl TileCoord {
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// A square tile grid over a projected extent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    /// CRS the grid is defined in
    pub crs: CrsCode,
    /// Extent covered by the grid
    pub extent: BoundingBox,
    /// Top-left corner (x, y)
    pub origin: (f64, f64),
    /// Map units per pixel, one entry per zoom level, strictly decreasing
    pub resolutions: Vec<f64>,
    /// Tile edge in pixels
    pub tile_size: u32,
}

impl TileGrid {
    /// Standard Web Mercator (Google/OSM) grid, zoom 0..=`max_zoom`.
    pub fn web_mercator(max_zoom: u32) -> Self {
        let extent = BoundingBox::new(
            -WEB_MERCATOR_HALF_EXTENT,
            -WEB_MERCATOR_HALF_EXTENT,
            WEB_MERCATOR_HALF_EXTENT,
            WEB_MERCATOR_HALF_EXTENT,
        );
        let max_resolution = extent.width() / DEFAULT_TILE_SIZE as f64;
        let resolutions = (0..=max_zoom)
            .map(|z| max_resolution / 2f64.powi(z as i32))
            .collect();

        Self {
            crs: CrsCode::Epsg3857,
            extent,
            origin: (extent.min_x, extent.max_y),
            resolutions,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }

    /// Highest zoom level the grid defines.
    pub fn max_zoom(&self) -> u32 {
        self.resolutions.len().saturating_sub(1) as u32
    }

    /// Resolution at a zoom level.
    pub fn resolution(&self, z: u32) -> Option<f64> {
        self.resolutions.get(z as usize).copied()
    }

    /// Zoom level whose resolution is nearest to `resolution`.
    ///
    /// Resolutions coarser than zoom 0 clamp to 0 and finer than the last
    /// level clamp to `max_zoom`.
    pub fn z_for_resolution(&self, resolution: f64) -> u32 {
        let n = self.resolutions.len();
        if n == 0 || resolution >= self.resolutions[0] {
            return 0;
        }
        if resolution <= self.resolutions[n - 1] {
            return (n - 1) as u32;
        }

        for i in 1..n {
            let coarser = self.resolutions[i - 1];
            let finer = self.resolutions[i];
            if resolution >= finer {
                return if coarser - resolution < resolution - finer {
                    (i - 1) as u32
                } else {
                    i as u32
                };
            }
        }

        (n - 1) as u32
    }

    /// Tile containing a coordinate at zoom `z`, or `None` outside the grid.
    pub fn tile_coord_for_coord_and_z(&self, x: f64, y: f64, z: u32) -> Option<TileCoord> {
        let resolution = self.resolution(z)?;
        if !self.extent.contains_point(x, y) {
            return None;
        }

        let span = resolution * self.tile_size as f64;
        let col = ((x - self.origin.0) / span).floor();
        let row = ((self.origin.1 - y) / span).floor();

        // Points on the right/bottom edge belong to the last tile.
        let tiles = 2f64.powi(z as i32);
        let col = col.clamp(0.0, tiles - 1.0) as u32;
        let row = row.clamp(0.0, tiles - 1.0) as u32;

        Some(TileCoord::new(z, col, row))
    }

    /// Extent of a tile.
    pub fn tile_extent(&self, coord: &TileCoord) -> Option<BoundingBox> {
        let resolution = self.resolution(coord.z)?;
        let span = resolution * self.tile_size as f64;

        let min_x = self.origin.0 + coord.x as f64 * span;
        let max_y = self.origin.1 - coord.y as f64 * span;

        Some(BoundingBox::new(min_x, max_y - span, min_x + span, max_y))
    }
}
