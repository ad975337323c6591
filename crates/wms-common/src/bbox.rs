//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic or projected bounding box.
///
/// For geographic CRS (EPSG:4326), coordinates are in degrees.
/// For projected CRS (EPSG:3857), coordinates are in meters.
///
/// On the wire a bbox is the plain array `[minX, minY, maxX, maxY]`, which is
/// how the layer API publishes extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The whole world in EPSG:4326.
    pub fn world() -> Self {
        Self::new(-180.0, -90.0, 180.0, 90.0)
    }

    /// Format as a WMS BBOX parameter value.
    pub fn to_wms_string(&self) -> String {
        format!("{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Midpoint of the box as (x, y).
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// True when every corner is a finite number.
    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }

    /// True when the box covers no area (or is inverted).
    pub fn is_empty(&self) -> bool {
        !(self.max_x > self.min_x && self.max_y > self.min_y)
    }

    /// Check if a point is contained within this bbox.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Same box with the axes swapped, for lat/lon axis-ordered CRS.
    pub fn swap_axes(&self) -> Self {
        Self::new(self.min_y, self.min_x, self.max_y, self.max_x)
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from([min_x, min_y, max_x, max_y]: [f64; 4]) -> Self {
        Self::new(min_x, min_y, max_x, max_y)
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        [bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wms_string() {
        let bbox = BoundingBox::new(-125.0, 24.0, -66.0, 50.5);
        assert_eq!(bbox.to_wms_string(), "-125,24,-66,50.5");
        assert_eq!(bbox.swap_axes().to_wms_string(), "24,-125,50.5,-66");
    }

    #[test]
    fn test_json_is_plain_array() {
        let bbox: BoundingBox = serde_json::from_str("[-10, 40, 10, 60]").unwrap();
        assert_eq!(bbox, BoundingBox::new(-10.0, 40.0, 10.0, 60.0));
        assert_eq!(
            serde_json::to_string(&bbox).unwrap(),
            "[-10.0,40.0,10.0,60.0]"
        );
    }

    #[test]
    fn test_center_and_emptiness() {
        let bbox = BoundingBox::new(-10.0, 40.0, 10.0, 60.0);
        assert_eq!(bbox.center(), (0.0, 50.0));
        assert!(!bbox.is_empty());
        assert!(BoundingBox::new(1.0, 1.0, 1.0, 2.0).is_empty());
        assert!(!BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0).is_finite());
    }
}
