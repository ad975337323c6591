//! Point and extent reprojection between the supported CRS.

use wms_common::{BoundingBox, CrsCode};

use crate::mercator;

#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("Coordinate is not finite: ({0}, {1})")]
    NonFinite(f64, f64),

    #[error("Extent is empty after projecting to {0}")]
    EmptyExtent(CrsCode),
}

/// Reproject a single point.
pub fn transform_point(
    x: f64,
    y: f64,
    from: CrsCode,
    to: CrsCode,
) -> Result<(f64, f64), ProjectionError> {
    if !x.is_finite() || !y.is_finite() {
        return Err(ProjectionError::NonFinite(x, y));
    }

    Ok(match (from, to) {
        (CrsCode::Epsg4326, CrsCode::Epsg3857) => mercator::from_lon_lat(x, y),
        (CrsCode::Epsg3857, CrsCode::Epsg4326) => mercator::to_lon_lat(x, y),
        _ => (x, y),
    })
}

/// Reproject an extent by its lower-left and upper-right corners.
///
/// Both supported projections are axis-aligned and monotonic, so the corners
/// are enough.
pub fn transform_extent(
    bbox: &BoundingBox,
    from: CrsCode,
    to: CrsCode,
) -> Result<BoundingBox, ProjectionError> {
    let (min_x, min_y) = transform_point(bbox.min_x, bbox.min_y, from, to)?;
    let (max_x, max_y) = transform_point(bbox.max_x, bbox.max_y, from, to)?;

    let projected = BoundingBox::new(min_x, min_y, max_x, max_y);
    if projected.is_empty() {
        return Err(ProjectionError::EmptyExtent(to));
    }

    Ok(projected)
}
