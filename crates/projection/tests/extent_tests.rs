//! Reprojection of layer extents into the view projection.

use projection::{from_lon_lat, point_resolution, transform_extent, ProjectionError};
use test_utils::{assert_approx_eq, assert_coords_approx_eq, fixtures::bbox};
use wms_common::tile::WEB_MERCATOR_HALF_EXTENT;
use wms_common::{BoundingBox, CrsCode};

// ============================================================================
// Point projection
// ============================================================================

#[test]
fn test_europe_corners() {
    // Reference values from the EPSG:3857 definition.
    assert_coords_approx_eq!(from_lon_lat(-10.0, 40.0), (-1113194.9079, 4865942.2795), 1e-3);
    assert_coords_approx_eq!(from_lon_lat(10.0, 60.0), (1113194.9079, 8399737.8898), 1e-3);
}

#[test]
fn test_longitude_is_linear() {
    let (x1, _) = from_lon_lat(45.0, 0.0);
    let (x2, _) = from_lon_lat(90.0, 0.0);
    assert_approx_eq!(x2, 2.0 * x1, 1e-6);
    assert_approx_eq!(x2, WEB_MERCATOR_HALF_EXTENT / 2.0, 1e-6);
}

// ============================================================================
// Extent projection
// ============================================================================

#[test]
fn test_europe_extent_to_mercator() {
    let extent = transform_extent(
        &BoundingBox::from(bbox::EUROPE),
        CrsCode::Epsg4326,
        CrsCode::Epsg3857,
    )
    .unwrap();

    assert_approx_eq!(extent.min_x, -1113194.9079, 1e-3);
    assert_approx_eq!(extent.max_y, 8399737.8898, 1e-3);
    assert!(extent.width() > 0.0 && extent.height() > 0.0);
}

#[test]
fn test_global_extent_fills_the_world() {
    let extent = transform_extent(
        &BoundingBox::from(bbox::GLOBAL),
        CrsCode::Epsg4326,
        CrsCode::Epsg3857,
    )
    .unwrap();

    assert_approx_eq!(extent.min_x, -WEB_MERCATOR_HALF_EXTENT, 1e-6);
    assert_approx_eq!(extent.max_x, WEB_MERCATOR_HALF_EXTENT, 1e-6);
    assert_eq!(extent.min_y, -WEB_MERCATOR_HALF_EXTENT);
    assert_eq!(extent.max_y, WEB_MERCATOR_HALF_EXTENT);
}

#[test]
fn test_point_extent_fails() {
    let result = transform_extent(
        &BoundingBox::from(bbox::POINT),
        CrsCode::Epsg4326,
        CrsCode::Epsg3857,
    );
    assert!(matches!(result, Err(ProjectionError::EmptyExtent(_))));
}

#[test]
fn test_round_trip_back_to_degrees() {
    let original = BoundingBox::from(bbox::CONUS);
    let projected = transform_extent(&original, CrsCode::Epsg4326, CrsCode::Epsg3857).unwrap();
    let back = transform_extent(&projected, CrsCode::Epsg3857, CrsCode::Epsg4326).unwrap();

    assert_approx_eq!(back.min_x, original.min_x, 1e-9);
    assert_approx_eq!(back.min_y, original.min_y, 1e-9);
    assert_approx_eq!(back.max_x, original.max_x, 1e-9);
    assert_approx_eq!(back.max_y, original.max_y, 1e-9);
}

#[test]
fn test_point_resolution_at_equator_is_unchanged() {
    assert_approx_eq!(point_resolution(152.874, 0.0), 152.874, 1e-12);
}
