//! Spherical Mercator (EPSG:3857).
//!
//! The sphere uses the WGS84 semi-major axis as its radius. Latitudes beyond
//! roughly ±85.0511° project outside the square world extent and are clamped
//! to its edge.

use std::f64::consts::PI;

use wms_common::tile::WEB_MERCATOR_HALF_EXTENT;

/// Sphere radius in meters.
pub const RADIUS: f64 = 6378137.0;

/// Project a lon/lat pair (degrees) to Web Mercator meters.
pub fn from_lon_lat(lon: f64, lat: f64) -> (f64, f64) {
    let x = RADIUS * lon.to_radians();
    let y = RADIUS * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
    (x, y.clamp(-WEB_MERCATOR_HALF_EXTENT, WEB_MERCATOR_HALF_EXTENT))
}

/// Inverse of [`from_lon_lat`].
pub fn to_lon_lat(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / RADIUS).to_degrees();
    let lat = (2.0 * (y / RADIUS).exp().atan() - PI / 2.0).to_degrees();
    (lon, lat)
}

/// Ground meters per pixel at northing `y` for a view resolution.
///
/// Mercator stretches distances by `cosh(y / R)`, so the true scale shrinks
/// away from the equator.
pub fn point_resolution(resolution: f64, y: f64) -> f64 {
    resolution / (y / RADIUS).cosh()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_origin() {
        let (x, y) = from_lon_lat(0.0, 0.0);
        assert!(x.abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn test_antimeridian_is_world_edge() {
        let (x, _) = from_lon_lat(180.0, 0.0);
        assert!((x - WEB_MERCATOR_HALF_EXTENT).abs() < 1e-6);
    }

    #[test]
    fn test_poles_are_clamped() {
        let (_, y) = from_lon_lat(0.0, 90.0);
        assert_eq!(y, WEB_MERCATOR_HALF_EXTENT);
        let (_, y) = from_lon_lat(0.0, -90.0);
        assert_eq!(y, -WEB_MERCATOR_HALF_EXTENT);
    }

    #[test]
    fn test_inverse() {
        let (x, y) = from_lon_lat(-10.0, 40.0);
        let (lon, lat) = to_lon_lat(x, y);
        assert!((lon + 10.0).abs() < 1e-9);
        assert!((lat - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_resolution_at_60_degrees_is_halved() {
        let (_, y) = from_lon_lat(0.0, 60.0);
        assert!((point_resolution(100.0, y) - 50.0).abs() < 1e-6);
    }
}
