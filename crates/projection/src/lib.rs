//! Coordinate reference system transformations.
//!
//! Implements the two projections the viewer needs from scratch without
//! external dependencies: geographic WGS84 and spherical (Web) Mercator.

pub mod mercator;
pub mod transform;

pub use mercator::{from_lon_lat, point_resolution, to_lon_lat};
pub use transform::{transform_extent, transform_point, ProjectionError};
