//! Map view state: projection, center and resolution.
//!
//! Zoom levels follow the Web Mercator tile ladder: zoom 0 shows the whole
//! world in one 256px tile, every level halves the resolution. Fractional
//! zooms are allowed.

use std::time::Duration;

use thiserror::Error;
use wms_common::tile::{DEFAULT_MAX_ZOOM, DEFAULT_TILE_SIZE, WEB_MERCATOR_HALF_EXTENT};
use wms_common::{BoundingBox, CrsCode};

/// Resolution at zoom 0, in meters per pixel.
pub const MAX_RESOLUTION: f64 = 2.0 * WEB_MERCATOR_HALF_EXTENT / DEFAULT_TILE_SIZE as f64;

#[derive(Debug, Error, PartialEq)]
pub enum ViewError {
    #[error("Cannot fit an empty or non-finite extent")]
    InvalidExtent,

    #[error("Viewport has no drawable area")]
    EmptyViewport,
}

/// Options for [`View::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    /// Transition length; zero jumps straight to the target
    pub duration: Duration,
    /// Pixels kept free around the extent: top, right, bottom, left
    pub padding: [u32; 4],
    /// Never zoom in further than this
    pub max_zoom: Option<f64>,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            duration: Duration::ZERO,
            padding: [0; 4],
            max_zoom: None,
        }
    }
}

impl FitOptions {
    pub fn animated(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }
}

/// A transition between two view states.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub from_center: (f64, f64),
    pub from_resolution: f64,
    pub to_center: (f64, f64),
    pub to_resolution: f64,
    pub duration: Duration,
}

impl Animation {
    /// Center and resolution `elapsed` into the transition (ease in and out).
    pub fn sample(&self, elapsed: Duration) -> ((f64, f64), f64) {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / self.duration.as_secs_f64()
        };
        if t >= 1.0 {
            return (self.to_center, self.to_resolution);
        }
        let eased = t * t * (3.0 - 2.0 * t);
        let lerp = |a: f64, b: f64| a + eased * (b - a);

        (
            (
                lerp(self.from_center.0, self.to_center.0),
                lerp(self.from_center.1, self.to_center.1),
            ),
            lerp(self.from_resolution, self.to_resolution),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    projection: CrsCode,
    center: (f64, f64),
    resolution: f64,
    animation: Option<Animation>,
}

impl View {
    pub fn new(projection: CrsCode, center: (f64, f64), zoom: f64) -> Self {
        Self {
            projection,
            center,
            resolution: resolution_for_zoom(zoom),
            animation: None,
        }
    }

    pub fn projection(&self) -> CrsCode {
        self.projection
    }

    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    /// Map units per pixel.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn zoom(&self) -> f64 {
        (MAX_RESOLUTION / self.resolution).log2()
    }

    /// Last transition started by [`fit`](Self::fit), if it was animated.
    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    pub fn set_center(&mut self, center: (f64, f64)) {
        self.center = center;
        self.animation = None;
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.resolution = resolution_for_zoom(zoom);
        self.animation = None;
    }

    /// Center and zoom so that `extent` fills a viewport of `size` pixels.
    ///
    /// The view moves to the target immediately; when `options.duration` is
    /// non-zero the transition is recorded for whoever draws frames.
    pub fn fit(
        &mut self,
        extent: &BoundingBox,
        size: (u32, u32),
        options: &FitOptions,
    ) -> Result<(), ViewError> {
        if !extent.is_finite() || extent.is_empty() {
            return Err(ViewError::InvalidExtent);
        }

        let [top, right, bottom, left] = options.padding.map(f64::from);
        let width = size.0 as f64 - left - right;
        let height = size.1 as f64 - top - bottom;
        if width <= 0.0 || height <= 0.0 {
            return Err(ViewError::EmptyViewport);
        }

        let mut resolution = (extent.width() / width).max(extent.height() / height);
        if let Some(max_zoom) = options.max_zoom {
            resolution = resolution.max(resolution_for_zoom(max_zoom));
        }
        let resolution = clamp_resolution(resolution);

        let (cx, cy) = extent.center();
        let center = (
            cx + (right - left) / 2.0 * resolution,
            cy + (top - bottom) / 2.0 * resolution,
        );

        self.animation = (!options.duration.is_zero()).then(|| Animation {
            from_center: self.center,
            from_resolution: self.resolution,
            to_center: center,
            to_resolution: resolution,
            duration: options.duration,
        });
        self.center = center;
        self.resolution = resolution;

        Ok(())
    }

    /// Extent visible in a viewport of `size` pixels.
    pub fn calculate_extent(&self, size: (u32, u32)) -> BoundingBox {
        let half_w = size.0 as f64 * self.resolution / 2.0;
        let half_h = size.1 as f64 * self.resolution / 2.0;
        BoundingBox::new(
            self.center.0 - half_w,
            self.center.1 - half_h,
            self.center.0 + half_w,
            self.center.1 + half_h,
        )
    }

    /// Map coordinate under a pixel (origin top-left).
    pub fn coordinate_for_pixel(&self, pixel: (f64, f64), size: (u32, u32)) -> (f64, f64) {
        (
            self.center.0 + (pixel.0 - size.0 as f64 / 2.0) * self.resolution,
            self.center.1 - (pixel.1 - size.1 as f64 / 2.0) * self.resolution,
        )
    }

    /// Pixel position of a map coordinate (origin top-left).
    pub fn pixel_for_coordinate(&self, coordinate: (f64, f64), size: (u32, u32)) -> (f64, f64) {
        (
            (coordinate.0 - self.center.0) / self.resolution + size.0 as f64 / 2.0,
            (self.center.1 - coordinate.1) / self.resolution + size.1 as f64 / 2.0,
        )
    }
}

pub fn resolution_for_zoom(zoom: f64) -> f64 {
    clamp_resolution(MAX_RESOLUTION / 2f64.powf(zoom))
}

fn clamp_resolution(resolution: f64) -> f64 {
    let min_resolution = MAX_RESOLUTION / 2f64.powi(DEFAULT_MAX_ZOOM as i32);
    resolution.clamp(min_resolution, MAX_RESOLUTION)
}
