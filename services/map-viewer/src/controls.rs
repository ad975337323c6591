//! Map controls.

use projection::point_resolution;
use wms_common::CrsCode;

use crate::view::View;

const LEADING_DIGITS: [f64; 3] = [1.0, 2.0, 5.0];

/// What the scale line draws: a bar `width_px` long labelled `label`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleBar {
    pub width_px: u32,
    pub label: String,
}

/// Metric scale line.
///
/// Picks the smallest round length (1, 2 or 5 times a power of ten) whose
/// bar is at least `min_width` pixels long at the view center.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleLine {
    pub min_width: u32,
}

impl Default for ScaleLine {
    fn default() -> Self {
        Self { min_width: 64 }
    }
}

impl ScaleLine {
    /// `None` when the view has no usable resolution.
    pub fn render(&self, view: &View) -> Option<ScaleBar> {
        let meters_per_pixel = match view.projection() {
            CrsCode::Epsg3857 => point_resolution(view.resolution(), view.center().1),
            other => view.resolution() * other.meters_per_unit(),
        };
        if !(meters_per_pixel.is_finite() && meters_per_pixel > 0.0) {
            return None;
        }

        let min_width = self.min_width.max(1) as f64;
        let nominal = min_width * meters_per_pixel;
        let (suffix, units_per_pixel) = if nominal < 0.001 {
            ("μm", meters_per_pixel * 1_000_000.0)
        } else if nominal < 1.0 {
            ("mm", meters_per_pixel * 1000.0)
        } else if nominal < 1000.0 {
            ("m", meters_per_pixel)
        } else {
            ("km", meters_per_pixel / 1000.0)
        };

        let mut i = 3 * (min_width * units_per_pixel).log10().floor() as i32;
        loop {
            let decimal_count = i.div_euclid(3);
            let count = LEADING_DIGITS[i.rem_euclid(3) as usize] * 10f64.powi(decimal_count);
            let width = (count / units_per_pixel).round();
            if width >= min_width {
                let decimals = (-decimal_count).max(0) as usize;
                return Some(ScaleBar {
                    width_px: width as u32,
                    label: format!("{:.*} {}", decimals, count, suffix),
                });
            }
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_with_resolution(resolution: f64) -> View {
        let zoom = (crate::view::MAX_RESOLUTION / resolution).log2();
        View::new(CrsCode::Epsg3857, (0.0, 0.0), zoom)
    }

    #[test]
    fn test_kilometers_at_equator() {
        let bar = ScaleLine::default().render(&view_with_resolution(1000.0)).unwrap();
        assert_eq!(bar.label, "100 km");
        assert_eq!(bar.width_px, 100);
    }

    #[test]
    fn test_meters_when_zoomed_in() {
        let bar = ScaleLine::default().render(&view_with_resolution(1.0)).unwrap();
        assert_eq!(bar.label, "100 m");
        assert_eq!(bar.width_px, 100);
    }

    #[test]
    fn test_zero_min_width_still_renders() {
        let bar = ScaleLine { min_width: 0 }
            .render(&view_with_resolution(5000.0))
            .unwrap();
        assert!(bar.width_px >= 1, "{bar:?}");
        assert!(bar.label.ends_with(" km"), "{bar:?}");
    }

    #[test]
    fn test_bar_is_never_narrower_than_min_width() {
        for zoom in 0..20 {
            let view = View::new(CrsCode::Epsg3857, (0.0, 5_000_000.0), zoom as f64);
            let bar = ScaleLine::default().render(&view).unwrap();
            assert!(bar.width_px >= 64, "zoom {zoom}: {bar:?}");
            assert!(bar.width_px < 64 * 3, "zoom {zoom}: {bar:?}");
        }
    }
}
