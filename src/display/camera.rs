//! Camera fitting for a flat map viewport

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::core::{Position, Region};
use crate::display::EdgePadding;

/// Smallest span a fitted camera will zoom to (degrees)
pub const MIN_FIT_DELTA: f64 = 0.0005;

/// Map widget size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width_px: u32,
    pub height_px: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width_px: 390,
            height_px: 720,
        }
    }
}

/// Axis-aligned box over positions; `x` is longitude, `y` is latitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl Bounds {
    pub fn from_positions(positions: &[Position]) -> Option<Self> {
        let (first, rest) = positions.split_first()?;
        let start = Vector2::new(first.longitude, first.latitude);

        let (min, max) = rest.iter().fold((start, start), |(min, max), p| {
            let v = Vector2::new(p.longitude, p.latitude);
            (min.inf(&v), max.sup(&v))
        });
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vector2<f64> {
        (self.min + self.max) / 2.0
    }

    pub fn span(&self) -> Vector2<f64> {
        self.max - self.min
    }
}

/// Region that shows every position inside the padded area of the viewport.
///
/// Padding that leaves no usable pixels on an axis is ignored for that axis.
pub fn fit_region(positions: &[Position], padding: &EdgePadding, viewport: &Viewport) -> Option<Region> {
    let bounds = Bounds::from_positions(positions)?;
    let size = Vector2::new(viewport.width_px as f64, viewport.height_px as f64);
    if size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }

    let usable = Vector2::new(
        usable_extent(size.x, padding.horizontal()),
        usable_extent(size.y, padding.vertical()),
    );
    let span = bounds.span().map(|d| d.max(MIN_FIT_DELTA));
    let delta = span.component_mul(&size).component_div(&usable);

    // Degrees per pixel, then shift the center towards the larger margin
    let scale = delta.component_div(&size);
    let shift = Vector2::new(
        (padding.right as f64 - padding.left as f64) / 2.0 * scale.x,
        (padding.top as f64 - padding.bottom as f64) / 2.0 * scale.y,
    );
    let shift = Vector2::new(
        if usable.x < size.x { shift.x } else { 0.0 },
        if usable.y < size.y { shift.y } else { 0.0 },
    );
    let center = bounds.center() + shift;

    Some(Region {
        latitude: center.y,
        longitude: center.x,
        latitude_delta: delta.y,
        longitude_delta: delta.x,
    })
}

fn usable_extent(size: f64, padding: u64) -> f64 {
    let usable = size - padding as f64;
    if usable > 0.0 {
        usable
    } else {
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_bounds_from_positions() {
        let bounds = Bounds::from_positions(&[
            Position::new(10.0, 20.0),
            Position::new(12.0, 18.0),
            Position::new(11.0, 25.0),
        ])
        .unwrap();

        assert_eq!(bounds.min, Vector2::new(18.0, 10.0));
        assert_eq!(bounds.max, Vector2::new(25.0, 12.0));
        assert_eq!(bounds.center(), Vector2::new(21.5, 11.0));
        assert!(Bounds::from_positions(&[]).is_none());
    }

    #[test]
    fn test_fit_without_padding_matches_bounds() {
        let padding = EdgePadding {
            top: 0,
            right: 0,
            bottom: 0,
            left: 0,
        };
        let region = fit_region(
            &[Position::new(10.0, 20.0), Position::new(12.0, 24.0)],
            &padding,
            &Viewport::default(),
        )
        .unwrap();

        assert!(close(region.latitude, 11.0));
        assert!(close(region.longitude, 22.0));
        assert!(close(region.latitude_delta, 2.0));
        assert!(close(region.longitude_delta, 4.0));
    }

    #[test]
    fn test_padding_widens_the_span() {
        let viewport = Viewport {
            width_px: 400,
            height_px: 800,
        };
        let padding = EdgePadding::default();
        let region = fit_region(
            &[Position::new(10.0, 20.0), Position::new(12.0, 24.0)],
            &padding,
            &viewport,
        )
        .unwrap();

        // 400px wide with 100px of horizontal padding leaves 300px for 4 degrees
        assert!(close(region.longitude_delta, 4.0 * 400.0 / 300.0));
        assert!(close(region.latitude_delta, 2.0 * 800.0 / 640.0));
        // Symmetric padding keeps the center
        assert!(close(region.latitude, 11.0));
        assert!(close(region.longitude, 22.0));
    }

    #[test]
    fn test_asymmetric_padding_shifts_center() {
        let viewport = Viewport {
            width_px: 400,
            height_px: 400,
        };
        let padding = EdgePadding {
            top: 0,
            right: 100,
            bottom: 0,
            left: 0,
        };
        let region = fit_region(
            &[Position::new(0.0, 0.0), Position::new(3.0, 3.0)],
            &padding,
            &viewport,
        )
        .unwrap();

        assert!(close(region.longitude_delta, 4.0));
        assert!(close(region.longitude, 2.0));
        assert!(close(region.latitude, 1.5));
    }

    #[test]
    fn test_single_point_uses_minimum_span() {
        let padding = EdgePadding {
            top: 0,
            right: 0,
            bottom: 0,
            left: 0,
        };
        let region = fit_region(&[Position::new(5.0, 5.0)], &padding, &Viewport::default()).unwrap();
        assert!(close(region.latitude_delta, MIN_FIT_DELTA));
        assert!(close(region.longitude_delta, MIN_FIT_DELTA));
    }

    #[test]
    fn test_oversized_padding_is_ignored() {
        let viewport = Viewport {
            width_px: 100,
            height_px: 100,
        };
        let padding = EdgePadding {
            top: 80,
            right: 80,
            bottom: 80,
            left: 80,
        };
        let region = fit_region(
            &[Position::new(0.0, 0.0), Position::new(1.0, 1.0)],
            &padding,
            &viewport,
        )
        .unwrap();
        assert!(close(region.latitude_delta, 1.0));
        assert!(close(region.longitude, 0.5));
    }

    #[test]
    fn test_padding_near_u32_max_does_not_overflow() {
        let padding = EdgePadding {
            top: 0,
            right: 2,
            bottom: 0,
            left: u32::MAX,
        };
        assert_eq!(padding.horizontal(), u64::from(u32::MAX) + 2);

        let region = fit_region(
            &[Position::new(0.0, 0.0), Position::new(1.0, 1.0)],
            &padding,
            &Viewport {
                width_px: 100,
                height_px: 100,
            },
        )
        .unwrap();
        assert!(close(region.longitude_delta, 1.0));
        assert!(close(region.longitude, 0.5));
    }
}
