//! Camera and popup commands issued to the render surface.

use std::time::Duration;

use geo::{Coord, Rect};
use serde::{Serialize, Serializer};

/// Animate the camera to centre on a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlyTo {
    /// Target centre as `[longitude, latitude]`.
    pub center: [f64; 2],
    /// Target zoom level.
    pub zoom: f64,
    /// Animation speed multiplier.
    pub speed: f64,
    /// Zoom curve of the flight path.
    pub curve: f64,
}

impl FlyTo {
    /// Zoom used when focusing a clicked feature.
    pub const FOCUS_ZOOM: f64 = 12.0;
    /// Flight speed used when focusing a clicked feature.
    pub const FOCUS_SPEED: f64 = 1.2;
    /// Flight curve used when focusing a clicked feature.
    pub const FOCUS_CURVE: f64 = 1.42;

    /// Focus flight centred on `coord`.
    #[must_use]
    pub const fn focus(coord: Coord<f64>) -> Self {
        Self {
            center: [coord.x, coord.y],
            zoom: Self::FOCUS_ZOOM,
            speed: Self::FOCUS_SPEED,
            curve: Self::FOCUS_CURVE,
        }
    }
}

/// Fit the camera to a bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitBounds {
    /// `[[min_lon, min_lat], [max_lon, max_lat]]`.
    pub bounds: [[f64; 2]; 2],
    /// Padding in pixels around the rectangle.
    pub padding: u32,
    /// Zoom ceiling for the fit.
    pub max_zoom: f64,
    /// Animation duration, serialised in milliseconds.
    #[serde(serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl FitBounds {
    /// Build the command for a rectangle with the given animation settings.
    #[must_use]
    pub fn new(rect: Rect<f64>, padding: u32, max_zoom: f64, duration: Duration) -> Self {
        let min = rect.min();
        let max = rect.max();
        Self {
            bounds: [[min.x, min.y], [max.x, max.y]],
            padding,
            max_zoom,
            duration,
        }
    }
}

/// Detail popup anchored to a map coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    /// Anchor as `[longitude, latitude]`.
    pub at: [f64; 2],
    /// Pixel offset from the anchor.
    pub offset: [i32; 2],
    /// Rendered HTML content.
    pub html: String,
}

impl Popup {
    /// Offset that lifts the popup above the icon.
    pub const OFFSET: [i32; 2] = [0, -20];
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn fit_bounds_orders_south_west_first() {
        let rect = Rect::new(Coord { x: 114.1, y: 22.7 }, Coord { x: 113.9, y: 22.5 });
        let fit = FitBounds::new(rect, 5, 17.0, Duration::from_millis(500));
        assert_eq!(fit.bounds, [[113.9, 22.5], [114.1, 22.7]]);
    }

    #[rstest]
    fn fit_bounds_serialises_duration_in_millis() {
        let rect = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
        let fit = FitBounds::new(rect, 5, 17.0, Duration::from_millis(500));
        let value = serde_json::to_value(fit).expect("fit should serialise");
        assert_eq!(value.get("duration"), Some(&json!(500)));
        assert_eq!(value.get("maxZoom"), Some(&json!(17.0)));
    }

    #[rstest]
    fn focus_uses_fixed_animation() {
        let fly = FlyTo::focus(Coord { x: 114.05, y: 22.61 });
        assert_eq!(fly.center, [114.05, 22.61]);
        assert_eq!(fly.zoom, 12.0);
        assert_eq!(fly.speed, 1.2);
        assert_eq!(fly.curve, 1.42);
    }
}
