//! Initial camera fit over the loaded records.

use std::time::Duration;

use geo::{Coord, Rect};
use log::info;

use crate::camera::FitBounds;
use crate::record::PoiRecord;
use crate::surface::MapSurface;

/// Smallest rectangle covering every finite record coordinate.
///
/// Returns `None` when no record has finite coordinates.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use poimap_core::{PoiRecord, compute_bounds};
///
/// let records = vec![
///     PoiRecord::new("West", Coord { x: 113.9, y: 22.5 }),
///     PoiRecord::new("East", Coord { x: 114.1, y: 22.7 }),
/// ];
/// let bounds = compute_bounds(&records).expect("two records");
/// assert_eq!(bounds.min(), Coord { x: 113.9, y: 22.5 });
/// assert_eq!(bounds.max(), Coord { x: 114.1, y: 22.7 });
///
/// assert!(compute_bounds(&[]).is_none());
/// ```
#[must_use]
pub fn compute_bounds(records: &[PoiRecord]) -> Option<Rect<f64>> {
    records
        .iter()
        .map(|record| record.location)
        .filter(|coord| coord.x.is_finite() && coord.y.is_finite())
        .fold(None, |bounds, coord| Some(extend(bounds, coord)))
}

fn extend(bounds: Option<Rect<f64>>, coord: Coord<f64>) -> Rect<f64> {
    match bounds {
        Some(rect) => {
            let min = rect.min();
            let max = rect.max();
            Rect::new(
                Coord {
                    x: min.x.min(coord.x),
                    y: min.y.min(coord.y),
                },
                Coord {
                    x: max.x.max(coord.x),
                    y: max.y.max(coord.y),
                },
            )
        }
        None => Rect::new(coord, coord),
    }
}

/// Issues the single fit-bounds command for a record set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFitter {
    /// Padding in pixels.
    pub padding: u32,
    /// Zoom ceiling.
    pub max_zoom: f64,
    /// Animation duration.
    pub duration: Duration,
}

impl Default for ViewportFitter {
    fn default() -> Self {
        Self {
            padding: 5,
            max_zoom: 17.0,
            duration: Duration::from_millis(500),
        }
    }
}

impl ViewportFitter {
    /// Fit the camera to `records`.
    ///
    /// With no usable coordinates the camera is left alone and `None` is
    /// returned.
    pub fn fit<S>(&self, surface: &mut S, records: &[PoiRecord]) -> Option<FitBounds>
    where
        S: MapSurface + ?Sized,
    {
        let Some(rect) = compute_bounds(records) else {
            info!("no POI coordinates to fit; keeping the initial camera");
            return None;
        };
        let command = FitBounds::new(rect, self.padding, self.max_zoom, self.duration);
        surface.fit_bounds(command);
        Some(command)
    }
}
