//! Viewport-fit directives.
//!
//! Pure computation from geometry to a camera instruction. The core never
//! moves a camera itself; the presentation layer subscribes to the
//! store's directive channel and applies each value to whatever map
//! surface it renders with. Directives are edge-triggered: one per
//! selection or search event, never re-derived per frame.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{BOUNDS_PADDING_PX, SINGLE_POINT_ZOOM};
use crate::geo::GeoPoint;

/// An instruction describing how the map viewport should be positioned,
/// independent of any rendering technology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraDirective {
    /// Leave the camera where it is.
    NoOp,
    /// Center on one point at a fixed zoom level.
    PointZoom {
        /// Point to center on.
        center: GeoPoint,
        /// Target zoom level.
        zoom: f64,
    },
    /// Frame a bounding rectangle with screen padding.
    BoundsFit {
        /// Minimum-latitude / minimum-longitude corner.
        southwest: GeoPoint,
        /// Maximum-latitude / maximum-longitude corner.
        northeast: GeoPoint,
        /// Padding in screen pixels around the box.
        padding_px: u32,
    },
}

/// Compute the directive that frames `points`.
///
/// Empty input yields [`CameraDirective::NoOp`]; a single point centers
/// at [`SINGLE_POINT_ZOOM`]; two or more points fit the minimal lat/lon
/// box containing all of them. No dateline-wrap handling.
#[must_use]
pub fn fit_points(points: &[GeoPoint]) -> CameraDirective {
    match points {
        [] => CameraDirective::NoOp,
        [only] => CameraDirective::PointZoom { center: *only, zoom: SINGLE_POINT_ZOOM },
        _ => {
            let mut min_lat = f64::INFINITY;
            let mut max_lat = f64::NEG_INFINITY;
            let mut min_lon = f64::INFINITY;
            let mut max_lon = f64::NEG_INFINITY;
            for p in points {
                min_lat = min_lat.min(p.latitude);
                max_lat = max_lat.max(p.latitude);
                min_lon = min_lon.min(p.longitude);
                max_lon = max_lon.max(p.longitude);
            }
            CameraDirective::BoundsFit {
                southwest: GeoPoint::new(min_lat, min_lon),
                northeast: GeoPoint::new(max_lat, max_lon),
                padding_px: BOUNDS_PADDING_PX,
            }
        }
    }
}
