//! Geographic points, great-circle distance, and the proximity relation.
//!
//! Coordinate equality on [`GeoPoint`] is exact (`PartialEq` on the raw
//! floats). *Nearness* is a separate derived relation based on metric
//! distance, so tap jitter of a few meters still matches an existing
//! vertex. Plain spherical law throughout; pole and antimeridian
//! wraparound are not corrected for.

#[cfg(test)]
#[path = "geo_test.rs"]
mod geo_test;

use serde::{Deserialize, Serialize};

use crate::consts::EARTH_RADIUS_METERS;

/// A geographic coordinate in decimal degrees.
///
/// Missing fields deserialize to 0.0 so that partially written persisted
/// payloads degrade instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees, positive north.
    #[serde(default)]
    pub latitude: f64,
    /// Longitude in decimal degrees, positive east.
    #[serde(default)]
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Great-circle distance between two points in meters (haversine).
#[must_use]
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Whether two points are within `threshold_meters` of each other.
///
/// The boundary is exclusive: a pair exactly `threshold_meters` apart is
/// not near.
#[must_use]
pub fn is_near(a: GeoPoint, b: GeoPoint, threshold_meters: f64) -> bool {
    distance_meters(a, b) < threshold_meters
}

/// Index of the first point in `points` that is near `target`, or `None`
/// if no point qualifies.
#[must_use]
pub fn find_near_index(points: &[GeoPoint], target: GeoPoint, threshold_meters: f64) -> Option<usize> {
    points.iter().position(|&p| is_near(p, target, threshold_meters))
}
