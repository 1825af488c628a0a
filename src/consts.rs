//! Shared numeric constants for the area-editing core.

// ── Geometry ────────────────────────────────────────────────────

/// Mean Earth radius in meters, used by the great-circle distance.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Distance below which a tapped point counts as hitting an existing
/// polygon vertex. Strictly exclusive: a point exactly this far away
/// is not a hit.
pub const NEAR_THRESHOLD_METERS: f64 = 10.0;

// ── Saving ──────────────────────────────────────────────────────

/// Minimum number of vertices a polygon needs before it can be saved.
pub const MIN_AREA_POINTS: usize = 3;

// ── Viewport ────────────────────────────────────────────────────

/// Zoom level applied when framing a single point.
pub const SINGLE_POINT_ZOOM: f64 = 15.0;

/// Screen padding in pixels around a fitted bounding box.
pub const BOUNDS_PADDING_PX: u32 = 100;

/// Initial viewport center applied by the presentation layer before any
/// directive has been published (Casablanca).
pub const HOME_CENTER: crate::geo::GeoPoint = crate::geo::GeoPoint { latitude: 33.5731, longitude: -7.5898 };

/// Initial viewport zoom paired with [`HOME_CENTER`].
pub const HOME_ZOOM: f64 = 12.0;
