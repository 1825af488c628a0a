//! Point-list ⇄ persisted string codec.
//!
//! The persisted form is a JSON array of `{latitude, longitude}` objects
//! in vertex order. Decoding never fails: malformed input degrades to an
//! empty list, and callers cannot distinguish "genuinely empty" from
//! "corrupt". Missing numeric fields default to 0.0.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use crate::geo::GeoPoint;

/// Serialize an ordered point sequence to its persisted JSON form.
#[must_use]
pub fn encode_points(points: &[GeoPoint]) -> String {
    serde_json::to_string(points).unwrap_or_else(|_| "[]".to_string())
}

/// Parse a persisted JSON form back into an ordered point sequence.
/// Any syntax or shape error yields an empty sequence.
#[must_use]
pub fn decode_points(text: &str) -> Vec<GeoPoint> {
    serde_json::from_str(text).unwrap_or_default()
}
