#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn round_trip_preserves_points_and_order() {
    let points = vec![
        GeoPoint::new(33.58, -7.59),
        GeoPoint::new(33.59, -7.60),
        GeoPoint::new(33.57, -7.58),
    ];
    let encoded = encode_points(&points);
    assert_eq!(decode_points(&encoded), points);
}

#[test]
fn encode_empty_sequence() {
    assert_eq!(encode_points(&[]), "[]");
}

#[test]
fn encoded_form_uses_named_fields() {
    let encoded = encode_points(&[GeoPoint::new(1.5, -2.5)]);
    let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(value[0]["latitude"], 1.5);
    assert_eq!(value[0]["longitude"], -2.5);
}

#[test]
fn decode_garbage_yields_empty() {
    assert!(decode_points("not json").is_empty());
}

#[test]
fn decode_wrong_shape_yields_empty() {
    assert!(decode_points("{}").is_empty());
    assert!(decode_points("42").is_empty());
    assert!(decode_points("\"[]\"").is_empty());
}

#[test]
fn decode_empty_array() {
    assert!(decode_points("[]").is_empty());
}

#[test]
fn decode_missing_field_defaults_to_zero() {
    let points = decode_points(r#"[{"latitude": 33.58}]"#);
    assert_eq!(points, vec![GeoPoint::new(33.58, 0.0)]);

    let points = decode_points(r#"[{"longitude": -7.59}, {}]"#);
    assert_eq!(points, vec![GeoPoint::new(0.0, -7.59), GeoPoint::new(0.0, 0.0)]);
}

#[test]
fn decode_truncated_payload_yields_empty() {
    assert!(decode_points(r#"[{"latitude": 33.58, "longitude":"#).is_empty());
}
