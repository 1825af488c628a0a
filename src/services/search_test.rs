#![allow(clippy::float_cmp)]

use super::*;

fn test_client() -> PlacesClient {
    PlacesClient::new("test-key".into()).expect("client should build")
}

// --- parse_predictions ---

#[test]
fn parse_predictions_extracts_place_ids() {
    let json = r#"{
        "predictions": [
            {"place_id": "ChIJ123", "description": "Casablanca, Morocco"},
            {"place_id": "ChIJ456", "description": "Casablanca, Chile"}
        ],
        "status": "OK"
    }"#;
    let ids = parse_predictions(json).unwrap();
    assert_eq!(ids, vec!["ChIJ123".to_string(), "ChIJ456".to_string()]);
}

#[test]
fn parse_predictions_empty_list() {
    let json = r#"{"predictions": [], "status": "ZERO_RESULTS"}"#;
    assert!(parse_predictions(json).unwrap().is_empty());
}

#[test]
fn parse_predictions_missing_field_defaults_empty() {
    assert!(parse_predictions(r#"{"status": "OK"}"#).unwrap().is_empty());
}

#[test]
fn parse_predictions_malformed_is_error() {
    assert!(matches!(parse_predictions("nope"), Err(SearchError::ApiParse(_))));
}

// --- parse_place_location ---

#[test]
fn parse_place_location_extracts_coordinates() {
    let json = r#"{
        "result": {"geometry": {"location": {"lat": 33.5731, "lng": -7.5898}}},
        "status": "OK"
    }"#;
    let point = parse_place_location(json).unwrap().unwrap();
    assert_eq!(point, GeoPoint::new(33.5731, -7.5898));
}

#[test]
fn parse_place_location_without_result() {
    let json = r#"{"status": "NOT_FOUND"}"#;
    assert_eq!(parse_place_location(json).unwrap(), None);
}

#[test]
fn parse_place_location_without_geometry() {
    let json = r#"{"result": {"name": "Somewhere"}, "status": "OK"}"#;
    assert_eq!(parse_place_location(json).unwrap(), None);
}

#[test]
fn parse_place_location_malformed_is_error() {
    assert!(matches!(parse_place_location("[]"), Err(SearchError::ApiParse(_))));
}

// --- resolve ---

#[tokio::test]
async fn blank_query_short_circuits() {
    // No server behind the client; a blank query must return before any
    // request is attempted.
    let client = test_client();
    assert_eq!(client.resolve("").await, None);
    assert_eq!(client.resolve("   ").await, None);
    assert_eq!(client.resolve("\t\n").await, None);
}

#[tokio::test]
async fn unreachable_service_resolves_to_none() {
    let client = PlacesClient::with_base_url("test-key".into(), "http://127.0.0.1:1/place".into())
        .expect("client should build");
    assert_eq!(client.resolve("casablanca").await, None);
}

// --- construction ---

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let client = PlacesClient::with_base_url("k".into(), "http://example.test/api/".into()).unwrap();
    assert_eq!(client.base_url, "http://example.test/api");
}
