//! Place search — free-text query to a single coordinate.
//!
//! DESIGN
//! ======
//! Two-step lookup against a places web service: autocomplete the query,
//! then fetch the top prediction's geometry. Thin HTTP wrappers with pure
//! parsing functions for testability.
//!
//! ERROR HANDLING
//! ==============
//! The [`SearchResolver`] contract collapses every failure layer (HTTP
//! error, non-200 status, parse failure, zero predictions, absent
//! geometry) into "not found". Callers never see which layer failed;
//! details go to the log.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use std::time::Duration;

use crate::geo::GeoPoint;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const CONNECT_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// CONTRACT
// =============================================================================

/// Async text → coordinate lookup the state store depends on.
///
/// A blank or whitespace-only query resolves to `None` without invoking
/// the external service.
#[async_trait::async_trait]
pub trait SearchResolver: Send + Sync {
    async fn resolve(&self, query: &str) -> Option<GeoPoint>;
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("failed to build HTTP client: {0}")]
    HttpClientBuild(String),
    #[error("places API key missing (set {var})")]
    MissingApiKey { var: String },
    #[error("places request failed: {0}")]
    ApiRequest(String),
    #[error("places API returned status {status}: {body}")]
    ApiResponse { status: u16, body: String },
    #[error("failed to parse places response: {0}")]
    ApiParse(String),
}

/// HTTP client for the places web service.
pub struct PlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PlacesClient {
    /// Build a client with the default service base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(api_key: String) -> Result<Self, SearchError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Build a client against a custom base URL (test servers,
    /// compatible proxies).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| SearchError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string(), api_key })
    }

    /// Build a client from environment variables.
    ///
    /// - `PLACES_API_KEY`: required service key
    /// - `PLACES_BASE_URL`: optional override of the service base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or the HTTP client fails
    /// to build.
    pub fn from_env() -> Result<Self, SearchError> {
        let api_key = std::env::var("PLACES_API_KEY")
            .map_err(|_| SearchError::MissingApiKey { var: "PLACES_API_KEY".into() })?;
        match std::env::var("PLACES_BASE_URL") {
            Ok(base) => Self::with_base_url(api_key, base),
            Err(_) => Self::new(api_key),
        }
    }

    async fn lookup(&self, query: &str) -> Result<Option<GeoPoint>, SearchError> {
        let predictions = self.autocomplete(query).await?;
        let Some(place_id) = predictions.into_iter().next() else {
            return Ok(None);
        };
        self.place_location(&place_id).await
    }

    async fn autocomplete(&self, query: &str) -> Result<Vec<String>, SearchError> {
        let url = format!("{}/autocomplete/json", self.base_url);
        let text = self.get(&url, &[("input", query)]).await?;
        parse_predictions(&text)
    }

    async fn place_location(&self, place_id: &str) -> Result<Option<GeoPoint>, SearchError> {
        let url = format!("{}/details/json", self.base_url);
        let text = self.get(&url, &[("place_id", place_id), ("fields", "geometry")]).await?;
        parse_place_location(&text)
    }

    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<String, SearchError> {
        let response = self
            .http
            .get(url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| SearchError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| SearchError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(SearchError::ApiResponse { status, body: text });
        }

        Ok(text)
    }
}

#[async_trait::async_trait]
impl SearchResolver for PlacesClient {
    async fn resolve(&self, query: &str) -> Option<GeoPoint> {
        if query.trim().is_empty() {
            return None;
        }
        match self.lookup(query).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(error = %e, "place search failed");
                None
            }
        }
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Deserialize)]
struct PredictionsResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(serde::Deserialize)]
struct Prediction {
    place_id: String,
}

#[derive(serde::Deserialize)]
struct DetailsResponse {
    result: Option<PlaceResult>,
}

#[derive(serde::Deserialize)]
struct PlaceResult {
    geometry: Option<Geometry>,
}

#[derive(serde::Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(serde::Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_predictions(json: &str) -> Result<Vec<String>, SearchError> {
    let response: PredictionsResponse =
        serde_json::from_str(json).map_err(|e| SearchError::ApiParse(e.to_string()))?;
    Ok(response.predictions.into_iter().map(|p| p.place_id).collect())
}

fn parse_place_location(json: &str) -> Result<Option<GeoPoint>, SearchError> {
    let response: DetailsResponse =
        serde_json::from_str(json).map_err(|e| SearchError::ApiParse(e.to_string()))?;
    Ok(response
        .result
        .and_then(|r| r.geometry)
        .map(|g| GeoPoint::new(g.location.lat, g.location.lng)))
}
