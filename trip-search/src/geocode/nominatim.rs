//! OpenStreetMap Nominatim geocoding client.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

use crate::domain::Coordinates;

use super::Geocoder;
use super::error::GeocodeError;

/// Default base URL for Nominatim.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy requires an identifying user agent.
const DEFAULT_USER_AGENT: &str = "TripSearchCLI/1.0";

/// One search hit. Nominatim encodes coordinates as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
}

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Value of the User-Agent header
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NominatimConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 5,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Geocoder backed by Nominatim's free-text search.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent).map_err(|_| GeocodeError::Api {
            status: 0,
            message: "Invalid user agent".to_string(),
        })?;
        headers.insert(USER_AGENT, agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn geocode(&self, place: &str) -> Result<Coordinates, GeocodeError> {
        tracing::debug!(place, "fetching coordinates");
        let url = format!("{}/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        best_match(place, &places)
    }
}

/// Take the first hit and parse its coordinates.
fn best_match(place: &str, places: &[NominatimPlace]) -> Result<Coordinates, GeocodeError> {
    let first = places
        .first()
        .ok_or_else(|| GeocodeError::NotFound(place.to_string()))?;

    let parse = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| GeocodeError::InvalidCoordinate {
                place: place.to_string(),
                value: value.to_string(),
            })
    };

    Ok(Coordinates::new(parse(&first.lat)?, parse(&first.lon)?))
}
