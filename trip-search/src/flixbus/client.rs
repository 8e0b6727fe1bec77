//! Flixbus global API client.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::domain::{BoundingBox, CountryCode, Location, Trip};
use crate::geocode::Geocoder;
use crate::provider::{Provider, ProviderError};

use super::convert::{
    PROVIDER_NAME, autocomplete_to_location, cities_in_country, cities_within, convert_search,
};
use super::types::{
    AutocompleteResponse, BoundingBoxParam, CmsCitiesResponse, CmsCity, SearchResponse,
};

/// Default base URL for the Flixbus global API.
const DEFAULT_BASE_URL: &str = "https://global.api.flixbus.com";

/// Upper bound on cities returned for one bounding box.
const CITY_LIMIT: &str = "5000";

/// Configuration for the Flixbus client.
#[derive(Debug, Clone)]
pub struct FlixbusConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FlixbusConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
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

impl Default for FlixbusConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Flixbus provider.
///
/// Has no bulk catalog; every lookup is a live API call.
pub struct FlixbusClient {
    http: reqwest::Client,
    base_url: String,
    geocoder: Arc<dyn Geocoder>,
}

impl FlixbusClient {
    pub fn new(config: FlixbusConfig, geocoder: Arc<dyn Geocoder>) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            geocoder,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ProviderError::json(e, &body))
    }

    /// All cities inside a bounding box.
    pub async fn cities_in_box(&self, bbox: BoundingBox) -> Result<Vec<CmsCity>, ProviderError> {
        let bbox_json = serde_json::to_string(&BoundingBoxParam::from(bbox))
            .map_err(|e| ProviderError::json(e, ""))?;
        tracing::debug!(bbox = %bbox_json, "fetching Flixbus cities in box");

        let query = [
            ("language", "en".to_string()),
            ("limit", CITY_LIMIT.to_string()),
            ("geo_bounding_box", bbox_json),
        ];
        let response: CmsCitiesResponse = self.get_json("/cms/cities", &query).await?;
        Ok(response.result)
    }
}

#[async_trait]
impl Provider for FlixbusClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn resolve_by_name(&self, name: &str) -> Result<Option<Location>, ProviderError> {
        tracing::debug!(name, "Flixbus autocomplete");
        let query = [
            ("q", name.to_string()),
            ("lang", "en".to_string()),
            ("country", "en".to_string()),
            ("flixbus_cities_only", "true".to_string()),
            ("stations", "true".to_string()),
        ];
        let response: AutocompleteResponse =
            self.get_json("/search/autocomplete/cities", &query).await?;

        Ok(response
            .into_cities()
            .first()
            .map(autocomplete_to_location))
    }

    async fn list_by_country(&self, country: CountryCode) -> Result<Vec<Location>, ProviderError> {
        let bbox = country
            .bounding_box()
            .ok_or(ProviderError::UnsupportedCountry(country))?;
        let cities = self.cities_in_box(bbox).await?;
        Ok(cities_in_country(&cities, country))
    }

    async fn list_within_radius(
        &self,
        origin_name: &str,
        radius_km: u32,
    ) -> Result<Vec<Location>, ProviderError> {
        let center = self.geocoder.geocode(origin_name).await?;
        let radius = f64::from(radius_km);
        let cities = self.cities_in_box(BoundingBox::around(center, radius)).await?;
        Ok(cities_within(&cities, center, radius))
    }

    async fn search_trips(
        &self,
        origin: &Location,
        destination: &Location,
        date: NaiveDate,
    ) -> Result<Vec<Trip>, ProviderError> {
        tracing::debug!(from = %origin, to = %destination, %date, "searching Flixbus");

        let query = [
            ("from_city_id", origin.id.clone()),
            ("to_city_id", destination.id.clone()),
            ("departure_date", date.format("%d.%m.%Y").to_string()),
            ("products", r#"{"adult":1}"#.to_string()),
            ("currency", "EUR".to_string()),
            ("locale", "en".to_string()),
            ("search_by", "cities".to_string()),
            ("include_after_midnight_rides", "1".to_string()),
        ];
        let response: SearchResponse = self.get_json("/search/service/v4/search", &query).await?;

        Ok(convert_search(&response, date))
    }
}
