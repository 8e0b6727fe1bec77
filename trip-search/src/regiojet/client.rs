//! RegioJet REST client.
//!
//! Location lookups run against the full location table, which is fetched
//! once per client on first use and shared by every later call.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::domain::{CountryCode, Location, Trip};
use crate::geocode::Geocoder;
use crate::provider::{CatalogGuard, Provider, ProviderError};

use super::catalog::RegiojetCatalog;
use super::convert::{PROVIDER_NAME, convert_routes};
use super::types::{CountryDto, RouteSearchResponse};

/// Default base URL for the RegioJet public API.
const DEFAULT_BASE_URL: &str = "https://brn-ybus-pubapi.sa.cz/restapi";

/// Configuration for the RegioJet client.
#[derive(Debug, Clone)]
pub struct RegiojetConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RegiojetConfig {
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

impl Default for RegiojetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// RegioJet provider.
pub struct RegiojetClient {
    http: reqwest::Client,
    base_url: String,
    geocoder: Arc<dyn Geocoder>,
    catalog: CatalogGuard<RegiojetCatalog>,
}

impl RegiojetClient {
    pub fn new(config: RegiojetConfig, geocoder: Arc<dyn Geocoder>) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            geocoder,
            catalog: CatalogGuard::new(),
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

    async fn catalog(&self) -> Result<Arc<RegiojetCatalog>, ProviderError> {
        self.catalog
            .get_or_init(PROVIDER_NAME, || async {
                let countries: Vec<CountryDto> = self.get_json("/consts/locations", &[]).await?;
                let catalog = RegiojetCatalog::new(countries);
                tracing::debug!(cities = catalog.len(), "loaded RegioJet location table");
                Ok(catalog)
            })
            .await
    }
}

#[async_trait]
impl Provider for RegiojetClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn resolve_by_name(&self, name: &str) -> Result<Option<Location>, ProviderError> {
        Ok(self.catalog().await?.find_by_name(name))
    }

    async fn list_by_country(&self, country: CountryCode) -> Result<Vec<Location>, ProviderError> {
        Ok(self.catalog().await?.in_country(country))
    }

    async fn list_within_radius(
        &self,
        origin_name: &str,
        radius_km: u32,
    ) -> Result<Vec<Location>, ProviderError> {
        let center = self.geocoder.geocode(origin_name).await?;
        let catalog = self.catalog().await?;
        Ok(catalog.within_radius(center, f64::from(radius_km)))
    }

    async fn search_trips(
        &self,
        origin: &Location,
        destination: &Location,
        date: NaiveDate,
    ) -> Result<Vec<Trip>, ProviderError> {
        tracing::debug!(from = %origin, to = %destination, %date, "searching RegioJet");

        let query = [
            ("tariffs", "REGULAR".to_string()),
            ("toLocationType", "CITY".to_string()),
            ("toLocationId", destination.id.clone()),
            ("fromLocationType", "CITY".to_string()),
            ("fromLocationId", origin.id.clone()),
            ("departureDate", date.format("%Y-%m-%d").to_string()),
            ("currency", "EUR".to_string()),
        ];
        let response: RouteSearchResponse = self.get_json("/routes/search/simple", &query).await?;

        Ok(convert_routes(&response, origin, destination, date))
    }
}
