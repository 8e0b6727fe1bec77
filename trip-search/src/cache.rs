//! Per-run memoization of provider location lookups.
//!
//! A multi-origin search asks the same provider for the same destination
//! names (or countries) once per origin. Lookups are cached for the lifetime
//! of the wrapper; trip searches are always passed through.
//!
//! Failed lookups are not cached.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use moka::future::Cache as MokaCache;

use crate::domain::{CountryCode, Location, Trip};
use crate::provider::{Provider, ProviderError};

/// Configuration for the lookup cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per lookup kind.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15 * 60),
            max_capacity: 1000,
        }
    }
}

/// Provider wrapper that memoizes name and country lookups.
pub struct CachedProvider<P> {
    inner: P,
    names: MokaCache<String, Option<Location>>,
    countries: MokaCache<CountryCode, Vec<Location>>,
}

impl<P: Provider> CachedProvider<P> {
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let names = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let countries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            inner,
            names,
            countries,
        }
    }

    #[cfg(test)]
    fn inner(&self) -> &P {
        &self.inner
    }

    #[cfg(test)]
    fn invalidate_all(&self) {
        self.names.invalidate_all();
        self.countries.invalidate_all();
    }
}

#[async_trait]
impl<P: Provider> Provider for CachedProvider<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn resolve_by_name(&self, name: &str) -> Result<Option<Location>, ProviderError> {
        let key = name.trim().to_lowercase();
        if let Some(cached) = self.names.get(&key).await {
            return Ok(cached);
        }

        let found = self.inner.resolve_by_name(name).await?;
        self.names.insert(key, found.clone()).await;
        Ok(found)
    }

    async fn list_by_country(&self, country: CountryCode) -> Result<Vec<Location>, ProviderError> {
        if let Some(cached) = self.countries.get(&country).await {
            return Ok(cached);
        }

        let found = self.inner.list_by_country(country).await?;
        self.countries.insert(country, found.clone()).await;
        Ok(found)
    }

    async fn list_within_radius(
        &self,
        origin_name: &str,
        radius_km: u32,
    ) -> Result<Vec<Location>, ProviderError> {
        self.inner.list_within_radius(origin_name, radius_km).await
    }

    async fn search_trips(
        &self,
        origin: &Location,
        destination: &Location,
        date: NaiveDate,
    ) -> Result<Vec<Trip>, ProviderError> {
        self.inner.search_trips(origin, destination, date).await
    }
}
