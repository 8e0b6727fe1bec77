//! In-memory provider for testing without network access.
//!
//! Serves a fixed location catalog and canned trips, and records how it was
//! called so tests can assert on concurrency and call counts.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{CountryCode, Location, Trip};

use super::{Provider, ProviderError};

/// Mock provider backed by in-memory data.
pub struct MockProvider {
    name: String,
    catalog: Vec<Location>,
    trips: HashMap<(String, String), Vec<Trip>>,
    failing_routes: HashSet<(String, String)>,
    failing_names: HashSet<String>,
    search_delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    search_calls: AtomicUsize,
    lookup_calls: AtomicUsize,
    searched: Mutex<Vec<(String, String, NaiveDate)>>,
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            catalog: Vec::new(),
            trips: HashMap::new(),
            failing_routes: HashSet::new(),
            failing_names: HashSet::new(),
            search_delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            lookup_calls: AtomicUsize::new(0),
            searched: Mutex::new(Vec::new()),
        }
    }

    /// Add a location to the catalog.
    pub fn with_location(mut self, location: Location) -> Self {
        self.catalog.push(location);
        self
    }

    /// Add a trip served for `origin_id -> destination_id` (any date; the
    /// date filter applies at search time).
    pub fn with_trip(mut self, origin_id: &str, destination_id: &str, trip: Trip) -> Self {
        self.trips
            .entry((origin_id.to_string(), destination_id.to_string()))
            .or_default()
            .push(trip);
        self
    }

    /// Make searches on one route fail with an API error.
    pub fn with_failing_route(mut self, origin_id: &str, destination_id: &str) -> Self {
        self.failing_routes
            .insert((origin_id.to_string(), destination_id.to_string()));
        self
    }

    /// Make name lookups for `name` fail with an API error.
    pub fn with_failing_name(mut self, name: &str) -> Self {
        self.failing_names.insert(name.to_lowercase());
        self
    }

    /// Hold each search open for `delay`, so concurrent searches overlap.
    pub fn with_search_delay(mut self, delay: Duration) -> Self {
        self.search_delay = delay;
        self
    }

    /// Highest number of searches observed running at once.
    pub fn max_concurrent_searches(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Total number of `search_trips` calls.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Total number of `resolve_by_name` and `list_by_country` calls.
    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    /// Every `(origin id, destination id, date)` searched, in call order.
    pub fn searched(&self) -> Vec<(String, String, NaiveDate)> {
        self.searched
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    fn find_by_name(&self, name: &str) -> Option<&Location> {
        self.catalog
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name.trim()))
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn resolve_by_name(&self, name: &str) -> Result<Option<Location>, ProviderError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_names.contains(&name.trim().to_lowercase()) {
            return Err(ProviderError::Api {
                status: 500,
                message: format!("lookup of {name} failed"),
            });
        }
        Ok(self.find_by_name(name).cloned())
    }

    async fn list_by_country(&self, country: CountryCode) -> Result<Vec<Location>, ProviderError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .catalog
            .iter()
            .filter(|l| l.country.as_deref().is_some_and(|c| country.matches(c)))
            .cloned()
            .collect())
    }

    async fn list_within_radius(
        &self,
        origin_name: &str,
        radius_km: u32,
    ) -> Result<Vec<Location>, ProviderError> {
        let Some(center) = self.find_by_name(origin_name).and_then(|l| l.coordinates) else {
            return Ok(Vec::new());
        };

        Ok(self
            .catalog
            .iter()
            .filter(|l| {
                l.coordinates
                    .is_some_and(|c| center.within(&c, f64::from(radius_km)))
            })
            .cloned()
            .collect())
    }

    async fn search_trips(
        &self,
        origin: &Location,
        destination: &Location,
        date: NaiveDate,
    ) -> Result<Vec<Trip>, ProviderError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut searched) = self.searched.lock() {
            searched.push((origin.id.clone(), destination.id.clone(), date));
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.search_delay.is_zero() {
            tokio::time::sleep(self.search_delay).await;
        }

        let key = (origin.id.clone(), destination.id.clone());
        let result = if self.failing_routes.contains(&key) {
            Err(ProviderError::Api {
                status: 503,
                message: format!("{} -> {} unavailable", origin.name, destination.name),
            })
        } else {
            Ok(self
                .trips
                .get(&key)
                .map(|trips| {
                    trips
                        .iter()
                        .filter(|t| t.departs_on(date))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default())
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn trip(departure: &str) -> Trip {
        let departure = DateTime::parse_from_rfc3339(departure).unwrap();
        Trip {
            provider: "Mock".into(),
            departure,
            arrival: departure + chrono::Duration::hours(4),
            duration: "04h 00m".into(),
            price: 20.0,
            currency: "EUR".into(),
            origin_station: "Berlin".into(),
            destination_station: "Prague".into(),
            transfers: 0,
            vehicle_type: "BUS".into(),
        }
    }

    fn provider() -> MockProvider {
        MockProvider::new("Mock")
            .with_location(Location::new("1", "Berlin").with_country("DE"))
            .with_location(Location::new("2", "Prague").with_country("CZ"))
            .with_trip("1", "2", trip("2024-06-01T08:00:00+02:00"))
            .with_trip("1", "2", trip("2024-06-02T08:00:00+02:00"))
    }

    #[tokio::test]
    async fn resolves_names_case_insensitively() {
        let p = provider();
        let loc = p.resolve_by_name("berlin").await.unwrap().unwrap();
        assert_eq!(loc.id, "1");
        assert!(p.resolve_by_name("Paris").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn search_filters_by_date() {
        let p = provider();
        let berlin = Location::new("1", "Berlin");
        let prague = Location::new("2", "Prague");

        let trips = p.search_trips(&berlin, &prague, date(1)).await.unwrap();
        assert_eq!(trips.len(), 1);
        assert!(trips[0].departs_on(date(1)));

        let trips = p.search_trips(&berlin, &prague, date(3)).await.unwrap();
        assert!(trips.is_empty());
        assert_eq!(p.search_calls(), 2);
    }

    #[tokio::test]
    async fn failing_route_errors() {
        let p = provider().with_failing_route("1", "2");
        let result = p
            .search_trips(&Location::new("1", "Berlin"), &Location::new("2", "Prague"), date(1))
            .await;
        assert!(matches!(result, Err(ProviderError::Api { status: 503, .. })));
    }
}
