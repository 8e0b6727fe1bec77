//! In-memory RegioJet location catalog.

use std::collections::HashSet;

use crate::domain::{CountryCode, Coordinates, Location};

use super::types::{CityDto, CountryDto};

/// The full RegioJet location table, fetched once per process.
#[derive(Debug, Clone)]
pub struct RegiojetCatalog {
    countries: Vec<CountryDto>,
}

impl RegiojetCatalog {
    pub fn new(countries: Vec<CountryDto>) -> Self {
        Self { countries }
    }

    /// Total number of cities across all countries.
    pub fn len(&self) -> usize {
        self.countries.iter().map(|c| c.cities.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cities(&self) -> impl Iterator<Item = (&CountryDto, &CityDto)> {
        self.countries
            .iter()
            .flat_map(|country| country.cities.iter().map(move |city| (country, city)))
    }

    /// First city whose name or any alias matches, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<Location> {
        let needle = name.trim().to_lowercase();
        self.cities()
            .find(|(_, city)| {
                city.name.to_lowercase() == needle
                    || city.aliases.iter().any(|a| a.to_lowercase() == needle)
            })
            .map(|(country, city)| to_location(country, city))
    }

    /// Every city in the country, in catalog order.
    pub fn in_country(&self, code: CountryCode) -> Vec<Location> {
        self.countries
            .iter()
            .filter(|country| code.matches(&country.code))
            .flat_map(|country| country.cities.iter().map(move |city| to_location(country, city)))
            .collect()
    }

    /// Cities within `radius_km` of `center`.
    ///
    /// Cities without station coordinates are skipped. Cities sharing a name
    /// are reported once (first occurrence wins).
    pub fn within_radius(&self, center: Coordinates, radius_km: f64) -> Vec<Location> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for (country, city) in self.cities() {
            if !seen.insert(city.name.as_str()) {
                continue;
            }
            let location = to_location(country, city);
            if location
                .coordinates
                .is_some_and(|c| center.within(&c, radius_km))
            {
                found.push(location);
            }
        }

        found
    }
}

/// Map a city to a location, using its first station's position.
fn to_location(country: &CountryDto, city: &CityDto) -> Location {
    let mut location =
        Location::new(city.id.to_id_string(), city.name.clone()).with_country(country.code.clone());

    if let Some(station) = city.stations.first()
        && let (Some(lat), Some(lon)) = (station.latitude, station.longitude)
    {
        location = location.with_coordinates(lat, lon);
    }

    location
}
