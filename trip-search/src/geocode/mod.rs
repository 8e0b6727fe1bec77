//! Place-name geocoding for radius searches.
//!
//! Radius-mode destination discovery needs the origin as a point. Providers
//! take a [`Geocoder`] so tests can substitute a fixed table for the network.

mod error;
mod nominatim;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::Coordinates;

pub use error::GeocodeError;
pub use nominatim::{NominatimClient, NominatimConfig};

/// Resolves a free-text place name to a single best-match point.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, place: &str) -> Result<Coordinates, GeocodeError>;
}

/// Geocoder backed by a fixed, case-insensitive name table.
#[derive(Debug, Clone, Default)]
pub struct FixedGeocoder {
    places: HashMap<String, Coordinates>,
}

impl FixedGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a place.
    pub fn with_place(mut self, name: &str, latitude: f64, longitude: f64) -> Self {
        self.places
            .insert(name.to_lowercase(), Coordinates::new(latitude, longitude));
        self
    }
}

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn geocode(&self, place: &str) -> Result<Coordinates, GeocodeError> {
        self.places
            .get(&place.trim().to_lowercase())
            .copied()
            .ok_or_else(|| GeocodeError::NotFound(place.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_geocoder_lookup() {
        let geocoder = FixedGeocoder::new().with_place("Vienna", 48.2, 16.37);

        let coords = geocoder.geocode("vienna").await.unwrap();
        assert_eq!(coords, Coordinates::new(48.2, 16.37));

        let missing = geocoder.geocode("Graz").await;
        assert!(matches!(missing, Err(GeocodeError::NotFound(_))));
    }
}
