//! Provider-scoped locations.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geo::Coordinates;

/// A searchable place in one provider's namespace.
///
/// The `id` is opaque and only meaningful to the provider that produced it.
/// Two locations from different providers are never comparable by id, which
/// is why deduplication goes through [`LocationKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Provider-scoped identifier, used verbatim in trip search calls.
    pub id: String,

    /// Human-readable city or station name.
    pub name: String,

    /// Country code or name as reported by the provider, if any.
    pub country: Option<String>,

    /// Position, present only when the provider's data includes it.
    pub coordinates: Option<Coordinates>,
}

impl Location {
    /// Create a location without country or coordinates.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: None,
            coordinates: None,
        }
    }

    /// Attach a country.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Attach coordinates.
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Coordinates::new(latitude, longitude));
        self
    }

    /// Identity of this location within the given provider.
    pub fn key(&self, provider: &str) -> LocationKey {
        LocationKey {
            provider: provider.to_string(),
            id: self.id.clone(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Deduplication identity: `(provider, location id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationKey {
    pub provider: String,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_optional_fields() {
        let loc = Location::new("10", "Prague")
            .with_country("CZ")
            .with_coordinates(50.08, 14.43);

        assert_eq!(loc.id, "10");
        assert_eq!(loc.country.as_deref(), Some("CZ"));
        assert_eq!(loc.coordinates, Some(Coordinates::new(50.08, 14.43)));
    }

    #[test]
    fn keys_differ_across_providers() {
        let loc = Location::new("10", "Prague");
        assert_ne!(loc.key("Flixbus"), loc.key("Regiojet"));
        assert_eq!(loc.key("Flixbus"), loc.key("Flixbus"));
    }

    #[test]
    fn display() {
        let loc = Location::new("10", "Prague");
        assert_eq!(loc.to_string(), "Prague (10)");
    }
}
