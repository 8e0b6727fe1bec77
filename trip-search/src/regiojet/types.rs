//! RegioJet API response DTOs.
//!
//! These map the parts of the public RegioJet REST API we use. Fields we
//! rely on are required, so a schema change shows up as a parse error rather
//! than as silently empty data.

use serde::{Deserialize, Serialize};

/// Location ids are numeric in practice but we accept strings too.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LocationIdDto {
    Number(u64),
    Text(String),
}

impl LocationIdDto {
    pub fn to_id_string(&self) -> String {
        match self {
            LocationIdDto::Number(n) => n.to_string(),
            LocationIdDto::Text(s) => s.clone(),
        }
    }
}

/// One country entry from `/consts/locations`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDto {
    /// ISO country code, e.g. "CZ".
    pub code: String,

    /// Country display name.
    #[serde(default)]
    pub country: Option<String>,

    pub cities: Vec<CityDto>,
}

/// A city and its stations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDto {
    pub id: LocationIdDto,
    pub name: String,

    /// Alternative spellings, e.g. "Praha" for Prague.
    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(default)]
    pub stations: Vec<StationDto>,
}

/// A station; only its position matters to us.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Response from `/routes/search/simple`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSearchResponse {
    #[serde(default)]
    pub routes: Vec<RouteDto>,
}

/// One itinerary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    /// e.g. "2024-06-01T08:15:00.000+02:00"
    pub departure_time: String,
    pub arrival_time: String,

    /// e.g. "02:35 h", sometimes with a non-breaking space.
    #[serde(default)]
    pub travel_time: Option<String>,

    pub price_from: f64,

    #[serde(default)]
    pub transfers_count: u32,

    #[serde(default)]
    pub vehicle_types: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_catalog() {
        let json = r#"[
            {
                "country": "Czech Republic",
                "code": "CZ",
                "cities": [
                    {
                        "id": 10202003,
                        "name": "Prague",
                        "aliases": ["Praha", "Prag"],
                        "stations": [{"id": 1, "latitude": 50.08, "longitude": 14.43}]
                    },
                    {"id": "10202002", "name": "Brno"}
                ]
            }
        ]"#;

        let catalog: Vec<CountryDto> = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        let cities = &catalog[0].cities;
        assert_eq!(cities[0].id.to_id_string(), "10202003");
        assert_eq!(cities[0].aliases, vec!["Praha", "Prag"]);
        assert_eq!(cities[0].stations[0].latitude, Some(50.08));
        assert_eq!(cities[1].id.to_id_string(), "10202002");
        assert!(cities[1].stations.is_empty());
    }

    #[test]
    fn wrong_field_type_is_an_error() {
        // name must be a string
        let json = r#"[{"code": "CZ", "cities": [{"id": 1, "name": 5}]}]"#;
        assert!(serde_json::from_str::<Vec<CountryDto>>(json).is_err());
    }

    #[test]
    fn missing_cities_is_an_error() {
        let json = r#"[{"code": "CZ"}]"#;
        assert!(serde_json::from_str::<Vec<CountryDto>>(json).is_err());
    }

    #[test]
    fn parse_routes() {
        let json = r#"{
            "routes": [{
                "departureTime": "2024-06-01T08:15:00.000+02:00",
                "arrivalTime": "2024-06-01T12:50:00.000+02:00",
                "travelTime": "04:35 h",
                "priceFrom": 14.9,
                "transfersCount": 1,
                "vehicleTypes": ["BUS", "TRAIN"]
            }]
        }"#;

        let response: RouteSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.routes.len(), 1);
        assert_eq!(response.routes[0].transfers_count, 1);
        assert_eq!(response.routes[0].vehicle_types, vec!["BUS", "TRAIN"]);
    }

    #[test]
    fn parse_empty_routes() {
        let response: RouteSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.routes.is_empty());
    }
}
