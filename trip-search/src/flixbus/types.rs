//! Flixbus API response DTOs.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::BoundingBox;

/// Ids appear both as strings and as numbers depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum IdDto {
    Number(u64),
    Text(String),
}

impl IdDto {
    pub fn to_id_string(&self) -> String {
        match self {
            IdDto::Number(n) => n.to_string(),
            IdDto::Text(s) => s.clone(),
        }
    }
}

/// One autocomplete hit.
#[derive(Debug, Clone, Deserialize)]
pub struct AutocompleteCity {
    pub id: IdDto,
    pub name: String,
}

/// The autocomplete endpoint answers with either a bare array or an
/// `{"items": [...]}` wrapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AutocompleteResponse {
    List(Vec<AutocompleteCity>),
    Wrapped { items: Vec<AutocompleteCity> },
}

impl AutocompleteResponse {
    pub fn into_cities(self) -> Vec<AutocompleteCity> {
        match self {
            AutocompleteResponse::List(cities) => cities,
            AutocompleteResponse::Wrapped { items } => items,
        }
    }
}

/// Response from `/cms/cities`.
#[derive(Debug, Clone, Deserialize)]
pub struct CmsCitiesResponse {
    pub result: Vec<CmsCity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CmsCity {
    pub uuid: String,
    pub name: String,
    /// Lowercase ISO code, e.g. "de".
    pub country: String,
    #[serde(default)]
    pub location: Option<CmsPoint>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct CmsPoint {
    pub lat: f64,
    pub lon: f64,
}

/// The `geo_bounding_box` query parameter, serialized as JSON.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct BoundingBoxParam {
    pub top_left: CmsPoint,
    pub bottom_right: CmsPoint,
}

impl From<BoundingBox> for BoundingBoxParam {
    fn from(bbox: BoundingBox) -> Self {
        Self {
            top_left: CmsPoint {
                lat: bbox.top_left.latitude,
                lon: bbox.top_left.longitude,
            },
            bottom_right: CmsPoint {
                lat: bbox.bottom_right.latitude,
                lon: bbox.bottom_right.longitude,
            },
        }
    }
}

/// Response from `/search/service/v4/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub trips: Vec<TripGroup>,
    #[serde(default)]
    pub stations: HashMap<String, StationDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripGroup {
    /// Keyed by an opaque ride uid.
    #[serde(default)]
    pub results: BTreeMap<String, RideDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationDto {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RideDto {
    pub price: PriceDto,
    pub duration: DurationDto,
    pub departure: EndpointDto,
    pub arrival: EndpointDto,
    #[serde(default)]
    pub transfer_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceDto {
    pub total: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DurationDto {
    pub hours: i64,
    pub minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointDto {
    /// RFC 3339
    pub date: String,
    pub station_id: IdDto,
}
