//! Conversion from Flixbus DTOs to domain types.

use chrono::{DateTime, NaiveDate};

use crate::domain::{CountryCode, Coordinates, Location, Trip, format_duration};

use super::types::{AutocompleteCity, CmsCity, IdDto, RideDto, SearchResponse};

pub(crate) const PROVIDER_NAME: &str = "Flixbus";

const UNKNOWN_STATION: &str = "Unknown";

pub fn autocomplete_to_location(city: &AutocompleteCity) -> Location {
    Location::new(city.id.to_id_string(), city.name.clone())
}

pub fn cms_city_to_location(city: &CmsCity) -> Location {
    let location =
        Location::new(city.uuid.clone(), city.name.clone()).with_country(city.country.clone());
    match city.location {
        Some(point) => location.with_coordinates(point.lat, point.lon),
        None => location,
    }
}

/// Keep only cities reported as belonging to `country`.
pub fn cities_in_country(cities: &[CmsCity], country: CountryCode) -> Vec<Location> {
    cities
        .iter()
        .filter(|c| country.matches(&c.country))
        .map(cms_city_to_location)
        .collect()
}

/// Keep cities within `radius_km` of `center`.
///
/// Cities without coordinates are kept: the bounding box already bounds them.
pub fn cities_within(cities: &[CmsCity], center: Coordinates, radius_km: f64) -> Vec<Location> {
    cities
        .iter()
        .map(cms_city_to_location)
        .filter(|l| l.coordinates.is_none_or(|c| center.within(&c, radius_km)))
        .collect()
}

fn station_name(response: &SearchResponse, id: &IdDto) -> String {
    response
        .stations
        .get(&id.to_id_string())
        .map(|s| s.name.clone())
        .unwrap_or_else(|| UNKNOWN_STATION.to_string())
}

fn convert_ride(response: &SearchResponse, ride: &RideDto, date: NaiveDate) -> Option<Trip> {
    let departure = match DateTime::parse_from_rfc3339(&ride.departure.date) {
        Ok(t) => t,
        Err(e) => {
            tracing::debug!(value = %ride.departure.date, error = %e, "bad departure time");
            return None;
        }
    };
    if departure.date_naive() != date {
        return None;
    }
    let arrival = match DateTime::parse_from_rfc3339(&ride.arrival.date) {
        Ok(t) => t,
        Err(e) => {
            tracing::debug!(value = %ride.arrival.date, error = %e, "bad arrival time");
            return None;
        }
    };

    Some(Trip {
        provider: PROVIDER_NAME.to_string(),
        departure,
        arrival,
        duration: format_duration(ride.duration.hours, ride.duration.minutes),
        price: ride.price.total,
        currency: ride
            .price
            .currency
            .clone()
            .unwrap_or_else(|| "EUR".to_string()),
        origin_station: station_name(response, &ride.departure.station_id),
        destination_station: station_name(response, &ride.arrival.station_id),
        transfers: if ride.transfer_type == "Direct" { 0 } else { 1 },
        vehicle_type: "BUS".to_string(),
    })
}

/// Convert the first trip group of a search response, keeping only rides
/// departing on `date`.
pub fn convert_search(response: &SearchResponse, date: NaiveDate) -> Vec<Trip> {
    let Some(group) = response.trips.first() else {
        return Vec::new();
    };

    group
        .results
        .values()
        .filter_map(|ride| convert_ride(response, ride, date))
        .collect()
}
