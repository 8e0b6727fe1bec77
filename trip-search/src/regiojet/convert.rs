//! Conversion from RegioJet route DTOs to domain trips.

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::domain::{Location, Trip, duration_between, format_duration};

use super::types::{RouteDto, RouteSearchResponse};

/// Timestamp layout RegioJet uses, e.g. `2024-06-01T08:15:00.000+02:00`.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

pub(crate) const PROVIDER_NAME: &str = "Regiojet";

fn parse_time(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
}

/// Normalize `"02:35 h"` (possibly with NBSP) to `"02h 35m"`.
///
/// Anything that isn't `H:M` is returned as given.
pub fn normalize_travel_time(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != 'h')
        .collect();

    let parsed = cleaned
        .split_once(':')
        .and_then(|(h, m)| Some((h.parse::<i64>().ok()?, m.parse::<i64>().ok()?)));

    match parsed {
        Some((hours, minutes)) => format_duration(hours, minutes),
        None => raw.trim().to_string(),
    }
}

fn convert_route(
    route: &RouteDto,
    origin: &Location,
    destination: &Location,
    date: NaiveDate,
) -> Option<Trip> {
    let Some(departure) = parse_time(&route.departure_time) else {
        tracing::debug!(value = %route.departure_time, "skipping route with bad departure time");
        return None;
    };
    if departure.date_naive() != date {
        return None;
    }
    let Some(arrival) = parse_time(&route.arrival_time) else {
        tracing::debug!(value = %route.arrival_time, "skipping route with bad arrival time");
        return None;
    };

    let duration = match &route.travel_time {
        Some(raw) => normalize_travel_time(raw),
        None => duration_between(departure, arrival),
    };

    Some(Trip {
        provider: PROVIDER_NAME.to_string(),
        departure,
        arrival,
        duration,
        price: route.price_from,
        currency: "EUR".to_string(),
        origin_station: origin.name.clone(),
        destination_station: destination.name.clone(),
        transfers: route.transfers_count,
        vehicle_type: route.vehicle_types.join(", "),
    })
}

/// Convert a search response, keeping only routes departing on `date`.
pub fn convert_routes(
    response: &RouteSearchResponse,
    origin: &Location,
    destination: &Location,
    date: NaiveDate,
) -> Vec<Trip> {
    response
        .routes
        .iter()
        .filter_map(|route| convert_route(route, origin, destination, date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(departure: &str, arrival: &str, travel_time: Option<&str>) -> RouteDto {
        RouteDto {
            departure_time: departure.to_string(),
            arrival_time: arrival.to_string(),
            travel_time: travel_time.map(str::to_string),
            price_from: 12.5,
            transfers_count: 0,
            vehicle_types: vec!["TRAIN".to_string()],
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn travel_time_formats() {
        assert_eq!(normalize_travel_time("02:35 h"), "02h 35m");
        assert_eq!(normalize_travel_time("2:05\u{a0}h"), "02h 05m");
        assert_eq!(normalize_travel_time("12:00"), "12h 00m");
        assert_eq!(normalize_travel_time("about two hours"), "about two hours");
        assert_eq!(normalize_travel_time("1 day"), "1 day");
    }

    #[test]
    fn converts_route() {
        let response = RouteSearchResponse {
            routes: vec![RouteDto {
                transfers_count: 1,
                vehicle_types: vec!["BUS".into(), "TRAIN".into()],
                ..route(
                    "2024-06-01T08:15:00.000+02:00",
                    "2024-06-01T10:50:00.000+02:00",
                    Some("02:35 h"),
                )
            }],
        };
        let trips = convert_routes(
            &response,
            &Location::new("1", "Prague"),
            &Location::new("2", "Brno"),
            date(1),
        );

        assert_eq!(trips.len(), 1);
        let trip = &trips[0];
        assert_eq!(trip.provider, "Regiojet");
        assert_eq!(trip.duration, "02h 35m");
        assert_eq!(trip.origin_station, "Prague");
        assert_eq!(trip.destination_station, "Brno");
        assert_eq!(trip.transfers, 1);
        assert_eq!(trip.vehicle_type, "BUS, TRAIN");
        assert_eq!(trip.currency, "EUR");
    }

    #[test]
    fn drops_other_dates_and_bad_times() {
        let response = RouteSearchResponse {
            routes: vec![
                route("2024-06-01T23:30:00.000+02:00", "2024-06-02T02:00:00.000+02:00", None),
                route("2024-06-02T00:10:00.000+02:00", "2024-06-02T03:00:00.000+02:00", None),
                route("yesterday", "2024-06-01T03:00:00.000+02:00", None),
                route("2024-06-01T05:00:00.000+02:00", "later", None),
            ],
        };
        let trips = convert_routes(
            &response,
            &Location::new("1", "Prague"),
            &Location::new("2", "Brno"),
            date(1),
        );

        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].departure.to_rfc3339(), "2024-06-01T23:30:00+02:00");
        // No travelTime, so derived from the timestamps
        assert_eq!(trips[0].duration, "02h 30m");
    }

    #[test]
    fn accepts_plain_rfc3339() {
        let response = RouteSearchResponse {
            routes: vec![route("2024-06-01T08:00:00+02:00", "2024-06-01T09:00:00+02:00", None)],
        };
        let trips = convert_routes(
            &response,
            &Location::new("1", "A"),
            &Location::new("2", "B"),
            date(1),
        );
        assert_eq!(trips.len(), 1);
    }
}
