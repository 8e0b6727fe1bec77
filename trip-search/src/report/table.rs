//! Plain-text trip table for the console.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset};

use crate::domain::Trip;

fn short_time(t: &DateTime<FixedOffset>) -> String {
    t.format("%d.%m %H:%M").to_string()
}

/// Render trips as an aligned table with a header line.
pub fn render_table(trips: &[Trip]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "--- Found {} trips ---", trips.len());
    let _ = writeln!(
        out,
        "{:<10} | {:<16} | {:<16} | {:<6} | {:<8} | Origin -> Dest",
        "Provider", "Dep", "Arr", "Price", "Dur"
    );

    for trip in trips {
        let _ = writeln!(
            out,
            "{:<10} | {:<16} | {:<16} | {:5.2}{} | {:<8} | {} -> {}",
            trip.provider,
            short_time(&trip.departure),
            short_time(&trip.arrival),
            trip.price,
            trip.currency,
            trip.duration,
            trip.origin_station,
            trip.destination_station,
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_rows() {
        let departure = DateTime::parse_from_rfc3339("2024-06-01T08:05:00+02:00").unwrap();
        let trip = Trip {
            provider: "Flixbus".into(),
            departure,
            arrival: departure + chrono::Duration::minutes(275),
            duration: "04h 35m".into(),
            price: 19.9,
            currency: "EUR".into(),
            origin_station: "Berlin ZOB".into(),
            destination_station: "Praha Florenc".into(),
            transfers: 0,
            vehicle_type: "BUS".into(),
        };

        let table = render_table(&[trip]);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines[0], "--- Found 1 trips ---");
        assert!(lines[1].starts_with("Provider   | Dep"));
        assert_eq!(
            lines[2],
            "Flixbus    | 01.06 08:05      | 01.06 12:40      | 19.90EUR | 04h 35m  | Berlin ZOB -> Praha Florenc"
        );
    }

    #[test]
    fn empty_table_has_header_only() {
        assert_eq!(render_table(&[]).lines().count(), 2);
    }
}
