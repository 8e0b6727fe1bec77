//! CSV serialization of trips.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::SecondsFormat;
use serde::Serialize;

use crate::domain::Trip;

use super::error::ReportError;

/// One CSV row; field names become the header.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TripRow<'a> {
    provider: &'a str,
    departure: String,
    arrival: String,
    price: String,
    currency: &'a str,
    duration: &'a str,
    origin: &'a str,
    destination: &'a str,
    transfers: u32,
    vehicle: &'a str,
}

impl<'a> From<&'a Trip> for TripRow<'a> {
    fn from(trip: &'a Trip) -> Self {
        Self {
            provider: &trip.provider,
            departure: trip.departure.to_rfc3339_opts(SecondsFormat::Secs, false),
            arrival: trip.arrival.to_rfc3339_opts(SecondsFormat::Secs, false),
            price: format!("{:.2}", trip.price),
            currency: &trip.currency,
            duration: &trip.duration,
            origin: &trip.origin_station,
            destination: &trip.destination_station,
            transfers: trip.transfers,
            vehicle: &trip.vehicle_type,
        }
    }
}

/// Write trips as CSV with a header row.
pub fn write_csv<W: Write>(writer: W, trips: &[Trip]) -> Result<(), ReportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for trip in trips {
        csv.serialize(TripRow::from(trip))?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write trips to `path`, creating parent directories.
pub fn save_csv(path: &Path, trips: &[Trip]) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ReportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(file, trips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn trip(price: f64, destination: &str) -> Trip {
        let departure = DateTime::parse_from_rfc3339("2024-06-01T08:00:00+02:00").unwrap();
        Trip {
            provider: "Regiojet".into(),
            departure,
            arrival: departure + chrono::Duration::minutes(155),
            duration: "02h 35m".into(),
            price,
            currency: "EUR".into(),
            origin_station: "Prague".into(),
            destination_station: destination.into(),
            transfers: 1,
            vehicle_type: "BUS, TRAIN".into(),
        }
    }

    #[test]
    fn header_and_rows() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[trip(9.5, "Brno")]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Provider,Departure,Arrival,Price,Currency,Duration,Origin,Destination,Transfers,Vehicle"
        );
        assert_eq!(
            lines[1],
            "Regiojet,2024-06-01T08:00:00+02:00,2024-06-01T10:35:00+02:00,9.50,EUR,02h 35m,Prague,Brno,1,\"BUS, TRAIN\""
        );
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("trips.csv");

        save_csv(&path, &[trip(10.0, "Brno"), trip(12.0, "Ostrava")]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][7], "Ostrava");
        assert_eq!(&rows[0][3], "10.00");
    }

    #[test]
    fn save_into_a_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let result = save_csv(&blocker.join("trips.csv"), &[trip(1.0, "Brno")]);
        assert!(matches!(result, Err(ReportError::Io { .. })));
    }
}
