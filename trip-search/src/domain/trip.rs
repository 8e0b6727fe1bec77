//! Bookable itineraries returned by providers.

use chrono::{DateTime, FixedOffset, NaiveDate};

/// One bookable itinerary between two locations.
///
/// Times keep the offset the provider reported them in, so the calendar date
/// of a departure is always the local date at the departure station.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// Name of the provider that returned this trip.
    pub provider: String,

    pub departure: DateTime<FixedOffset>,
    pub arrival: DateTime<FixedOffset>,

    /// Human-readable duration, normally `"HHh MMm"`.
    pub duration: String,

    pub price: f64,
    pub currency: String,

    pub origin_station: String,
    pub destination_station: String,

    /// Number of changes; 0 for direct trips.
    pub transfers: u32,

    /// Vehicle type(s) as reported by the provider, e.g. `"BUS"`.
    pub vehicle_type: String,
}

impl Trip {
    /// Local calendar date of the departure.
    pub fn departure_date(&self) -> NaiveDate {
        self.departure.date_naive()
    }

    /// Whether the trip departs on `date` in its own offset.
    pub fn departs_on(&self, date: NaiveDate) -> bool {
        self.departure_date() == date
    }
}

/// Format hours and minutes as `"HHh MMm"`.
pub fn format_duration(hours: i64, minutes: i64) -> String {
    format!("{hours:02}h {minutes:02}m")
}

/// Format the delta between two instants as `"HHh MMm"`.
///
/// Negative deltas (bad upstream data) clamp to zero.
pub fn duration_between(
    departure: DateTime<FixedOffset>,
    arrival: DateTime<FixedOffset>,
) -> String {
    let total = arrival
        .signed_duration_since(departure)
        .num_minutes()
        .max(0);
    format_duration(total / 60, total % 60)
}
