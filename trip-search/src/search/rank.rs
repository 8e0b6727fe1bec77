//! Final ordering of the aggregated trip list.

use crate::domain::Trip;

use super::config::SortOrder;

/// Terminal state of a search run.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Nothing was found for any task. Not an error.
    NoTrips,
    /// Trips in their final order.
    Found(Vec<Trip>),
}

impl SearchOutcome {
    pub fn trips(&self) -> &[Trip] {
        match self {
            SearchOutcome::NoTrips => &[],
            SearchOutcome::Found(trips) => trips,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SearchOutcome::NoTrips)
    }
}

/// Stable sort; equal keys keep collection order.
pub fn sort_trips(trips: &mut [Trip], order: SortOrder) {
    match order {
        SortOrder::Price => trips.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOrder::Departure => trips.sort_by(|a, b| a.departure.cmp(&b.departure)),
    }
}

/// Sort the collected trips, or report that there are none.
pub fn finalize(mut trips: Vec<Trip>, order: SortOrder) -> SearchOutcome {
    if trips.is_empty() {
        return SearchOutcome::NoTrips;
    }
    sort_trips(&mut trips, order);
    SearchOutcome::Found(trips)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::{DateTime, FixedOffset, TimeZone};
    use proptest::prelude::*;

    fn trips() -> impl Strategy<Value = Vec<Trip>> {
        prop::collection::vec((0u32..5, 0i64..6), 0..30).prop_map(|items| {
            let offset = FixedOffset::east_opt(3600).unwrap();
            items
                .into_iter()
                .enumerate()
                .map(|(i, (price, hour))| {
                    let departure: DateTime<FixedOffset> = offset
                        .with_ymd_and_hms(2024, 6, 1, 6 + hour as u32, 0, 0)
                        .unwrap();
                    Trip {
                        // Collection position, to check stability
                        provider: i.to_string(),
                        departure,
                        arrival: departure,
                        duration: String::new(),
                        price: f64::from(price),
                        currency: "EUR".into(),
                        origin_station: String::new(),
                        destination_station: String::new(),
                        transfers: 0,
                        vehicle_type: String::new(),
                    }
                })
                .collect()
        })
    }

    fn position(t: &Trip) -> usize {
        t.provider.parse().unwrap()
    }

    proptest! {
        #[test]
        fn price_sort_is_stable(trips in trips()) {
            let mut sorted = trips;
            sort_trips(&mut sorted, SortOrder::Price);
            for pair in sorted.windows(2) {
                prop_assert!(pair[0].price <= pair[1].price);
                if pair[0].price == pair[1].price {
                    prop_assert!(position(&pair[0]) < position(&pair[1]));
                }
            }
        }

        #[test]
        fn departure_sort_is_stable(trips in trips()) {
            let mut sorted = trips;
            sort_trips(&mut sorted, SortOrder::Departure);
            for pair in sorted.windows(2) {
                prop_assert!(pair[0].departure <= pair[1].departure);
                if pair[0].departure == pair[1].departure {
                    prop_assert!(position(&pair[0]) < position(&pair[1]));
                }
            }
        }
    }
}
