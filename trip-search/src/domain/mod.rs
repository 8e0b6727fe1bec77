//! Domain types for trip search.
//!
//! Locations are provider-scoped; trips are immutable once built. Country
//! codes are validated at construction, so code receiving a `CountryCode`
//! can trust it.

mod country;
mod geo;
mod location;
mod trip;

pub use country::{CountryCode, InvalidCountryCode, country_code_by_name};
pub use geo::{BoundingBox, Coordinates};
pub use location::{Location, LocationKey};
pub use trip::{Trip, duration_between, format_duration};
