//! RegioJet bus and train provider.

mod catalog;
mod client;
mod convert;
mod types;

pub use catalog::RegiojetCatalog;
pub use client::{RegiojetClient, RegiojetConfig};
pub use convert::{convert_routes, normalize_travel_time};
pub use types::{CityDto, CountryDto, LocationIdDto, RouteDto, RouteSearchResponse, StationDto};
