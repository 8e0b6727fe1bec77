//! Flixbus long-distance bus provider.

mod client;
mod convert;
mod types;

pub use client::{FlixbusClient, FlixbusConfig};
pub use convert::convert_search;
pub use types::{AutocompleteResponse, CmsCity, SearchResponse};
