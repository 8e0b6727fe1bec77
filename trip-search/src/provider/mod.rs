//! The transportation provider abstraction.
//!
//! Every upstream source (a bus or rail operator's public API) implements
//! [`Provider`]. The search core only ever talks to `dyn Provider`, so adding
//! a source means implementing the trait and nothing else.

mod catalog;
mod error;
mod mock;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{CountryCode, Location, Trip};

pub use catalog::CatalogGuard;
pub use error::ProviderError;
pub use mock::MockProvider;

/// Uniform query surface over one transportation provider.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Display name, also used as the namespace for location ids.
    fn name(&self) -> &str;

    /// Exact or best-match lookup of a place name.
    ///
    /// A miss is `Ok(None)`; errors are reserved for transport or parse
    /// failures.
    async fn resolve_by_name(&self, name: &str) -> Result<Option<Location>, ProviderError>;

    /// All of the provider's locations inside one country.
    async fn list_by_country(&self, country: CountryCode) -> Result<Vec<Location>, ProviderError>;

    /// Locations within `radius_km` (great-circle) of the named origin.
    async fn list_within_radius(
        &self,
        origin_name: &str,
        radius_km: u32,
    ) -> Result<Vec<Location>, ProviderError>;

    /// Itineraries from `origin` to `destination` departing on `date`.
    ///
    /// Implementations must drop any trip whose departure falls on another
    /// calendar date, even if the upstream response includes it.
    async fn search_trips(
        &self,
        origin: &Location,
        destination: &Location,
        date: NaiveDate,
    ) -> Result<Vec<Trip>, ProviderError>;
}
