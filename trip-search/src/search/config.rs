//! Search configuration and request types.

use std::str::FromStr;

use chrono::NaiveDate;

use super::error::SearchError;

/// Default bound on simultaneous `search_trips` calls.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Final ordering of the trip list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Cheapest first.
    #[default]
    Price,
    /// Earliest departure instant first.
    Departure,
}

impl FromStr for SortOrder {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(SortOrder::Price),
            "departure" => Ok(SortOrder::Departure),
            other => Err(SearchError::UnknownSortOrder(other.to_string())),
        }
    }
}

/// Which providers to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderSelection {
    #[default]
    All,
    Flixbus,
    Regiojet,
}

impl ProviderSelection {
    pub fn includes_flixbus(self) -> bool {
        matches!(self, ProviderSelection::All | ProviderSelection::Flixbus)
    }

    pub fn includes_regiojet(self) -> bool {
        matches!(self, ProviderSelection::All | ProviderSelection::Regiojet)
    }
}

impl FromStr for ProviderSelection {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ProviderSelection::All),
            "flixbus" => Ok(ProviderSelection::Flixbus),
            "regiojet" => Ok(ProviderSelection::Regiojet),
            other => Err(SearchError::UnknownProvider(other.to_string())),
        }
    }
}

/// Tunables for a search run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of `search_trips` calls in flight at once.
    pub max_concurrent: usize,

    /// Ordering applied to the final trip list.
    pub sort: SortOrder,
}

impl SearchConfig {
    /// Set the concurrency bound.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set the sort order.
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_concurrent == 0 {
            return Err(SearchError::ZeroConcurrency);
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            sort: SortOrder::default(),
        }
    }
}

/// How destinations are chosen for each origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationMode {
    /// City and/or country names.
    Explicit(Vec<String>),
    /// Every location within this many kilometres of the origin.
    Radius { km: u32 },
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub origins: Vec<String>,
    pub destination: DestinationMode,
    pub dates: Vec<NaiveDate>,
}

impl SearchRequest {
    /// Build a request from raw comma-separated inputs.
    ///
    /// A non-zero `distance_km` selects radius mode and overrides `to`.
    pub fn new(
        from: &str,
        to: Option<&str>,
        distance_km: u32,
        dates: Vec<NaiveDate>,
    ) -> Result<Self, SearchError> {
        let origins = split_tokens(from);
        if origins.is_empty() {
            return Err(SearchError::MissingOrigin);
        }

        let destination = if distance_km > 0 {
            DestinationMode::Radius { km: distance_km }
        } else {
            let tokens = to.map(split_tokens).unwrap_or_default();
            if tokens.is_empty() {
                return Err(SearchError::MissingDestination);
            }
            DestinationMode::Explicit(tokens)
        };

        if dates.is_empty() {
            return Err(SearchError::NoDates);
        }

        Ok(Self {
            origins,
            destination,
            dates,
        })
    }

    pub fn is_radius(&self) -> bool {
        matches!(self.destination, DestinationMode::Radius { .. })
    }
}

/// Split a comma-separated list, trimming and dropping empty items.
pub fn split_tokens(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
