//! Turning user tokens into concrete, deduplicated location sets.

use std::collections::HashSet;

use futures::future::join_all;
use tracing::warn;

use crate::domain::{CountryCode, Location, country_code_by_name};
use crate::provider::{Provider, ProviderError};

use super::config::DestinationMode;
use super::progress::Progress;

/// A classified origin or destination token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A known country name, expanded to every location in the country.
    Country { name: String, code: CountryCode },
    /// Free text, looked up by name.
    Place(String),
}

impl Token {
    /// Classify a token. Empty tokens are `None`.
    pub fn classify(raw: &str) -> Option<Self> {
        let name = raw.trim();
        if name.is_empty() {
            return None;
        }
        Some(match country_code_by_name(name) {
            Some(code) => Token::Country {
                name: name.to_string(),
                code,
            },
            None => Token::Place(name.to_string()),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Token::Country { name, .. } | Token::Place(name) => name,
        }
    }
}

/// Why a token produced no locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The provider has no location by that name.
    NotFound,
    /// The lookup itself failed.
    Failed(String),
    /// Country origins can't anchor a radius search.
    CountryInRadiusMode,
}

/// A token that was reported and skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub token: String,
    pub reason: SkipReason,
}

/// Outcome of resolving a token list against one provider.
#[derive(Debug, Clone, Default)]
pub struct Resolved {
    /// Unique locations, first-seen order.
    pub locations: Vec<Location>,
    pub skipped: Vec<Skipped>,
}

impl Resolved {
    fn skip(&mut self, token: &str, reason: SkipReason) {
        self.skipped.push(Skipped {
            token: token.to_string(),
            reason,
        });
    }
}

/// Deduplicate by `(provider, id)`, keeping the first occurrence.
pub fn dedup_locations(provider: &str, locations: Vec<Location>) -> Vec<Location> {
    let mut seen = HashSet::new();
    locations
        .into_iter()
        .filter(|l| seen.insert(l.key(provider)))
        .collect()
}

/// Resolve origin tokens.
///
/// In radius mode country tokens are skipped, since distance search needs a
/// single point.
pub async fn resolve_origins(
    provider: &dyn Provider,
    tokens: &[String],
    radius_mode: bool,
    progress: &dyn Progress,
) -> Resolved {
    let resolved = resolve_tokens(provider, tokens, radius_mode, progress).await;
    report_skipped(provider.name(), "Origin", &resolved.skipped);
    resolved
}

/// Resolve the destination set for one origin, excluding the origin itself.
pub async fn resolve_destinations(
    provider: &dyn Provider,
    mode: &DestinationMode,
    origin: &Location,
    progress: &dyn Progress,
) -> Resolved {
    let mut resolved = match mode {
        DestinationMode::Explicit(tokens) => {
            resolve_tokens(provider, tokens, false, progress).await
        }
        DestinationMode::Radius { km } => {
            progress.finding_nearby(*km);
            let mut resolved = Resolved::default();
            match provider.list_within_radius(&origin.name, *km).await {
                Ok(found) => resolved.locations = dedup_locations(provider.name(), found),
                Err(e) => resolved.skip(&origin.name, SkipReason::Failed(e.to_string())),
            }
            resolved
        }
    };

    resolved.locations.retain(|l| l.id != origin.id);
    report_skipped(provider.name(), "Destination", &resolved.skipped);
    resolved
}

/// Result of looking up one token.
enum Lookup {
    Country(Result<Vec<Location>, ProviderError>),
    Place(Result<Option<Location>, ProviderError>),
}

async fn lookup(provider: &dyn Provider, token: &Token) -> Lookup {
    match token {
        Token::Country { code, .. } => Lookup::Country(provider.list_by_country(*code).await),
        Token::Place(name) => Lookup::Place(provider.resolve_by_name(name).await),
    }
}

/// Look tokens up concurrently, then merge in token order.
async fn resolve_tokens(
    provider: &dyn Provider,
    tokens: &[String],
    radius_mode: bool,
    progress: &dyn Progress,
) -> Resolved {
    let mut resolved = Resolved::default();
    let mut wanted = Vec::new();

    for token in tokens.iter().filter_map(|t| Token::classify(t)) {
        if let Token::Country { name, .. } = &token {
            if radius_mode {
                resolved.skip(name, SkipReason::CountryInRadiusMode);
                continue;
            }
            progress.expanding_country(name);
        }
        wanted.push(token);
    }

    let lookups = join_all(wanted.iter().map(|token| lookup(provider, token))).await;

    let mut found = Vec::new();
    for (token, result) in wanted.iter().zip(lookups) {
        let name = token.name();
        match result {
            Lookup::Country(Ok(locations)) if locations.is_empty() => {
                resolved.skip(name, SkipReason::NotFound)
            }
            Lookup::Country(Ok(locations)) => found.extend(locations),
            Lookup::Place(Ok(Some(location))) => found.push(location),
            Lookup::Place(Ok(None)) => resolved.skip(name, SkipReason::NotFound),
            Lookup::Country(Err(e)) | Lookup::Place(Err(e)) => {
                resolved.skip(name, SkipReason::Failed(e.to_string()))
            }
        }
    }

    resolved.locations = dedup_locations(provider.name(), found);
    resolved
}

fn report_skipped(provider: &str, role: &str, skipped: &[Skipped]) {
    for s in skipped {
        match &s.reason {
            SkipReason::NotFound => {
                warn!("{role} '{}' not found on {provider}", s.token)
            }
            SkipReason::Failed(error) => {
                warn!("{role} '{}' could not be resolved on {provider}: {error}", s.token)
            }
            SkipReason::CountryInRadiusMode => {
                warn!("distance search not supported with country origin {}", s.token)
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn locations() -> impl Strategy<Value = Vec<Location>> {
        prop::collection::vec((0u8..20, "[a-z]{1,8}"), 0..40).prop_map(|items| {
            items
                .into_iter()
                .map(|(id, name)| Location::new(id.to_string(), name))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn dedup_is_idempotent(locs in locations()) {
            let once = dedup_locations("P", locs);
            let twice = dedup_locations("P", once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn dedup_leaves_unique_ids(locs in locations()) {
            let unique = dedup_locations("P", locs.clone());
            let ids: HashSet<_> = unique.iter().map(|l| l.id.clone()).collect();
            prop_assert_eq!(ids.len(), unique.len());

            let all: HashSet<_> = locs.iter().map(|l| l.id.clone()).collect();
            prop_assert_eq!(ids, all);
        }
    }
}
