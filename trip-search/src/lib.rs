//! Multi-provider bus and train trip search.
//!
//! Resolves origin and destination names (cities, whole countries, or
//! everything within a radius) against each provider, fans the resulting
//! searches out under a concurrency bound, and merges the trips into one
//! ranked list.

pub mod cache;
pub mod dates;
pub mod domain;
pub mod flixbus;
pub mod geocode;
pub mod provider;
pub mod regiojet;
pub mod report;
pub mod search;
