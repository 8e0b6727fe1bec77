//! The search engine: location resolution, bounded fan-out of provider
//! queries, and aggregation of the results.

mod config;
mod error;
mod orchestrator;
mod progress;
mod rank;
mod resolve;


pub use config::{
    DestinationMode, ProviderSelection, SearchConfig, SearchRequest, SortOrder, split_tokens,
};
pub use error::SearchError;
pub use orchestrator::Orchestrator;
pub use progress::{ConsoleProgress, Progress, ProgressEvent, RecordingProgress};
pub use rank::{SearchOutcome, finalize, sort_trips};
pub use resolve::{
    Resolved, SkipReason, Skipped, Token, dedup_locations, resolve_destinations, resolve_origins,
};
