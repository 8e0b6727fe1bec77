//! User-facing progress reporting.
//!
//! Progress text is informational only and separate from diagnostic logging,
//! which goes through `tracing`.

use std::io::Write;
use std::sync::Mutex;

use crate::domain::Location;

/// Receives progress events from the orchestrator.
pub trait Progress: Send + Sync {
    /// A provider is about to be searched.
    fn provider_started(&self, provider: &str);

    /// A country token is being expanded into its locations.
    fn expanding_country(&self, token: &str);

    /// Trips from `origin` are about to be searched.
    fn origin_started(&self, origin: &Location);

    /// Radius-mode destination discovery is starting.
    fn finding_nearby(&self, radius_km: u32);

    /// The destination set for the current origin is known.
    fn destinations_found(&self, destinations: usize, dates: usize);

    /// One search task returned at least one trip.
    fn task_succeeded(&self);

    /// All providers are done.
    fn finished(&self, trips: usize);
}

/// Writes progress to stdout, one dot per successful task.
#[derive(Debug, Default)]
pub struct ConsoleProgress;

impl ConsoleProgress {
    pub fn new() -> Self {
        Self
    }
}

impl Progress for ConsoleProgress {
    fn provider_started(&self, provider: &str) {
        println!("\n--- Searching on {provider} ---");
    }

    fn expanding_country(&self, token: &str) {
        println!("Expanding country {token}...");
    }

    fn origin_started(&self, origin: &Location) {
        println!("\nSearching trips from: {}", origin.name);
    }

    fn finding_nearby(&self, radius_km: u32) {
        println!("Finding destinations within {radius_km}km...");
    }

    fn destinations_found(&self, destinations: usize, dates: usize) {
        println!("Found {destinations} unique destinations. Searching on {dates} dates...");
    }

    fn task_succeeded(&self) {
        print!(".");
        let _ = std::io::stdout().flush();
    }

    fn finished(&self, trips: usize) {
        println!();
        tracing::debug!(trips, "search finished");
    }
}

/// A recorded progress event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    ProviderStarted(String),
    ExpandingCountry(String),
    OriginStarted(String),
    FindingNearby(u32),
    DestinationsFound { destinations: usize, dates: usize },
    TaskSucceeded,
    Finished(usize),
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .map(|e| e.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Progress for RecordingProgress {
    fn provider_started(&self, provider: &str) {
        self.push(ProgressEvent::ProviderStarted(provider.to_string()));
    }

    fn expanding_country(&self, token: &str) {
        self.push(ProgressEvent::ExpandingCountry(token.to_string()));
    }

    fn origin_started(&self, origin: &Location) {
        self.push(ProgressEvent::OriginStarted(origin.name.clone()));
    }

    fn finding_nearby(&self, radius_km: u32) {
        self.push(ProgressEvent::FindingNearby(radius_km));
    }

    fn destinations_found(&self, destinations: usize, dates: usize) {
        self.push(ProgressEvent::DestinationsFound { destinations, dates });
    }

    fn task_succeeded(&self) {
        self.push(ProgressEvent::TaskSucceeded);
    }

    fn finished(&self, trips: usize) {
        self.push(ProgressEvent::Finished(trips));
    }
}
