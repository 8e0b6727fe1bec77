//! Bounded-concurrency fan-out of provider searches.
//!
//! Providers are searched one after another, and within a provider one
//! origin at a time. Each origin's (destination × date) tasks run on a
//! `JoinSet`, gated by a semaphore shared across the whole run, and the
//! coordinator drains the set before moving on to the next origin.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDate;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::domain::{Location, Trip};
use crate::provider::Provider;

use super::config::{SearchConfig, SearchRequest};
use super::error::SearchError;
use super::progress::Progress;
use super::rank::{SearchOutcome, finalize};
use super::resolve::{resolve_destinations, resolve_origins};

/// Trips collected by every task of a run.
type Collected = Arc<Mutex<Vec<Trip>>>;

/// Runs searches across a fixed set of providers.
pub struct Orchestrator {
    providers: Vec<Arc<dyn Provider>>,
    config: SearchConfig,
    progress: Arc<dyn Progress>,
}

impl Orchestrator {
    pub fn new(
        providers: Vec<Arc<dyn Provider>>,
        config: SearchConfig,
        progress: Arc<dyn Progress>,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            providers,
            config,
            progress,
        })
    }

    /// Search every provider and return the sorted result.
    pub async fn run(&self, request: &SearchRequest) -> SearchOutcome {
        let collected: Collected = Arc::new(Mutex::new(Vec::new()));
        let permits = Arc::new(Semaphore::new(self.config.max_concurrent));

        for provider in &self.providers {
            self.search_provider(provider, request, &permits, &collected)
                .await;
        }

        let trips = std::mem::take(&mut *collected.lock().unwrap_or_else(PoisonError::into_inner));
        info!(trips = trips.len(), "search complete");
        self.progress.finished(trips.len());

        finalize(trips, self.config.sort)
    }

    async fn search_provider(
        &self,
        provider: &Arc<dyn Provider>,
        request: &SearchRequest,
        permits: &Arc<Semaphore>,
        collected: &Collected,
    ) {
        self.progress.provider_started(provider.name());

        let origins = resolve_origins(
            provider.as_ref(),
            &request.origins,
            request.is_radius(),
            self.progress.as_ref(),
        )
        .await;

        for origin in &origins.locations {
            self.progress.origin_started(origin);

            let destinations = resolve_destinations(
                provider.as_ref(),
                &request.destination,
                origin,
                self.progress.as_ref(),
            )
            .await;
            self.progress
                .destinations_found(destinations.locations.len(), request.dates.len());

            self.search_batch(
                provider,
                origin,
                &destinations.locations,
                &request.dates,
                permits,
                collected,
            )
            .await;
        }
    }

    /// Run one origin's tasks and wait for all of them.
    async fn search_batch(
        &self,
        provider: &Arc<dyn Provider>,
        origin: &Location,
        destinations: &[Location],
        dates: &[NaiveDate],
        permits: &Arc<Semaphore>,
        collected: &Collected,
    ) {
        let mut tasks = JoinSet::new();

        for destination in destinations {
            for &date in dates {
                let provider = Arc::clone(provider);
                let permits = Arc::clone(permits);
                let collected = Arc::clone(collected);
                let progress = Arc::clone(&self.progress);
                let origin = origin.clone();
                let destination = destination.clone();

                tasks.spawn(async move {
                    let Ok(_permit) = permits.acquire_owned().await else {
                        return;
                    };

                    match provider.search_trips(&origin, &destination, date).await {
                        Ok(trips) if trips.is_empty() => {}
                        Ok(trips) => {
                            collected
                                .lock()
                                .unwrap_or_else(PoisonError::into_inner)
                                .extend(trips);
                            progress.task_succeeded();
                        }
                        Err(e) => debug!(
                            provider = provider.name(),
                            from = %origin.name,
                            to = %destination.name,
                            %date,
                            error = %e,
                            "search task failed"
                        ),
                    }
                });
            }
        }

        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                debug!(error = %e, "search task aborted");
            }
        }
    }
}
