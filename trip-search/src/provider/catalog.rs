//! One-time, shared initialization of a provider's location catalog.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::error::ProviderError;

type Slot<T> = Option<Result<Arc<T>, Arc<ProviderError>>>;

/// Guard around a lazily fetched catalog.
///
/// The first caller runs the initializer while holding the lock; concurrent
/// first callers wait on it and then observe the same outcome. The outcome,
/// success or failure, is cached for the lifetime of the guard, so a failed
/// fetch is reported to every caller instead of being retried.
pub struct CatalogGuard<T> {
    slot: Mutex<Slot<T>>,
}

impl<T> CatalogGuard<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Return the catalog, running `init` if nobody has yet.
    ///
    /// A cached failure is surfaced as [`ProviderError::CatalogUnavailable`].
    pub async fn get_or_init<F, Fut>(&self, provider: &str, init: F) -> Result<Arc<T>, ProviderError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut slot = self.slot.lock().await;

        let outcome = match &*slot {
            Some(outcome) => outcome.clone(),
            None => {
                tracing::debug!(provider, "initializing location catalog");
                let outcome = init().await.map(Arc::new).map_err(Arc::new);
                if let Err(e) = &outcome {
                    tracing::warn!(provider, error = %e, "location catalog fetch failed");
                }
                *slot = Some(outcome.clone());
                outcome
            }
        };

        outcome.map_err(|source| ProviderError::CatalogUnavailable {
            provider: provider.to_string(),
            source,
        })
    }

    /// Whether initialization has run (successfully or not).
    #[cfg(test)]
    async fn is_initialized(&self) -> bool {
        self.slot.lock().await.is_some()
    }
}

impl<T> Default for CatalogGuard<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn initializes_once() {
        let guard = CatalogGuard::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let catalog = guard
                .get_or_init("Test", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1, 2, 3])
                })
                .await
                .unwrap();
            assert_eq!(*catalog, vec![1, 2, 3]);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(guard.is_initialized().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_callers_share_one_init() {
        let guard = Arc::new(CatalogGuard::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let guard = guard.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                guard
                    .get_or_init("Test", || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok::<_, ProviderError>(42u32)
                    })
                    .await
                    .map(|v| *v)
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_is_cached_and_shared() {
        let guard: CatalogGuard<Vec<u32>> = CatalogGuard::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let result = guard
                .get_or_init("Regiojet", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(ProviderError::Api {
                        status: 500,
                        message: "down".into(),
                    })
                })
                .await;

            match result {
                Err(ProviderError::CatalogUnavailable { provider, source }) => {
                    assert_eq!(provider, "Regiojet");
                    assert!(matches!(*source, ProviderError::Api { status: 500, .. }));
                }
                other => panic!("unexpected result: {other:?}"),
            }
        }

        // The failing initializer must not be retried
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn not_initialized_until_first_use() {
        let guard: CatalogGuard<u8> = CatalogGuard::default();
        assert!(!guard.is_initialized().await);
    }
}
