//! Search configuration errors.

/// Errors that abort a run before any provider is queried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Neither explicit destinations nor a radius were given
    #[error("--to or --distance required")]
    MissingDestination,

    /// The origin list contained no usable tokens
    #[error("no origin given")]
    MissingOrigin,

    /// The date list was empty
    #[error("no travel dates given")]
    NoDates,

    /// The concurrency bound must be at least 1
    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    /// Provider selection not recognised
    #[error("unknown provider: {0} (expected all, flixbus or regiojet)")]
    UnknownProvider(String),

    /// Sort order not recognised
    #[error("unknown sort order: {0} (expected price or departure)")]
    UnknownSortOrder(String),
}
