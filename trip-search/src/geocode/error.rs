//! Geocoding error types.

/// Errors from a geocoding lookup.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The service answered but had no match for the query
    #[error("coordinates not found for {0}")]
    NotFound(String),

    /// A coordinate field was not a number
    #[error("invalid coordinate {value:?} for {place}")]
    InvalidCoordinate { place: String, value: String },
}
