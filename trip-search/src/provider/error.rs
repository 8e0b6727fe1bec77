//! Provider error types.

use std::sync::Arc;

use crate::domain::CountryCode;
use crate::geocode::GeocodeError;

/// Errors that can occur when querying a transportation provider.
///
/// None of these are fatal to a search run: the orchestrator logs them and
/// drops the affected task or token.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected schema
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The one-time location catalog fetch failed; shared by every caller
    #[error("{provider} location catalog unavailable: {source}")]
    CatalogUnavailable {
        provider: String,
        #[source]
        source: Arc<ProviderError>,
    },

    /// No bounding box is known for the country
    #[error("no bounding box known for country {0}")]
    UnsupportedCountry(CountryCode),

    /// Origin coordinates could not be determined for a radius search
    #[error("geocoding failed: {0}")]
    Geocode(#[from] GeocodeError),
}

impl ProviderError {
    /// Build a `Json` error, keeping a bounded preview of the offending body.
    pub fn json(err: serde_json::Error, body: &str) -> Self {
        ProviderError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ProviderError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let inner = Arc::new(ProviderError::Api {
            status: 500,
            message: "boom".into(),
        });
        let err = ProviderError::CatalogUnavailable {
            provider: "Regiojet".into(),
            source: inner,
        };
        assert_eq!(
            err.to_string(),
            "Regiojet location catalog unavailable: API error 500: boom"
        );
    }

    #[test]
    fn json_error_truncates_body() {
        let body = "x".repeat(2000);
        let parse_err = serde_json::from_str::<serde_json::Value>(&body).unwrap_err();
        match ProviderError::json(parse_err, &body) {
            ProviderError::Json { body: Some(preview), .. } => assert_eq!(preview.len(), 500),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn catalog_error_exposes_source() {
        use std::error::Error;

        let err = ProviderError::CatalogUnavailable {
            provider: "Regiojet".into(),
            source: Arc::new(ProviderError::Api {
                status: 502,
                message: "bad gateway".into(),
            }),
        };
        assert!(err.source().is_some());
    }
}
