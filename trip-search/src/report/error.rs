//! Report output errors.

use std::path::PathBuf;

/// Errors writing or opening the trip report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// No home directory to place the default report in
    #[error("could not determine home directory; pass --out")]
    NoHome,

    #[error("viewer {viewer} failed: {source}")]
    Viewer {
        viewer: String,
        #[source]
        source: std::io::Error,
    },
}
