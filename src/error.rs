use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid report payload in {origin}: {source}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },

    #[error("Invalid input pattern \"{input}\": {message}")]
    Pattern { input: String, message: String },

    #[error("Request to {url} failed: {message}")]
    Fetch { url: String, message: String },

    #[error("Failed to load config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Report not found: {id}")]
    ReportNotFound { id: String },

    #[error("Chart type \"{kind}\" is not registered")]
    ChartNotRegistered { kind: &'static str },

    #[error("No server URL configured (use --server or SAFESPEAK_SERVER_URL)")]
    MissingServer,

    #[error("No report input given (use --input or --server)")]
    NoInput,

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// Per-record failure. Recovered by the caller, never fatal for a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum RecordError {
    #[error("report {id} has no createdAt")]
    MissingCreatedAt { id: String },

    #[error("report {id} has unparseable createdAt \"{input}\"")]
    InvalidCreatedAt { id: String, input: String },
}
