use crate::config::ConfigError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Fatal errors. Anything in here aborts the run with a non-zero exit code.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Unable to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Output directory {path} is not usable: {source}")]
    Environment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No endpoints are reachable; nothing to test")]
    NoActiveEndpoints,

    #[error("Failed to write report to {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-request failures. These are folded into a failed trial and never abort a run.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}
