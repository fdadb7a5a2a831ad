//! Common error types for the toolkit

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for toolkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the API and the maintenance tools
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML encode/decode error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Top-level root directory is absent; aborts a whole walk
    #[error("Root directory not found: {0}")]
    RootMissing(PathBuf),

    /// `metadata.yaml` exists but is not a string-keyed mapping
    #[error("Malformed metadata in {path}: {reason}")]
    MalformedMetadata { path: PathBuf, reason: String },

    /// Expected artifact or directory absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Disk or permission error while persisting metadata or a link
    #[error("Write failed for {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Caller omitted or mangled a required field
    #[error("Invalid input: {0}")]
    ValidationFailure(String),
}

impl Error {
    pub(crate) fn write_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::WriteFailure {
            path: path.into(),
            source,
        }
    }
}
