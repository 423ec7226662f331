// src/error.rs

//! Error types for plot rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mdplot operations.
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors that can occur while configuring or rendering a figure.
#[derive(Debug, Error)]
pub enum PlotError {
    /// The caller passed an unusable option (e.g. a non-string save target).
    #[error("Usage error: {0}")]
    Usage(String),

    /// Input data violates a precondition of the renderer.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A recognised but unimplemented configuration.
    #[error("Unsupported configuration: {0}")]
    Unsupported(String),

    /// Filesystem failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The plotting backend failed to draw or encode a figure.
    #[error("Plotting backend error: {0}")]
    Backend(String),

    /// Options file or data file could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PlotError {
    /// Create a Usage error.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an Io error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap any backend error.
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for PlotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<csv::Error> for PlotError {
    fn from(err: csv::Error) -> Self {
        Self::Config(err.to_string())
    }
}
