//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for codesense operations
#[derive(Debug, Error)]
pub enum Error {
    /// Snippet absent or empty; rejected before analysis runs
    #[error("No code provided for analysis.")]
    EmptyInput,

    /// Snippet exceeds the configured input ceiling
    #[error("Snippet is {size} bytes, larger than the {limit} byte limit")]
    InputTooLarge { size: usize, limit: usize },

    /// Unexpected fault inside the analysis stages
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Report archive errors
    #[error("Archive error: {message}")]
    Archive {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create an archive error with path context
    pub fn archive(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Archive {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Errors caused by the caller's input rather than by codesense itself
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::EmptyInput | Error::InputTooLarge { .. })
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
