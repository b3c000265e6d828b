//! Unified error handling for the trendscope crate
//!
//! The analysis core is infallible; errors only come from the edges:
//! configuration loading, reading item files, and upstream collection.
//!
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum
//! - [`CollectError`] - Failures reported by a single collector

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Upstream collection errors (source unavailable, timeout)
    Collection,
    /// Parsing and deserialization errors
    Parsing,
    /// File I/O errors
    Storage,
    /// Configuration and validation errors
    Config,
}

impl ErrorCategory {
    /// Get a short description for the category
    pub fn description(&self) -> &'static str {
        match self {
            Self::Collection => "collection error",
            Self::Parsing => "parsing error",
            Self::Storage => "storage error",
            Self::Config => "configuration error",
        }
    }
}

/// Errors a collector can report for one collection attempt
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollectError {
    /// Source returned an error or could not be reached
    #[error("collection failed: {0}")]
    Failed(String),

    /// Collector did not finish in time
    #[error("collection timed out after {0:?}")]
    Timeout(Duration),

    /// Source answered with something the collector could not map
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl CollectError {
    /// Whether a later attempt might succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Failed(_) | Self::Timeout(_))
    }
}

/// Unified error type for the trendscope crate
#[derive(Error, Debug)]
pub enum Error {
    /// Collector errors
    #[error("Collection error: {0}")]
    Collection(#[from] CollectError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Collection(e) => e.is_recoverable(),
            Self::Io(_) => true,
            Self::Json(_) | Self::Toml(_) | Self::Config(_) => false,
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Collection(_) => ErrorCategory::Collection,
            Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) | Self::Toml(_) => ErrorCategory::Parsing,
            Self::Config(_) => ErrorCategory::Config,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
