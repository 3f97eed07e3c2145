// src/error.rs

//! Unified error handling for the contest aggregator.

use std::fmt;

use thiserror::Error;

use crate::models::Platform;

/// Result type alias for contest operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A contest source returned something we could not use
    #[error("Source error for {platform}: {message}")]
    Source { platform: Platform, message: String },

    /// A contest source did not answer in time
    #[error("Source {platform} timed out after {secs}s")]
    Timeout { platform: Platform, secs: u64 },

    /// The aggregation as a whole could not produce a collection
    #[error("Aggregation failed: {0}")]
    Aggregate(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a source error with platform context.
    pub fn source_failure(platform: Platform, message: impl fmt::Display) -> Self {
        Self::Source {
            platform,
            message: message.to_string(),
        }
    }

    /// Whether this error came from rejected user input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_message() {
        let err = AppError::source_failure(Platform::CodeChef, "missing contest lists");
        assert_eq!(
            err.to_string(),
            "Source error for CodeChef: missing contest lists"
        );
    }

    #[test]
    fn test_is_validation() {
        assert!(AppError::validation("bad url").is_validation());
        assert!(!AppError::config("bad config").is_validation());
    }
}
