// src/error.rs

//! Unified error handling for the gazette watcher.

use std::fmt;

use thiserror::Error;

/// Result type alias for watcher operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed (after all retry attempts are spent)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Regex compilation failed
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Link discovery error (every listing page failed)
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// A downloaded document vanished before extraction
    #[error("Document missing: {0}")]
    DocumentMissing(String),

    /// PDF text extraction failed for one document
    #[error("Extraction error for {path}: {message}")]
    Extract { path: String, message: String },

    /// OS credential store access failed
    #[error("Credential store error: {0}")]
    Credential(String),

    /// Mail construction or delivery failed
    #[error("Mail error: {0}")]
    Mail(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a discovery error.
    pub fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery(message.into())
    }

    /// Create an extraction error tagged with the document path.
    pub fn extract(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Extract {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create a credential store error.
    pub fn credential(message: impl fmt::Display) -> Self {
        Self::Credential(message.to_string())
    }

    /// Create a mail error.
    pub fn mail(message: impl fmt::Display) -> Self {
        Self::Mail(message.to_string())
    }
}
