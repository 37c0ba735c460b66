//! Error types for Unlocked operations.
//!
//! This module defines the main error type [`UnlockedError`] which represents
//! every failure the pipeline can surface: URL normalization, fetching,
//! content location, configuration, and export.
//!
//! # Example
//!
//! ```rust
//! use unlocked_core::{ErrorKind, UnlockedError, parse_article};
//!
//! match parse_article("<html><body><p>no container</p></body></html>", "https://freedium-mirror.cfd/x") {
//!     Ok(article) => println!("Title: {}", article.title()),
//!     Err(e) if e.kind() == ErrorKind::ContentNotFound => println!("Mirror layout changed: {}", e),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for article export operations.
///
/// Variants map onto three caller-facing kinds (see [`ErrorKind`]):
/// invalid input URLs, fetch failures, and a missing content container.
/// The remaining variants cover configuration and file adapters.
#[derive(Error, Debug)]
pub enum UnlockedError {
    /// The input URL targets neither the mirror nor the source domain,
    /// or cannot be parsed at all.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other transport problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The mirror answered with a non-success status code.
    #[error("Mirror returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// The article body container is missing from the document.
    ///
    /// This almost always means the mirror changed its markup and the
    /// locator selectors need updating.
    #[error("Could not find the `{selector}` content container; the mirror layout may have changed")]
    ContentNotFound { selector: String },

    /// HTML parsing errors.
    ///
    /// Returned for invalid CSS selectors in the locator configuration.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),

    /// Configuration file is malformed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization of an article failed.
    #[error("Serialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The share link could not be encoded as a QR code.
    #[error("QR code encoding failed: {0}")]
    QrCodeError(String),
}

/// Coarse classification of [`UnlockedError`] values.
///
/// Callers branch on this instead of matching transport details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidUrl,
    FetchFailure,
    ContentNotFound,
    Parse,
    Io,
    Config,
    Serialization,
}

impl UnlockedError {
    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            UnlockedError::InvalidUrl(_) => ErrorKind::InvalidUrl,
            #[cfg(feature = "fetch")]
            UnlockedError::HttpError(_) => ErrorKind::FetchFailure,
            UnlockedError::Timeout { .. } | UnlockedError::HttpStatus { .. } => ErrorKind::FetchFailure,
            UnlockedError::ContentNotFound { .. } => ErrorKind::ContentNotFound,
            UnlockedError::HtmlParseError(_) => ErrorKind::Parse,
            UnlockedError::FileNotFound(_) | UnlockedError::WriteError(_) => ErrorKind::Io,
            UnlockedError::ConfigError(_) => ErrorKind::Config,
            UnlockedError::SerializationError(_) | UnlockedError::QrCodeError(_) => ErrorKind::Serialization,
        }
    }

    /// True for network, timeout, and non-success status failures.
    pub fn is_fetch_failure(&self) -> bool {
        self.kind() == ErrorKind::FetchFailure
    }
}

/// Result type alias for UnlockedError.
pub type Result<T> = std::result::Result<T, UnlockedError>;
