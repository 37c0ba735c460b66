//! Retrieving mirror pages from the network, files, and stdin.
//!
//! The fetcher is thin: one GET with a bounded timeout. Retry
//! policy, if any, belongs to the caller.

use std::fs;
use std::path::PathBuf;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
use serde::Deserialize;
#[cfg(feature = "fetch")]
use tracing::{debug, instrument};
#[cfg(feature = "fetch")]
use url::Url;

use crate::{Result, UnlockedError};

/// HTTP client configuration for fetching mirror pages.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 25, user_agent: "Mozilla/5.0 (compatible; Unlocked/1.0)".to_string() }
    }
}

/// Fetches HTML content from a URL.
///
/// Follows redirects and respects the configured timeout.
///
/// # Errors
///
/// * [`UnlockedError::InvalidUrl`] if `url` cannot be parsed.
/// * [`UnlockedError::Timeout`] if the request exceeds the timeout.
/// * [`UnlockedError::HttpStatus`] for non-success responses.
/// * [`UnlockedError::HttpError`] for any other transport failure.
#[cfg(feature = "fetch")]
#[instrument(skip(config), fields(timeout = config.timeout))]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| UnlockedError::InvalidUrl(format!("{}: {}", url, e)))?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(UnlockedError::HttpError)?;

    let timeout_error = |e: reqwest::Error| {
        if e.is_timeout() { UnlockedError::Timeout { timeout: config.timeout } } else { UnlockedError::HttpError(e) }
    };

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(timeout_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(UnlockedError::HttpStatus { status: status.as_u16(), url: url.to_string() });
    }

    let content = response.text().await.map_err(timeout_error)?;
    debug!(bytes = content.len(), "fetched page");

    Ok(content)
}

/// Reads saved mirror HTML from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(UnlockedError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(UnlockedError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(UnlockedError::from)?;

    Ok(buffer)
}
