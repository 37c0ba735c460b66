//! Rewriting article URLs into their mirror form.
//!
//! Fetching always goes through the mirror, which serves the article when
//! given the original URL as a path suffix. Normalization is a pure string
//! transformation: no parsing of the article and no network access.

use serde::Deserialize;

use crate::{Result, UnlockedError};

/// Where articles are mirrored and which URLs are accepted.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MirrorConfig {
    /// Prefix joined with the original URL to build the mirror URL.
    pub base_url: String,
    /// Substrings identifying a URL that already points at the mirror.
    pub mirror_markers: Vec<String>,
    /// Substring identifying a URL from the source publication.
    pub source_marker: String,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://freedium-mirror.cfd/".to_string(),
            mirror_markers: vec!["freedium.cfd".to_string(), "freedium-mirror.cfd".to_string()],
            source_marker: "medium.com".to_string(),
        }
    }
}

impl MirrorConfig {
    /// Returns true if `url` already targets the mirror.
    pub fn is_mirror_url(&self, url: &str) -> bool {
        self.mirror_markers.iter().any(|marker| !marker.is_empty() && url.contains(marker.as_str()))
    }

    /// Returns true if `url` belongs to the source publication.
    pub fn is_source_url(&self, url: &str) -> bool {
        !self.source_marker.is_empty() && url.contains(self.source_marker.as_str())
    }
}

/// Rewrites an article URL into the mirror form used for fetching.
///
/// * URLs already on the mirror are returned unchanged.
/// * URLs without the source marker fail with [`UnlockedError::InvalidUrl`].
/// * Anything else is prefixed with the mirror base, keeping the original
///   URL intact as the trailing component.
///
/// Surrounding whitespace is ignored.
///
/// # Example
///
/// ```rust
/// use unlocked_core::{MirrorConfig, normalize_url};
///
/// let config = MirrorConfig::default();
/// let mirror = normalize_url("https://medium.com/@someone/a-post-123", &config).unwrap();
/// assert_eq!(mirror, "https://freedium-mirror.cfd/https://medium.com/@someone/a-post-123");
/// ```
pub fn normalize_url(url: &str, config: &MirrorConfig) -> Result<String> {
    let url = url.trim();

    if url.is_empty() {
        return Err(UnlockedError::InvalidUrl("no URL given".to_string()));
    }

    if config.is_mirror_url(url) {
        return Ok(url.to_string());
    }

    if !config.is_source_url(url) {
        return Err(UnlockedError::InvalidUrl(format!(
            "{} is not a {} article URL",
            url, config.source_marker
        )));
    }

    Ok(format!("{}{}", config.base_url, url))
}

/// Normalizes with the default mirror configuration.
pub fn to_mirror_url(url: &str) -> Result<String> {
    normalize_url(url, &MirrorConfig::default())
}
