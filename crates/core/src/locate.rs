//! Locating the article inside a mirrored page.
//!
//! This is the only part of the pipeline that knows about the mirror's
//! markup. Metadata lookups are permissive and fall back to defaults; the
//! body container is mandatory and its absence is reported as
//! [`UnlockedError::ContentNotFound`].

use serde::Deserialize;
use tracing::{debug, warn};

use crate::metadata::Metadata;
use crate::parse::{Document, Element};
use crate::{Result, UnlockedError};

/// CSS selectors used to find the article parts.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LocatorConfig {
    /// Article title (first match).
    pub title_selector: String,
    /// Author profile link (first match).
    pub author_selector: String,
    /// Publication time element (first match).
    pub date_selector: String,
    /// Canonical link element (first match).
    pub canonical_selector: String,
    /// Container holding the article body.
    pub body_selector: String,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            title_selector: "h1".to_string(),
            author_selector: "a[href*='@']".to_string(),
            date_selector: "time".to_string(),
            canonical_selector: "link[rel~='canonical']".to_string(),
            body_selector: ".main-content".to_string(),
        }
    }
}

/// Metadata plus the body element, borrowed from the parsed document.
#[derive(Debug, Clone)]
pub struct LocatedContent<'a> {
    pub metadata: Metadata,
    pub body: Element<'a>,
}

/// Finds the metadata and the body container in a parsed mirror page.
///
/// `url` is the address the page was fetched from; it becomes the canonical
/// URL when the page declares none.
///
/// # Errors
///
/// * [`UnlockedError::ContentNotFound`] if no element matches the body selector.
/// * [`UnlockedError::HtmlParseError`] if a configured selector is invalid.
///
/// # Example
///
/// ```rust
/// use unlocked_core::{Document, LocatorConfig, locate};
///
/// let doc = Document::parse(r#"<h1>Hi</h1><div class="main-content"><p>Body</p></div>"#);
/// let located = locate(&doc, "https://freedium-mirror.cfd/x", &LocatorConfig::default()).unwrap();
/// assert_eq!(located.metadata.title, "Hi");
/// assert_eq!(located.metadata.author, "Unknown");
/// ```
pub fn locate<'a>(doc: &'a Document, url: &str, config: &LocatorConfig) -> Result<LocatedContent<'a>> {
    let body = doc
        .select_first(&config.body_selector)?
        .ok_or_else(|| UnlockedError::ContentNotFound { selector: config.body_selector.clone() })?;

    let title = doc.extract_title(&config.title_selector)?;
    let author = doc.extract_author(&config.author_selector)?;
    let date = doc.extract_date(&config.date_selector)?;
    let canonical = doc.extract_canonical(&config.canonical_selector)?;

    if title.is_none() {
        debug!(selector = %config.title_selector, "no title found, using default");
    }
    if author.is_none() {
        debug!(selector = %config.author_selector, "no author link found, using default");
    }
    if canonical.is_none() {
        warn!(url, "page declares no canonical link, falling back to the fetch URL");
    }

    let metadata = Metadata::with_defaults(title, author, date, canonical, url);
    debug!(title = %metadata.title, author = %metadata.author, "located article");

    Ok(LocatedContent { metadata, body })
}
