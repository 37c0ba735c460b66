//! Main article export API.
//!
//! [`Unlocker`] wires the pipeline together: URL normalization, fetching,
//! content location, Markdown conversion, image collection, and assembly.
//! Convenience functions [`parse_article`] and [`fetch_article`] use the
//! default configuration.
//!
//! # Example
//!
//! ```no_run
//! use unlocked_core::fetch_article;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let article = fetch_article("https://medium.com/@someone/some-post-1a2b3c").await?;
//! println!("{} by {}", article.title(), article.author());
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "fetch")]
use tracing::instrument;
use tracing::debug;

use crate::Result;
use crate::article::Article;
use crate::config::UnlockedConfig;
use crate::convert::convert_to_markdown;
#[cfg(feature = "fetch")]
use crate::fetch::fetch_url;
use crate::images::collect_images;
use crate::locate::locate;
use crate::normalize::normalize_url;
use crate::parse::Document;

/// Runs the article pipeline with a fixed configuration.
///
/// An Unlocker holds no per-article state; one instance can serve any
/// number of concurrent requests.
///
/// # Example
///
/// ```rust
/// use unlocked_core::Unlocker;
///
/// let html = r#"<h1>Hello</h1><div class="main-content"><p>Body</p></div>"#;
/// let article = Unlocker::new().parse(html, "https://freedium-mirror.cfd/x").unwrap();
/// assert_eq!(article.title(), "Hello");
/// assert_eq!(article.markdown_body(), "Body");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Unlocker {
    config: UnlockedConfig,
}

impl Unlocker {
    /// Creates a new Unlocker with default settings.
    pub fn new() -> Self {
        Self { config: UnlockedConfig::default() }
    }

    /// Creates a new Unlocker with a custom configuration.
    pub fn with_config(config: UnlockedConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &UnlockedConfig {
        &self.config
    }

    /// Rewrites an input URL into its mirror form.
    ///
    /// # Errors
    ///
    /// Returns [`crate::UnlockedError::InvalidUrl`] for URLs outside the
    /// source publication and the mirror.
    pub fn normalize(&self, url: &str) -> Result<String> {
        normalize_url(url, &self.config.mirror)
    }

    /// Extracts an article from already-fetched mirror HTML.
    ///
    /// `url` is recorded as the article URL and used as the canonical
    /// fallback. No network access.
    ///
    /// # Errors
    ///
    /// * [`crate::UnlockedError::ContentNotFound`] if the body container is missing.
    /// * [`crate::UnlockedError::HtmlParseError`] for invalid selectors or a failed conversion.
    pub fn parse(&self, html: &str, url: &str) -> Result<Article> {
        let doc = Document::parse(html);
        let located = locate(&doc, url, &self.config.locator)?;

        let markdown = convert_to_markdown(&located.body, &self.config.markdown)?;
        let images = collect_images(&located.body);
        debug!(images = images.len(), "collected images");

        Ok(Article::assemble(url, located.metadata, markdown, images))
    }

    /// Normalizes `input_url`, fetches the mirror page, and extracts the article.
    ///
    /// # Errors
    ///
    /// Any error from [`Unlocker::normalize`], [`fetch_url`], or [`Unlocker::parse`];
    /// the first failure aborts the run.
    #[cfg(feature = "fetch")]
    #[instrument(skip(self))]
    pub async fn fetch_and_parse(&self, input_url: &str) -> Result<Article> {
        let url = self.normalize(input_url)?;
        let html = fetch_url(&url, &self.config.fetch).await?;
        self.parse(&html, &url)
    }
}

/// Extracts an article from mirror HTML with the default configuration.
pub fn parse_article(html: &str, url: &str) -> Result<Article> {
    Unlocker::new().parse(html, url)
}

/// Fetches and extracts an article with the default configuration.
#[cfg(feature = "fetch")]
pub async fn fetch_article(input_url: &str) -> Result<Article> {
    Unlocker::new().fetch_and_parse(input_url).await
}
