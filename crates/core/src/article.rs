//! The assembled article record.
//!
//! This module defines [`Article`], the immutable result of one
//! fetch-and-parse run: metadata, the Markdown body, the image manifest,
//! and the time the snapshot was taken.

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::images::ImageRef;
use crate::metadata::Metadata;

/// A snapshot of an article.
///
/// Every field is always populated, with defaults where the page lacked the
/// information. Fields are read-only once assembled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    url: String,
    title: String,
    author: String,
    date: String,
    canonical: String,
    #[serde(with = "time::serde::rfc3339")]
    scraped_at: OffsetDateTime,
    images: Vec<ImageRef>,
    markdown_body: String,
}

impl Article {
    /// Assembles an article, stamping it with the current UTC time.
    ///
    /// # Example
    ///
    /// ```rust
    /// use unlocked_core::{Article, Metadata};
    ///
    /// let metadata = Metadata::with_defaults(Some("Title".into()), None, None, None, "https://freedium-mirror.cfd/x");
    /// let article = Article::assemble("https://freedium-mirror.cfd/x", metadata, "  Body\n".into(), Vec::new());
    /// assert_eq!(article.markdown_body(), "Body");
    /// assert_eq!(article.author(), "Unknown");
    /// ```
    pub fn assemble(url: &str, metadata: Metadata, markdown_body: String, images: Vec<ImageRef>) -> Self {
        Self::assemble_at(url, metadata, markdown_body, images, OffsetDateTime::now_utc())
    }

    /// Assembles an article with an explicit capture time.
    pub fn assemble_at(
        url: &str, metadata: Metadata, markdown_body: String, images: Vec<ImageRef>, scraped_at: OffsetDateTime,
    ) -> Self {
        let Metadata { title, author, date, canonical } = metadata;
        let markdown_body = markdown_body.trim().to_string();

        Self { url: url.to_string(), title, author, date, canonical, scraped_at, images, markdown_body }
    }

    /// The normalized URL the article was fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Publication date: ISO-8601 when the page declares one, free text
    /// otherwise, empty if absent.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Capture time (UTC).
    pub fn scraped_at(&self) -> OffsetDateTime {
        self.scraped_at
    }

    /// Capture time formatted as RFC 3339.
    pub fn scraped_at_rfc3339(&self) -> String {
        self.scraped_at.format(&Rfc3339).unwrap_or_default()
    }

    /// Images in body document order.
    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    /// Trimmed Markdown of the article body.
    pub fn markdown_body(&self) -> &str {
        &self.markdown_body
    }

    /// Returns the metadata portion as a [`Metadata`] value.
    pub fn metadata(&self) -> Metadata {
        Metadata {
            title: self.title.clone(),
            author: self.author.clone(),
            date: self.date.clone(),
            canonical: self.canonical.clone(),
        }
    }
}
