//! HTML parsing and DOM querying.
//!
//! This module provides the [`Document`] and [`Element`] types used by the
//! content locator, the Markdown converter, and the image collector. They are
//! thin wrappers over `scraper` that expose structural selection (tag name,
//! attribute match, class match) through CSS selectors.
//!
//! # Example
//!
//! ```rust
//! use unlocked_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <div class="main-content"><p>Paragraph</p></div>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! let body = doc.select_first(".main-content").unwrap();
//! assert!(body.is_some());
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{Result, UnlockedError};

/// Represents a parsed HTML document.
///
/// A Document owns the parsed tree; every [`Element`] borrowed from it lives
/// no longer than the document itself.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing never fails: malformed markup is repaired the way browsers do.
    ///
    /// # Example
    ///
    /// ```rust
    /// use unlocked_core::parse::Document;
    ///
    /// let doc = Document::parse("<html><body><h1>Title</h1></body></html>");
    /// assert_eq!(doc.select("h1").unwrap().len(), 1);
    /// ```
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`UnlockedError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use unlocked_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html);
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.html.select(&sel).map(Element::new).collect())
    }

    /// Selects the first element matching a CSS selector, if any.
    ///
    /// # Errors
    ///
    /// Returns [`UnlockedError::HtmlParseError`] if the selector is invalid.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.html.select(&sel).next().map(Element::new))
    }
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use unlocked_core::parse::Document;
///
/// let html = r#"<a href="https://example.com">Link text</a>"#;
/// let doc = Document::parse(html);
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    pub(crate) fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// The underlying scraper element.
    pub(crate) fn element_ref(&self) -> ElementRef<'a> {
        self.element
    }

    /// Gets the inner HTML of this element.
    pub fn inner_html(&self) -> String {
        self.element.inner_html()
    }

    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text content with surrounding whitespace removed.
    pub fn text_trimmed(&self) -> String {
        self.text().trim().to_string()
    }

    /// Gets the text content on a single line: every whitespace run,
    /// line breaks included, becomes one space.
    pub fn text_single_line(&self) -> String {
        self.text().split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Gets the value of an attribute.
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the value of an attribute when it is present and not blank.
    pub fn non_empty_attr(&self, name: &str) -> Option<&'a str> {
        self.attr(name).filter(|value| !value.trim().is_empty())
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Selects descendant elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`UnlockedError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile_selector(selector)?;
        Ok(self.element.select(&sel).map(Element::new).collect())
    }
}

fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| UnlockedError::HtmlParseError(format!("Invalid selector: {}", e)))
}
