use serde::Serialize;

use crate::Document;
use crate::Result;

/// Title used when the page has no usable heading.
pub const UNTITLED: &str = "Untitled";

/// Author used when no profile link is found.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Article metadata with every field populated.
///
/// Missing source elements are replaced with defaults: [`UNTITLED`],
/// [`UNKNOWN_AUTHOR`], an empty date, and the page URL for the canonical link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub author: String,
    pub date: String,
    pub canonical: String,
}

impl Metadata {
    /// Applies the documented defaults to optional extraction results.
    pub fn with_defaults(
        title: Option<String>, author: Option<String>, date: Option<String>, canonical: Option<String>,
        fallback_url: &str,
    ) -> Self {
        Self {
            title: title.unwrap_or_else(|| UNTITLED.to_string()),
            author: author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            date: date.unwrap_or_default(),
            canonical: canonical.unwrap_or_else(|| fallback_url.to_string()),
        }
    }
}

impl Document {
    /// Text of the first element matching `selector` (normally `h1`),
    /// folded onto one line.
    ///
    /// Blank headings count as missing.
    pub fn extract_title(&self, selector: &str) -> Result<Option<String>> {
        Ok(self
            .select_first(selector)?
            .map(|el| el.text_single_line())
            .filter(|text| !text.is_empty()))
    }

    /// Text of the first author link, i.e. the first anchor whose target
    /// carries an `@handle` (`a[href*='@']` by default).
    pub fn extract_author(&self, selector: &str) -> Result<Option<String>> {
        Ok(self
            .select_first(selector)?
            .map(|el| el.text_single_line())
            .filter(|text| !text.is_empty()))
    }

    /// Publication date from the first `time` element:
    /// 1. its `datetime` attribute
    /// 2. its visible text
    pub fn extract_date(&self, selector: &str) -> Result<Option<String>> {
        let Some(time) = self.select_first(selector)? else {
            return Ok(None);
        };

        if let Some(datetime) = time.non_empty_attr("datetime") {
            return Ok(Some(datetime.trim().to_string()));
        }

        let text = time.text_trimmed();
        Ok(if text.is_empty() { None } else { Some(text) })
    }

    /// `href` of the canonical link element, if present and non-empty.
    pub fn extract_canonical(&self, selector: &str) -> Result<Option<String>> {
        Ok(self
            .select_first(selector)?
            .and_then(|el| el.non_empty_attr("href"))
            .map(|href| href.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title_first_h1() {
        let doc = Document::parse("<h1> First </h1><h1>Second</h1>");
        assert_eq!(doc.extract_title("h1").unwrap(), Some("First".to_string()));
    }

    #[test]
    fn test_extract_title_line_breaks_folded() {
        let doc = Document::parse("<h1>Understanding\n    Ownership</h1>");
        assert_eq!(doc.extract_title("h1").unwrap(), Some("Understanding Ownership".to_string()));
    }

    #[test]
    fn test_extract_title_blank_is_missing() {
        let doc = Document::parse("<h1>   </h1>");
        assert_eq!(doc.extract_title("h1").unwrap(), None);
    }

    #[test]
    fn test_extract_author_from_handle_link() {
        let html = r#"
            <a href="/about">About</a>
            <a href="https://medium.com/@jane.doe?source=post">Jane Doe</a>
            <a href="/@other">Other</a>
        "#;
        let doc = Document::parse(html);
        assert_eq!(doc.extract_author("a[href*='@']").unwrap(), Some("Jane Doe".to_string()));
    }

    #[test]
    fn test_extract_author_missing() {
        let doc = Document::parse(r#"<a href="/about">About</a>"#);
        assert_eq!(doc.extract_author("a[href*='@']").unwrap(), None);
    }

    #[test]
    fn test_extract_date_prefers_datetime_attribute() {
        let doc = Document::parse(r#"<time datetime="2024-01-01T00:00:00Z">Jan 1, 2024</time>"#);
        assert_eq!(doc.extract_date("time").unwrap(), Some("2024-01-01T00:00:00Z".to_string()));
    }

    #[test]
    fn test_extract_date_falls_back_to_text() {
        let doc = Document::parse(r#"<time> Mar 3, 2023 </time>"#);
        assert_eq!(doc.extract_date("time").unwrap(), Some("Mar 3, 2023".to_string()));

        let doc = Document::parse(r#"<time datetime="">Mar 3, 2023</time>"#);
        assert_eq!(doc.extract_date("time").unwrap(), Some("Mar 3, 2023".to_string()));
    }

    #[test]
    fn test_extract_date_missing_or_empty() {
        assert_eq!(Document::parse("<p>no date</p>").extract_date("time").unwrap(), None);
        assert_eq!(Document::parse("<time></time>").extract_date("time").unwrap(), None);
    }

    #[test]
    fn test_extract_canonical() {
        let html = r#"<html><head><link rel="canonical" href="https://example.com/a"></head></html>"#;
        let doc = Document::parse(html);
        assert_eq!(
            doc.extract_canonical("link[rel~='canonical']").unwrap(),
            Some("https://example.com/a".to_string())
        );
    }

    #[test]
    fn test_extract_canonical_empty_href() {
        let html = r#"<html><head><link rel="canonical" href=""></head></html>"#;
        let doc = Document::parse(html);
        assert_eq!(doc.extract_canonical("link[rel~='canonical']").unwrap(), None);
    }

    #[test]
    fn test_with_defaults() {
        let metadata = Metadata::with_defaults(None, None, None, None, "https://freedium-mirror.cfd/x");
        assert_eq!(metadata.title, UNTITLED);
        assert_eq!(metadata.author, UNKNOWN_AUTHOR);
        assert_eq!(metadata.date, "");
        assert_eq!(metadata.canonical, "https://freedium-mirror.cfd/x");
    }
}
