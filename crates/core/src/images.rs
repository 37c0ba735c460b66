//! Image manifest for the article body.
//!
//! Images are listed apart from the Markdown text, so the manifest does not
//! record where in the prose each image appeared; only the relative order.

use scraper::ElementRef;
use serde::{Deserialize, Serialize};

use crate::parse::Element;

/// An embedded image: its source URL and alt text (empty when undeclared).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

/// Lists the body's images in document order.
///
/// Images without a `src`, or with a blank one, are skipped.
///
/// # Example
///
/// ```rust
/// use unlocked_core::{Document, collect_images};
///
/// let doc = Document::parse(r#"<div id="b"><img src="a.png" alt="A"><img><img src="b.png"></div>"#);
/// let body = doc.select_first("#b").unwrap().unwrap();
/// let images = collect_images(&body);
/// assert_eq!(images.len(), 2);
/// assert_eq!(images[1].alt, "");
/// ```
pub fn collect_images(body: &Element<'_>) -> Vec<ImageRef> {
    body.element_ref()
        .descendants()
        .filter_map(ElementRef::wrap)
        .map(Element::new)
        .filter(|el| el.tag_name() == "img")
        .filter_map(|img| {
            let src = img.non_empty_attr("src")?.trim();
            let alt = img.attr("alt").unwrap_or_default();
            Some(ImageRef { src: src.to_string(), alt: alt.to_string() })
        })
        .collect()
}
