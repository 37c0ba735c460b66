//! Export adapters: Markdown, JSON, and standalone HTML renderings of an
//! [`Article`]. Formatters only read the article; they never alter it.

pub mod html;
pub mod json;
pub mod markdown;

use std::str::FromStr;

pub use html::{HtmlFormatter, convert_to_html, markdown_to_html};
pub use json::{JsonExportConfig, JsonFormatter, convert_to_json};
pub use markdown::{MarkdownExportConfig, MarkdownFormatter, convert_to_markdown_export};

use crate::Result;
use crate::article::Article;

/// Output format options for article exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown with a title/author/date preamble.
    Markdown,
    /// Standalone styled HTML document.
    Html,
    /// JSON serialization of every field.
    Json,
}

impl OutputFormat {
    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }

    /// MIME type used when serving the export.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "text/markdown; charset=utf-8",
            OutputFormat::Html => "text/html; charset=utf-8",
            OutputFormat::Json => "application/json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "html" | "htm" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: markdown, html, json", s)),
        }
    }
}

/// Renders an article in `format` with default options.
pub fn render(article: &Article, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(convert_to_markdown_export(article, &MarkdownExportConfig::default())),
        OutputFormat::Html => Ok(convert_to_html(article)),
        OutputFormat::Json => convert_to_json(article, &JsonExportConfig { pretty: true }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Metadata;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("Markdown".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("HTML".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_extensions() {
        assert_eq!(OutputFormat::Markdown.extension(), "md");
        assert_eq!(OutputFormat::Html.extension(), "html");
        assert_eq!(OutputFormat::Json.extension(), "json");
    }

    #[test]
    fn test_render_leaves_article_untouched() {
        let metadata = Metadata::with_defaults(Some("T".to_string()), None, None, None, "https://freedium-mirror.cfd/x");
        let article = Article::assemble("https://freedium-mirror.cfd/x", metadata, "Body".to_string(), Vec::new());
        let before = article.clone();

        for format in [OutputFormat::Markdown, OutputFormat::Html, OutputFormat::Json] {
            let output = render(&article, format).unwrap();
            assert!(output.contains("Body") || output.contains("<p>Body</p>"));
        }

        assert_eq!(article, before);
    }
}
