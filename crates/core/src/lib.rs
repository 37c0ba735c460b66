//! Export Medium articles through a freedium mirror.
//!
//! The pipeline normalizes an input URL to its mirror form, fetches the
//! page, locates the title, author, date, canonical link, and body
//! container, converts the body to Markdown, collects its images, and
//! assembles an immutable [`Article`]. Formatters render the article as
//! Markdown, JSON, or standalone HTML.
//!
//! ```rust
//! use unlocked_core::{OutputFormat, parse_article, render};
//!
//! let html = r#"<h1>Hello</h1><a href="/@ann">Ann</a><div class="main-content"><p>Body</p></div>"#;
//! let article = parse_article(html, "https://freedium-mirror.cfd/https://medium.com/@ann/hello").unwrap();
//! assert_eq!(article.author(), "Ann");
//!
//! let markdown = render(&article, OutputFormat::Markdown).unwrap();
//! assert!(markdown.starts_with("# Hello"));
//! ```

pub mod article;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod fetch;
pub mod formatters;
pub mod images;
pub mod locate;
pub mod metadata;
pub mod normalize;
pub mod parse;
pub mod qr;
pub mod share;
pub mod unlocker;

pub use article::Article;
pub use config::{UnlockedConfig, UnlockedConfigBuilder, default_config_path, load_config};
pub use convert::{MarkdownConfig, convert_to_markdown};
pub use error::{ErrorKind, Result, UnlockedError};
pub use export::{export_filename, sanitize_filename, write_export, write_rendered};
pub use fetch::FetchConfig;
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use fetch::{fetch_file, fetch_stdin};
pub use formatters::{HtmlFormatter, JsonExportConfig, JsonFormatter, MarkdownExportConfig, MarkdownFormatter};
pub use formatters::{OutputFormat, convert_to_html, convert_to_json, convert_to_markdown_export, render};
pub use images::{ImageRef, collect_images};
pub use locate::{LocatedContent, LocatorConfig, locate};
pub use metadata::{Metadata, UNKNOWN_AUTHOR, UNTITLED};
pub use normalize::{MirrorConfig, normalize_url, to_mirror_url};
pub use parse::{Document, Element};
pub use qr::qr_svg;
pub use share::{DEFAULT_SHARE_BASE, share_link, url_from_share_link};
#[cfg(feature = "fetch")]
pub use unlocker::fetch_article;
pub use unlocker::{Unlocker, parse_article};
