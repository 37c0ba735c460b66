//! Writing exports to disk.
//!
//! The output directory is always supplied by the caller; nothing here
//! keeps process-wide state.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::Result;
use crate::article::Article;
use crate::formatters::{OutputFormat, render};

static INVALID_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("filename regex is valid"));

/// Longest title prefix, in characters, used for export file names.
const MAX_FILENAME_CHARS: usize = 80;

/// Replaces characters that are invalid in Windows file names with `_`.
///
/// Whitespace runs, line breaks included, become a single space and other
/// control characters are dropped, so the result is also safe inside a
/// `Content-Disposition` header. Blank names become `article`.
pub fn sanitize_filename(name: &str) -> String {
    let single_line = name.split_whitespace().collect::<Vec<_>>().join(" ");
    let printable: String = single_line.chars().filter(|c| !c.is_control()).collect();
    let sanitized = INVALID_FILENAME_CHARS.replace_all(&printable, "_");
    let sanitized = sanitized.trim();
    if sanitized.is_empty() { "article".to_string() } else { sanitized.to_string() }
}

/// File name for an export: the sanitized title, truncated, plus extension.
///
/// # Example
///
/// ```rust
/// use unlocked_core::{Article, Metadata, OutputFormat, export_filename};
///
/// let metadata = Metadata::with_defaults(Some("A/B: testing?".into()), None, None, None, "u");
/// let article = Article::assemble("u", metadata, String::new(), Vec::new());
/// assert_eq!(export_filename(&article, OutputFormat::Html), "A_B_ testing_.html");
/// ```
pub fn export_filename(article: &Article, format: OutputFormat) -> String {
    let sanitized = sanitize_filename(article.title());
    let truncated: String = sanitized.chars().take(MAX_FILENAME_CHARS).collect();
    format!("{}.{}", truncated.trim_end(), format.extension())
}

/// Writes `content` into `dir` under [`export_filename`], creating `dir`
/// if needed. Returns the written path.
pub fn write_rendered(dir: &Path, article: &Article, format: OutputFormat, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(article, format));
    fs::write(&path, content)?;
    debug!(path = %path.display(), bytes = content.len(), "wrote export");
    Ok(path)
}

/// Renders the article with default options and writes it into `dir`.
pub fn write_export(dir: &Path, article: &Article, format: OutputFormat) -> Result<PathBuf> {
    let content = render(article, format)?;
    write_rendered(dir, article, format, &content)
}
