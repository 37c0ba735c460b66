//! HTML to Markdown conversion of the article body.
//!
//! Inline markup, headings, lists, quotes and links go through `htmd`.
//! Preformatted blocks and tables are converted here instead and swapped in
//! through placeholders, so code keeps its exact whitespace and tables come
//! out as pipe tables. Images are skipped entirely; they are reported
//! separately by [`crate::images::collect_images`].

use std::sync::LazyLock;

use htmd::HtmlToMarkdown;
use regex::{Captures, Regex};
use scraper::{ElementRef, Node};
use tracing::debug;

use crate::parse::Element;
use crate::{Result, UnlockedError};

/// A placeholder, together with the list markers, indentation and quote
/// markers that open its line. The second branch catches placeholders that
/// land mid-line.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^((?:[ \t>]|[*+-][ \t]|\d+[.)][ \t])*)UNLOCKEDBLOCK(\d+)X|UNLOCKEDBLOCK(\d+)X")
        .expect("placeholder regex is valid")
});

static EXCESS_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("blank line regex is valid"));

/// Configuration for body conversion.
#[derive(Debug, Clone)]
pub struct MarkdownConfig {
    /// Tags dropped together with their content.
    pub skip_tags: Vec<&'static str>,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { skip_tags: vec!["img", "picture", "script", "style", "noscript", "iframe", "svg", "button"] }
    }
}

/// Converts the body element's markup to trimmed Markdown.
///
/// # Errors
///
/// Returns [`UnlockedError::HtmlParseError`] if the underlying converter fails.
///
/// # Example
///
/// ```rust
/// use unlocked_core::{Document, MarkdownConfig, convert_to_markdown};
///
/// let doc = Document::parse(r#"<div id="b"><h2>Intro</h2><p>Some <strong>bold</strong> text.</p></div>"#);
/// let body = doc.select_first("#b").unwrap().unwrap();
/// let markdown = convert_to_markdown(&body, &MarkdownConfig::default()).unwrap();
/// assert!(markdown.starts_with("## Intro"));
/// assert!(markdown.contains("**bold**"));
/// ```
pub fn convert_to_markdown(body: &Element<'_>, config: &MarkdownConfig) -> Result<String> {
    let converter = HtmlToMarkdown::builder().skip_tags(config.skip_tags.clone()).build();

    let mut blocks = ProtectedBlocks::default();
    let html = protect_blocks(body, &converter, &mut blocks)?;

    let raw = run_converter(&converter, &html)?;
    let collapsed = EXCESS_BLANK_LINES.replace_all(&raw, "\n\n");
    let markdown = blocks.restore(&collapsed);

    debug!(blocks = blocks.len(), chars = markdown.len(), "converted body to markdown");

    Ok(markdown.trim().to_string())
}

fn run_converter(converter: &HtmlToMarkdown, html: &str) -> Result<String> {
    converter
        .convert(html)
        .map_err(|e| UnlockedError::HtmlParseError(format!("markdown conversion failed: {}", e)))
}

/// Markdown produced ahead of the main conversion, keyed by position.
#[derive(Debug, Default)]
struct ProtectedBlocks {
    blocks: Vec<String>,
}

impl ProtectedBlocks {
    /// Stores `markdown` and returns the HTML that stands in for it.
    fn protect(&mut self, markdown: String) -> String {
        let id = self.blocks.len();
        self.blocks.push(markdown);
        format!("<p>UNLOCKEDBLOCK{}X</p>", id)
    }

    /// Swaps every placeholder for its stored block in a single pass.
    ///
    /// Blocks inside list items or quotes carry the container's prefix onto
    /// every line, so they stay inside the container.
    fn restore(&self, markdown: &str) -> String {
        PLACEHOLDER
            .replace_all(markdown, |caps: &Captures| {
                let prefix = caps.get(1).map_or("", |m| m.as_str());
                let block = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .and_then(|id| id.as_str().parse::<usize>().ok())
                    .and_then(|id| self.blocks.get(id));

                match block {
                    Some(block) => indent_block(block, prefix),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    fn len(&self) -> usize {
        self.blocks.len()
    }
}

/// Puts `prefix` before the first line of `block`, and the same prefix with
/// list markers blanked out before every following line.
fn indent_block(block: &str, prefix: &str) -> String {
    let continuation: String = prefix
        .chars()
        .map(|c| if c == '>' || c.is_whitespace() { c } else { ' ' })
        .collect();

    let mut out = String::with_capacity(block.len() + prefix.len());
    for (i, line) in block.split('\n').enumerate() {
        if i == 0 {
            out.push_str(prefix);
        } else {
            out.push('\n');
            out.push_str(&continuation);
        }
        out.push_str(line);
    }
    out
}

/// Serializes the body's children with top-level `pre` and `table`
/// elements replaced by placeholders.
fn protect_blocks(body: &Element<'_>, converter: &HtmlToMarkdown, blocks: &mut ProtectedBlocks) -> Result<String> {
    let mut html = body.inner_html();
    let body = body.element_ref();

    let candidates = body
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "pre" | "table"))
        .filter(|el| !nested_in_block(*el, body));

    for el in candidates {
        let markdown = match el.value().name() {
            "pre" => fenced_code_block(el),
            _ => table_to_markdown(el, converter)?,
        };

        let placeholder = blocks.protect(markdown);
        html = html.replacen(&el.html(), &placeholder, 1);
    }

    Ok(html)
}

/// True if `el` sits inside another `pre` or `table` below `body`.
fn nested_in_block(el: ElementRef<'_>, body: ElementRef<'_>) -> bool {
    for node in el.ancestors() {
        if node.id() == body.id() {
            return false;
        }
        if let Some(ancestor) = node.value().as_element()
            && matches!(ancestor.name(), "pre" | "table")
        {
            return true;
        }
    }
    false
}

/// Builds a fenced block from a `pre` element's visible text, verbatim.
fn fenced_code_block(pre: ElementRef<'_>) -> String {
    let text = preformatted_text(pre);
    let code = text.strip_suffix('\n').unwrap_or(&text);
    let fence = "`".repeat(longest_backtick_run(code).max(2) + 1);
    let language = code_language(pre).unwrap_or_default();

    format!("{}{}\n{}\n{}", fence, language, code, fence)
}

/// Text of a preformatted element, with `<br>` kept as line breaks.
fn preformatted_text(pre: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in pre.descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(e) if e.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text
}

fn longest_backtick_run(code: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in code.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Language hint from a `language-*` or `lang-*` class on the `pre` or its `code`.
fn code_language(pre: ElementRef<'_>) -> Option<String> {
    let code = pre
        .children()
        .filter_map(ElementRef::wrap)
        .find(|child| child.value().name() == "code");

    std::iter::once(pre)
        .chain(code)
        .flat_map(|el| el.value().classes())
        .find_map(|class| class.strip_prefix("language-").or_else(|| class.strip_prefix("lang-")))
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
}

/// Converts a table into pipe-table syntax; the first row is the header.
fn table_to_markdown(table: ElementRef<'_>, converter: &HtmlToMarkdown) -> Result<String> {
    let mut rows: Vec<Vec<String>> = Vec::new();

    for tr in Element::new(table).select("tr")? {
        let cells = tr
            .element_ref()
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|cell| matches!(cell.value().name(), "th" | "td"))
            .map(|cell| cell_markdown(cell, converter))
            .collect::<Result<Vec<_>>>()?;

        if !cells.is_empty() {
            rows.push(cells);
        }
    }

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return Ok(String::new());
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    for (i, row) in rows.iter().enumerate() {
        lines.push(table_row(row, columns));
        if i == 0 {
            lines.push(format!("|{}", " --- |".repeat(columns)));
        }
    }

    Ok(lines.join("\n"))
}

fn table_row(cells: &[String], columns: usize) -> String {
    let mut line = String::from("|");
    for i in 0..columns {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        line.push(' ');
        line.push_str(cell);
        line.push_str(" |");
    }
    line
}

/// Inline Markdown of a single cell, flattened to one line.
fn cell_markdown(cell: ElementRef<'_>, converter: &HtmlToMarkdown) -> Result<String> {
    let markdown = run_converter(converter, &cell.inner_html())?;
    let flattened = markdown.split_whitespace().collect::<Vec<_>>().join(" ");
    Ok(escape_pipe(&flattened))
}

/// Escape pipe characters for Markdown tables
fn escape_pipe(s: &str) -> String {
    s.replace('|', "\\|")
}
