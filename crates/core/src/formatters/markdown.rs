use crate::article::Article;

/// Configuration for Markdown export
#[derive(Debug, Clone, Default)]
pub struct MarkdownExportConfig {
    /// Include TOML frontmatter with metadata
    pub include_frontmatter: bool,
    /// Append the image manifest as a `## Images` section
    pub include_images: bool,
}

/// Render an article as a Markdown document with a title/author/date preamble
pub fn convert_to_markdown_export(article: &Article, config: &MarkdownExportConfig) -> String {
    let mut output = String::new();

    if config.include_frontmatter {
        output.push_str(&generate_frontmatter(article));
        output.push('\n');
    }

    output.push_str(&format!("# {}\n\n", single_line(article.title())));
    output.push_str(&generate_preamble(article));
    output.push_str("\n---\n\n");
    output.push_str(article.markdown_body());
    output.push('\n');

    if config.include_images && !article.images().is_empty() {
        output.push_str("\n## Images\n\n");
        for image in article.images() {
            output.push_str(&format!("- ![{}]({})\n", escape_alt(&image.alt), image.src));
        }
    }

    output
}

/// Folds whitespace runs so a heading stays on one line
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Author, date and source lines shown under the title
fn generate_preamble(article: &Article) -> String {
    let mut preamble = format!("*By {}*  \n", article.author());

    if !article.date().is_empty() {
        preamble.push_str(&format!("*Published: {}*  \n", article.date()));
    }

    preamble.push_str(&format!("*Source: <{}>*\n", article.canonical()));
    preamble
}

/// Generate TOML frontmatter from article metadata
fn generate_frontmatter(article: &Article) -> String {
    let mut frontmatter = String::from("+++");

    frontmatter.push_str(&format!("\ntitle = {}", toml_escape_string(article.title())));
    frontmatter.push_str(&format!("\nauthor = {}", toml_escape_string(article.author())));

    if !article.date().is_empty() {
        frontmatter.push_str(&format!("\ndate = {}", toml_escape_string(article.date())));
    }

    frontmatter.push_str(&format!("\ncanonical = {}", toml_escape_string(article.canonical())));
    frontmatter.push_str(&format!("\nurl = {}", toml_escape_string(article.url())));
    frontmatter.push_str(&format!("\nscraped_at = {}", toml_escape_string(&article.scraped_at_rfc3339())));
    frontmatter.push_str(&format!("\nimages = {}", article.images().len()));

    frontmatter.push_str("\n+++\n");

    frontmatter
}

/// Escape a string for TOML format
fn toml_escape_string(s: &str) -> String {
    let needs_escape = s.contains('"') || s.contains('\\') || s.contains('\n');
    if needs_escape {
        format!(
            "\"{}\"",
            s.replace('\\', "\\\\").replace('\"', "\\\"").replace('\n', "\\n")
        )
    } else {
        format!("\"{}\"", s)
    }
}

/// Keep alt text from closing the image label early
fn escape_alt(alt: &str) -> String {
    alt.replace('[', "\\[").replace(']', "\\]")
}

/// Markdown exporter with configurable options
pub struct MarkdownFormatter {
    config: MarkdownExportConfig,
}

impl MarkdownFormatter {
    pub fn new(config: MarkdownExportConfig) -> Self {
        Self { config }
    }

    pub fn format(&self, article: &Article) -> String {
        convert_to_markdown_export(article, &self.config)
    }
}
