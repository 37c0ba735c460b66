use html_escape::{encode_double_quoted_attribute, encode_text};
use pulldown_cmark::{Options, Parser, html};

use crate::article::Article;

const STYLESHEET: &str = r#"body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    max-width: 800px;
    margin: 40px auto;
    padding: 0 20px;
    line-height: 1.7;
    color: #222;
}
h1 { color: #ff6347; }
.meta { color: #666; font-size: 0.9em; margin-bottom: 30px; }
img { max-width: 100%; border-radius: 8px; margin: 20px 0; }
pre { background: #f4f4f4; padding: 15px; border-radius: 8px; overflow-x: auto; }
code { background: #eee; padding: 3px 6px; border-radius: 4px; }
pre code { background: none; padding: 0; }
table { border-collapse: collapse; }
th, td { border: 1px solid #ddd; padding: 6px 10px; }"#;

/// Render Markdown to an HTML fragment (tables and strikethrough enabled)
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

/// The metadata block shown under the title
pub fn meta_block(article: &Article) -> String {
    let mut meta = format!("By {}<br>\n", encode_text(article.author()));

    if !article.date().is_empty() {
        meta.push_str(&format!("Published: {}<br>\n", encode_text(article.date())));
    }

    meta.push_str(&format!(
        "Source: <a href=\"{}\">{}</a>",
        encode_double_quoted_attribute(article.canonical()),
        encode_text(article.canonical())
    ));

    format!("<div class=\"meta\">\n{}\n</div>", meta)
}

/// Render an article as a standalone, styled HTML document
pub fn convert_to_html(article: &Article) -> String {
    let title = encode_text(article.title());
    let body = markdown_to_html(article.markdown_body());

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>\n{stylesheet}\n</style>\n</head>\n<body>\n\n\
         <h1>{title}</h1>\n{meta}\n\n{body}\n</body>\n</html>\n",
        title = title,
        stylesheet = STYLESHEET,
        meta = meta_block(article),
        body = body,
    )
}

/// HTML formatter
pub struct HtmlFormatter;

impl HtmlFormatter {
    pub fn format(&self, article: &Article) -> String {
        convert_to_html(article)
    }
}
