//! Server-rendered HTML for the front page.

use html_escape::{encode_double_quoted_attribute, encode_text};
use unlocked_core::formatters::markdown_to_html;
use tracing::warn;
use unlocked_core::{Article, OutputFormat, qr_svg};
use url::form_urlencoded;

const PAGE_STYLE: &str = r#"body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    max-width: 800px;
    margin: 40px auto;
    padding: 0 20px;
    line-height: 1.7;
    color: #222;
}
h1 { color: #ff6347; }
form { display: flex; gap: 8px; margin-bottom: 30px; }
input[type=url] { flex: 1; padding: 8px; font-size: 1em; }
.meta { color: #666; font-size: 0.9em; }
.downloads a { margin-right: 12px; }
.share { word-break: break-all; font-size: 0.9em; }
.qr svg { width: 180px; height: 180px; }
.qr figcaption { color: #666; font-size: 0.85em; }
.error { color: #b00020; background: #fdecea; padding: 12px; border-radius: 8px; }
article img { max-width: 100%; }
pre { background: #f4f4f4; padding: 15px; border-radius: 8px; overflow-x: auto; }
table { border-collapse: collapse; }
th, td { border: 1px solid #ddd; padding: 6px 10px; }"#;

/// What the front page shows under the form.
pub enum PageBody<'a> {
    Empty,
    Preview { article: &'a Article, input_url: &'a str, share_link: Option<String> },
    Error(&'a str),
}

/// Link to the export endpoint for `input_url` in `format`.
pub fn export_href(input_url: &str, format: OutputFormat) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("url", input_url)
        .append_pair("format", format.extension())
        .finish();
    format!("/export?{}", query)
}

/// The complete front page.
pub fn index_page(input_url: &str, body: &PageBody<'_>) -> String {
    let content = match body {
        PageBody::Empty => String::new(),
        PageBody::Preview { article, input_url, share_link } => preview(article, input_url, share_link.as_deref()),
        PageBody::Error(message) => format!("<p class=\"error\">{}</p>", encode_text(message)),
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Unlocked</title>\n<style>\n{style}\n</style>\n</head>\n<body>\n\
         <h1>Unlocked</h1>\n<p>Read and export Medium articles through a freedium mirror.</p>\n\
         <form method=\"get\" action=\"/\">\n\
         <input type=\"url\" name=\"url\" value=\"{value}\" placeholder=\"https://medium.com/@author/story\" required>\n\
         <button type=\"submit\">Unlock</button>\n</form>\n{content}\n</body>\n</html>\n",
        style = PAGE_STYLE,
        value = encode_double_quoted_attribute(input_url),
        content = content,
    )
}

fn preview(article: &Article, input_url: &str, share_link: Option<&str>) -> String {
    let mut html = format!(
        "<h2>{}</h2>\n<p class=\"meta\">By {}",
        encode_text(article.title()),
        encode_text(article.author())
    );
    if !article.date().is_empty() {
        html.push_str(&format!(" · Published {}", encode_text(article.date())));
    }
    html.push_str(&format!(
        "<br>\nSource: <a href=\"{}\">{}</a></p>\n",
        encode_double_quoted_attribute(article.canonical()),
        encode_text(article.canonical())
    ));

    html.push_str("<p class=\"downloads\">Download:");
    let formats = [(OutputFormat::Html, "HTML"), (OutputFormat::Markdown, "Markdown"), (OutputFormat::Json, "JSON")];
    for (format, label) in formats {
        html.push_str(&format!(
            " <a href=\"{}\">{}</a>",
            encode_double_quoted_attribute(&export_href(input_url, format)),
            label
        ));
    }
    html.push_str("</p>\n");

    if let Some(link) = share_link {
        html.push_str(&format!(
            "<p class=\"share\">Share: <a href=\"{0}\">{1}</a></p>\n",
            encode_double_quoted_attribute(link),
            encode_text(link)
        ));
        match qr_svg(link) {
            Ok(svg) => html.push_str(&format!(
                "<figure class=\"qr\">\n{}\n<figcaption>Scan to open this article on another device</figcaption>\n</figure>\n",
                svg
            )),
            Err(err) => warn!(error = %err, "skipping share qr code"),
        }
    }

    html.push_str(&format!("<hr>\n<article>\n{}</article>", markdown_to_html(article.markdown_body())));
    html
}
