//! Library API integration tests
use unlocked_core::*;

const MIRROR_URL: &str = "https://freedium-mirror.cfd/https://medium.com/@jane.doe/understanding-ownership-in-rust-4f2a9c1b7e3d";

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

#[test]
fn test_parse_article_metadata() {
    let article = parse_article(&read_fixture("mirror_article.html"), MIRROR_URL).expect("should parse");

    assert_eq!(article.url(), MIRROR_URL);
    assert_eq!(article.title(), "Understanding Ownership in Rust");
    assert_eq!(article.author(), "Jane Doe");
    assert_eq!(article.date(), "2024-03-15T09:30:00Z");
    assert_eq!(
        article.canonical(),
        "https://medium.com/@jane.doe/understanding-ownership-in-rust-4f2a9c1b7e3d"
    );
}

#[test]
fn test_parse_article_body() {
    let article = parse_article(&read_fixture("mirror_article.html"), MIRROR_URL).expect("should parse");
    let body = article.markdown_body();

    assert!(body.starts_with("Ownership is the feature"));
    assert!(body.contains("## The three rules"));
    assert!(body.contains("**dropped**"));
    assert!(body.contains("[the book](https://doc.rust-lang.org/book/)"));
    assert!(body.contains("Moving a String between variables."));
    assert!(body.contains("| Type | Copy? |"));
    assert!(body.contains("| --- | --- |"));
    assert!(body.contains("| `String` | No |"));
    assert!(!body.contains("window.analytics"));
    assert!(!body.contains("miro.medium.com"));
    assert!(!body.contains("Dark mode"));
    assert!(!body.contains("Freedium team"));
}

#[test]
fn test_code_block_is_verbatim() {
    let article = parse_article(&read_fixture("mirror_article.html"), MIRROR_URL).expect("should parse");
    let expected = "```rust\nfn main() {\n    let s1 = String::from(\"hello\");\n    let s2 = s1;\n    \
                    // println!(\"{}\", s1); error: value borrowed here after move\n    \
                    println!(\"{} | {}\", s2, \"ok\");\n}\n```";

    assert!(article.markdown_body().contains(expected));
}

#[test]
fn test_images_in_document_order() {
    let article = parse_article(&read_fixture("mirror_article.html"), MIRROR_URL).expect("should parse");
    let images = article.images();

    assert_eq!(images.len(), 2);
    assert_eq!(images[0].src, "https://miro.medium.com/v2/resize:fit:700/ownership-diagram.png");
    assert_eq!(images[0].alt, "Ownership diagram");
    assert_eq!(images[1].src, "https://miro.medium.com/v2/resize:fit:700/borrowing.png");
    assert_eq!(images[1].alt, "");
}

#[test]
fn test_missing_container_fails() {
    let result = parse_article(&read_fixture("missing_container.html"), MIRROR_URL);

    match result {
        Err(err) => {
            assert!(matches!(err, UnlockedError::ContentNotFound { .. }));
            assert_eq!(err.kind(), ErrorKind::ContentNotFound);
        }
        Ok(_) => panic!("expected ContentNotFound"),
    }
}

#[test]
fn test_bare_container_uses_defaults() {
    let article = parse_article(&read_fixture("bare_container.html"), MIRROR_URL).expect("should parse");

    assert_eq!(article.title(), UNTITLED);
    assert_eq!(article.author(), UNKNOWN_AUTHOR);
    assert_eq!(article.date(), "");
    assert_eq!(article.canonical(), MIRROR_URL);
    assert!(article.images().is_empty());
    assert_eq!(article.markdown_body(), "Only a body, no title, author, date, or canonical link.");
}

#[test]
fn test_every_field_populated() {
    for fixture in ["mirror_article.html", "bare_container.html"] {
        let article = parse_article(&read_fixture(fixture), MIRROR_URL).expect("should parse");
        assert!(!article.url().is_empty());
        assert!(!article.title().is_empty());
        assert!(!article.author().is_empty());
        assert!(!article.canonical().is_empty());
        assert!(!article.scraped_at_rfc3339().is_empty());
    }
}

#[test]
fn test_parse_is_deterministic_apart_from_timestamp() {
    let html = read_fixture("mirror_article.html");
    let first = parse_article(&html, MIRROR_URL).unwrap();
    let second = parse_article(&html, MIRROR_URL).unwrap();

    assert_eq!(first.metadata(), second.metadata());
    assert_eq!(first.markdown_body(), second.markdown_body());
    assert_eq!(first.images(), second.images());
}

#[test]
fn test_unlocker_with_custom_config() {
    let config = UnlockedConfig::builder().body_selector(".byline").build();
    let article = Unlocker::with_config(config)
        .parse(&read_fixture("mirror_article.html"), MIRROR_URL)
        .expect("should parse");

    assert!(article.markdown_body().contains("Jane Doe"));
    assert!(article.images().is_empty());
}

#[test]
fn test_normalization_is_idempotent() {
    let once = to_mirror_url("https://medium.com/@a/post-1").unwrap();
    assert_eq!(to_mirror_url(&once).unwrap(), once);
    assert_eq!(to_mirror_url(MIRROR_URL).unwrap(), MIRROR_URL);
    assert!(matches!(to_mirror_url("https://example.com/post"), Err(UnlockedError::InvalidUrl(_))));
}

#[test]
fn test_exports_from_fixture() {
    let article = parse_article(&read_fixture("mirror_article.html"), MIRROR_URL).unwrap();

    let markdown = render(&article, OutputFormat::Markdown).unwrap();
    assert!(markdown.starts_with("# Understanding Ownership in Rust\n"));
    assert!(markdown.contains("*By Jane Doe*"));
    assert!(markdown.contains("*Published: 2024-03-15T09:30:00Z*"));

    let html = render(&article, OutputFormat::Html).unwrap();
    assert!(html.contains("<title>Understanding Ownership in Rust</title>"));
    assert!(html.contains("<table>"));
    assert!(html.contains("<code class=\"language-rust\">"));

    let json = render(&article, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["author"], "Jane Doe");
    assert_eq!(value["images"].as_array().unwrap().len(), 2);
    assert_eq!(value["markdown_body"], article.markdown_body());
}

#[test]
fn test_write_export_from_fixture() {
    let article = parse_article(&read_fixture("mirror_article.html"), MIRROR_URL).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let path = write_export(dir.path(), &article, OutputFormat::Html).unwrap();

    assert_eq!(path.file_name().unwrap(), "Understanding Ownership in Rust.html");
    assert!(std::fs::read_to_string(path).unwrap().starts_with("<!DOCTYPE html>"));
}

#[test]
fn test_share_link_round_trip() {
    let original = "https://medium.com/@jane.doe/understanding-ownership-in-rust-4f2a9c1b7e3d";
    let link = share_link("https://medium-unlocked.streamlit.app", original).unwrap();
    assert_eq!(url_from_share_link(&link).as_deref(), Some(original));
}

#[cfg(feature = "fetch")]
mod fetch {
    use super::*;
    use mockito::Matcher;

    fn unlocker_for(server: &mockito::Server) -> Unlocker {
        let config = UnlockedConfig::builder().mirror_base(format!("{}/", server.url())).timeout(5).build();
        Unlocker::with_config(config)
    }

    #[tokio::test]
    async fn test_fetch_and_parse_through_mirror() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Regex(r"medium\.com/@jane\.doe/post$".to_string()))
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(read_fixture("mirror_article.html"))
            .create_async()
            .await;

        let article = unlocker_for(&server)
            .fetch_and_parse("https://medium.com/@jane.doe/post")
            .await
            .expect("should fetch");

        mock.assert_async().await;
        assert_eq!(article.url(), format!("{}/https://medium.com/@jane.doe/post", server.url()));
        assert_eq!(article.title(), "Understanding Ownership in Rust");
        assert_eq!(article.images().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", Matcher::Any).with_status(404).create_async().await;

        let result = unlocker_for(&server).fetch_and_parse("https://medium.com/@a/missing").await;

        match result {
            Err(err) => {
                assert!(matches!(err, UnlockedError::HttpStatus { status: 404, .. }));
                assert!(err.is_fetch_failure());
            }
            Ok(_) => panic!("expected HttpStatus"),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_without_container() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", Matcher::Any)
            .with_status(200)
            .with_body(read_fixture("missing_container.html"))
            .create_async()
            .await;

        let result = unlocker_for(&server).fetch_and_parse("https://medium.com/@a/b").await;
        assert!(matches!(result, Err(UnlockedError::ContentNotFound { .. })));
    }

    #[tokio::test]
    async fn test_fetch_url_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/page").with_status(200).with_body("<p>hi</p>").create_async().await;

        let html = fetch_url(&format!("{}/page", server.url()), &FetchConfig::default()).await.unwrap();
        assert_eq!(html, "<p>hi</p>");
    }

    #[tokio::test]
    async fn test_invalid_url_never_reaches_network() {
        let server = mockito::Server::new_async().await;
        let result = unlocker_for(&server).fetch_and_parse("https://example.com/not-medium").await;
        assert!(matches!(result, Err(UnlockedError::InvalidUrl(_))));
    }
}
