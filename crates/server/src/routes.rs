use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use unlocked_core::{Article, OutputFormat, Unlocker, export_filename, render, share_link};

use crate::error::AppError;
use crate::pages::{PageBody, index_page};

/// Upper bound on a whole request, fetch included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared by every handler; the pipeline itself keeps no request state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub unlocker: Unlocker,
    /// Front end that share links point at.
    pub share_base: String,
}

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    url: String,
    format: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ArticleQuery {
    url: String,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/export", get(export))
        .route("/api/article", get(article))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::with_status_code(StatusCode::GATEWAY_TIMEOUT, REQUEST_TIMEOUT)),
        )
        .with_state(Arc::new(state))
}

/// Form page; a `url` parameter (as carried by share links) pre-fills the
/// form and previews the article.
async fn index(State(state): State<Arc<AppState>>, Query(query): Query<IndexQuery>) -> Response {
    let input_url = query.url.as_deref().map(str::trim).unwrap_or_default();
    if input_url.is_empty() {
        return Html(index_page("", &PageBody::Empty)).into_response();
    }

    match state.unlocker.fetch_and_parse(input_url).await {
        Ok(article) => {
            let share_link = share_link(&state.share_base, input_url).ok();
            let body = PageBody::Preview { article: &article, input_url, share_link };
            Html(index_page(input_url, &body)).into_response()
        }
        Err(err) => {
            let err = AppError::from(err);
            let page = index_page(input_url, &PageBody::Error(&err.message()));
            (err.status(), Html(page)).into_response()
        }
    }
}

async fn export(State(state): State<Arc<AppState>>, Query(query): Query<ExportQuery>) -> Result<Response, AppError> {
    let format = match query.format.as_deref() {
        Some(format) => format.parse::<OutputFormat>().map_err(AppError::BadRequest)?,
        None => OutputFormat::Markdown,
    };

    let article = state.unlocker.fetch_and_parse(&query.url).await?;
    let content = render(&article, format)?;
    let filename = export_filename(&article, format);
    info!(url = article.url(), file = %filename, "serving export");

    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static(format.mime_type())),
        (header::CONTENT_DISPOSITION, content_disposition(&filename)),
    ];
    Ok((headers, content).into_response())
}

/// Attachment header naming the export file. Non-ASCII titles go out as
/// raw UTF-8; a name that still cannot form a header falls back to a bare
/// `attachment`.
fn content_disposition(filename: &str) -> HeaderValue {
    HeaderValue::from_bytes(format!("attachment; filename=\"{}\"", filename).as_bytes())
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

async fn article(State(state): State<Arc<AppState>>, Query(query): Query<ArticleQuery>) -> Result<Json<Article>, AppError> {
    Ok(Json(state.unlocker.fetch_and_parse(&query.url).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;
    use unlocked_core::UnlockedConfig;
    use url::form_urlencoded;

    const MEDIUM_URL: &str = "https://medium.com/@jane.doe/understanding-ownership";

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
    }

    fn app_with_mirror(mirror: &str) -> Router {
        let config = UnlockedConfig::builder().mirror_base(format!("{}/", mirror)).timeout(5).build();
        create_app(AppState { unlocker: Unlocker::with_config(config), share_base: "https://share.test".to_string() })
    }

    fn default_app() -> Router {
        create_app(AppState { unlocker: Unlocker::new(), share_base: "https://share.test".to_string() })
    }

    fn uri(path: &str, pairs: &[(&str, &str)]) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (key, value) in pairs {
            query.append_pair(key, value);
        }
        format!("{}?{}", path, query.finish())
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = app.oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn mirror_serving(body: String, status: usize) -> (mockito::ServerGuard, mockito::Mock) {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(status)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(body)
            .create_async()
            .await;
        (server, mock)
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let (status, headers, body) = get(default_app(), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
        assert!(body.contains("<form method=\"get\" action=\"/\">"));
        assert!(!body.contains("class=\"error\""));
    }

    #[tokio::test]
    async fn test_index_shows_invalid_url_error() {
        let (status, _, body) = get(default_app(), &uri("/", &[("url", "https://example.com/post")])).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("class=\"error\""));
        assert!(body.contains("value=\"https://example.com/post\""));
    }

    #[tokio::test]
    async fn test_index_previews_shared_article() {
        let (server, _mock) = mirror_serving(fixture("mirror_article.html"), 200).await;
        let (status, _, body) = get(app_with_mirror(&server.url()), &uri("/", &[("url", MEDIUM_URL)])).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h2>Understanding Ownership in Rust</h2>"));
        assert!(body.contains("By Jane Doe"));
        assert!(body.contains("Share: <a href=\"https://share.test/?url=https%3A%2F%2Fmedium.com"));
        assert!(body.contains("<figure class=\"qr\">\n<svg"));
        assert!(body.contains("/export?url="));
        assert!(body.contains("<table>"));
    }

    #[tokio::test]
    async fn test_api_article_json() {
        let (server, _mock) = mirror_serving(fixture("mirror_article.html"), 200).await;
        let (status, _, body) = get(app_with_mirror(&server.url()), &uri("/api/article", &[("url", MEDIUM_URL)])).await;

        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["title"], "Understanding Ownership in Rust");
        assert_eq!(value["url"], format!("{}/{}", server.url(), MEDIUM_URL));
        assert_eq!(value["images"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_api_article_invalid_url() {
        let (status, _, body) = get(default_app(), &uri("/api/article", &[("url", "https://example.com/x")])).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(value["error"].as_str().unwrap().contains("medium.com"));
    }

    #[tokio::test]
    async fn test_api_article_missing_container() {
        let (server, _mock) = mirror_serving(fixture("missing_container.html"), 200).await;
        let (status, _, body) = get(app_with_mirror(&server.url()), &uri("/api/article", &[("url", MEDIUM_URL)])).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("main-content"));
    }

    #[tokio::test]
    async fn test_api_article_upstream_failure() {
        let (server, _mock) = mirror_serving(String::new(), 500).await;
        let (status, _, _) = get(app_with_mirror(&server.url()), &uri("/api/article", &[("url", MEDIUM_URL)])).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_export_attachment() {
        let (server, _mock) = mirror_serving(fixture("mirror_article.html"), 200).await;
        let target = uri("/export", &[("url", MEDIUM_URL), ("format", "html")]);
        let (status, headers, body) = get(app_with_mirror(&server.url()), &target).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Understanding Ownership in Rust.html\""
        );
        assert!(body.starts_with("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_export_multiline_title() {
        let page = r#"<html><body>
            <h1>Understanding
    Ownership</h1>
            <div class="main-content"><p>Body text.</p></div>
        </body></html>"#;
        let (server, _mock) = mirror_serving(page.to_string(), 200).await;
        let target = uri("/export", &[("url", MEDIUM_URL), ("format", "html")]);
        let (status, headers, body) = get(app_with_mirror(&server.url()), &target).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_DISPOSITION], "attachment; filename=\"Understanding Ownership.html\"");
        assert!(body.contains("<title>Understanding Ownership</title>"));
    }

    #[test]
    fn test_content_disposition_non_ascii() {
        let value = content_disposition("Café résumé.md");
        assert_eq!(value.as_bytes(), "attachment; filename=\"Café résumé.md\"".as_bytes());
        assert_eq!(content_disposition("a\nb"), "attachment");
    }

    #[tokio::test]
    async fn test_export_defaults_to_markdown() {
        let (server, _mock) = mirror_serving(fixture("mirror_article.html"), 200).await;
        let (status, headers, body) = get(app_with_mirror(&server.url()), &uri("/export", &[("url", MEDIUM_URL)])).await;

        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_DISPOSITION].to_str().unwrap().ends_with(".md\""));
        assert!(body.starts_with("# Understanding Ownership in Rust"));
    }

    #[tokio::test]
    async fn test_export_rejects_unknown_format() {
        let target = uri("/export", &[("url", MEDIUM_URL), ("format", "pdf")]);
        let (status, _, body) = get(default_app(), &target).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Invalid format"));
    }
}
