use std::collections::HashMap;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use kn_core::Error;
use kn_sources::{NewsApiSource, NewsSource};
use serde_json::{json, Value};

/// Serves the router on an ephemeral local port and returns its base URL.
async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn fetch_sends_expected_query_and_maps_records() {
    // The stub echoes the received query parameters back through article
    // fields, so one round trip checks both request assembly and mapping.
    async fn everything(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        Json(json!({
            "status": "ok",
            "totalResults": 42,
            "articles": [{
                "source": {"id": null, "name": params.get("language")},
                "title": params.get("q"),
                "description": params.get("sortBy"),
                "url": params.get("apiKey"),
                "content": params.get("pageSize"),
                "urlToImage": null,
                "publishedAt": "2024-05-04T09:30:00Z"
            }]
        }))
    }

    let base = spawn_upstream(Router::new().route("/v2/everything", get(everything))).await;
    let source = NewsApiSource::with_base_url("test-key".to_string(), base);

    let result = source.fetch("climate change").await.unwrap();

    assert_eq!(result.total_found, Some(42));
    assert_eq!(result.articles.len(), 1);
    let raw = &result.articles[0];
    assert_eq!(raw.title.as_deref(), Some("climate change"));
    assert_eq!(raw.source.as_deref(), Some("en"));
    assert_eq!(raw.description.as_deref(), Some("publishedAt"));
    assert_eq!(raw.url.as_deref(), Some("test-key"));
    assert_eq!(raw.content.as_deref(), Some("20"));
    assert_eq!(raw.published_at.as_deref(), Some("2024-05-04T09:30:00Z"));
}

#[tokio::test]
async fn non_2xx_response_surfaces_the_upstream_message() {
    async fn everything() -> (StatusCode, Json<Value>) {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "status": "error",
                "code": "apiKeyInvalid",
                "message": "Your API key is invalid"
            })),
        )
    }

    let base = spawn_upstream(Router::new().route("/v2/everything", get(everything))).await;
    let source = NewsApiSource::with_base_url("bad-key".to_string(), base);

    let err = source.fetch("climate").await.unwrap_err();
    assert!(matches!(err, Error::Upstream(_)));
    assert_eq!(err.to_string(), "News API error: Your API key is invalid");
}

#[tokio::test]
async fn error_status_in_2xx_body_is_surfaced() {
    async fn everything() -> Json<Value> {
        Json(json!({
            "status": "error",
            "code": "rateLimited",
            "message": "You have made too many requests"
        }))
    }

    let base = spawn_upstream(Router::new().route("/v2/everything", get(everything))).await;
    let source = NewsApiSource::with_base_url("key".to_string(), base);

    let err = source.fetch("climate").await.unwrap_err();
    assert_eq!(err.to_string(), "News API error: You have made too many requests");
}

#[tokio::test]
async fn missing_total_results_reports_zero() {
    async fn everything() -> Json<Value> {
        Json(json!({"status": "ok", "articles": []}))
    }

    let base = spawn_upstream(Router::new().route("/v2/everything", get(everything))).await;
    let source = NewsApiSource::with_base_url("key".to_string(), base);

    let result = source.fetch("climate").await.unwrap();
    assert_eq!(result.total_found, Some(0));
    assert!(result.articles.is_empty());
}
