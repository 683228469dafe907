use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use kn_core::{CanonicalArticle, ScrapeRequest, ScrapeSession};
use kn_sources::ScrapeReport;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::AppState;

const FAILURE_DETAILS: &str = "Check the server logs for more details";

/// Wire envelope for the scrape endpoint. Success and failure share the
/// shape; absent fields are dropped from the JSON.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub articles: Option<Vec<CanonicalArticle>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_found: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ScrapeResponse {
    fn success(report: ScrapeReport) -> Self {
        Self {
            success: true,
            articles: Some(report.articles),
            total_found: report.total_found,
            message: report.message,
            error: None,
            details: None,
        }
    }

    fn failure(message: String) -> Self {
        Self {
            success: false,
            articles: None,
            total_found: None,
            message: None,
            error: Some(message),
            details: Some(FAILURE_DETAILS.to_string()),
        }
    }
}

/// Top-level scrape handler: every failure, validation included, becomes a
/// 500 failure envelope rather than propagating past this boundary.
pub async fn scrape(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScrapeRequest>,
) -> impl IntoResponse {
    match state.service.scrape(&request).await {
        Ok(report) => (StatusCode::OK, Json(ScrapeResponse::success(report))),
        Err(e) => {
            error!("scrape failed for keyword {:?}: {e}", request.keyword);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ScrapeResponse::failure(e.to_string())),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScrapeRequest {
    pub keyword: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateScrapeResponse {
    pub id: String,
}

pub async fn create_scrape(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateScrapeRequest>,
) -> impl IntoResponse {
    let session = ScrapeSession {
        keyword: request.keyword,
        source: state.service.source_name().to_string(),
        user_id: request.user_id,
    };

    match state.store.create_scrape(&session).await {
        Ok(id) => (StatusCode::OK, Json(CreateScrapeResponse { id })).into_response(),
        Err(e) => {
            error!("failed to create scrape session: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ScrapeResponse::failure(e.to_string())),
            )
                .into_response()
        }
    }
}

pub async fn scrape_articles(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.articles_for_scrape(&id).await {
        Ok(articles) => (StatusCode::OK, Json(articles)).into_response(),
        Err(e) => {
            error!("failed to load articles for scrape {id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ScrapeResponse::failure(e.to_string())),
            )
                .into_response()
        }
    }
}
