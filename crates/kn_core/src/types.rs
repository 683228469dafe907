use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inbound scrape request. The scrape id references a previously created
/// scrape session row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub scrape_id: String,
}

/// Raw article record as returned by a news source, before normalization.
/// Every field is optional; sources fill what they have.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawArticle {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub source: Option<String>,
    pub published_at: Option<String>,
}

/// Normalized article shape, as persisted and returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalArticle {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub image_url: Option<String>,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub scrape_id: String,
}

/// Owning scrape session record that persisted articles reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeSession {
    pub keyword: String,
    pub source: String,
    pub user_id: Option<String>,
}

/// What a news source returns for one keyword search: the raw records plus
/// the upstream's reported total match count, when it reports one.
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    pub articles: Vec<RawArticle>,
    pub total_found: Option<u64>,
}
