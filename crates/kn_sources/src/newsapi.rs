use async_trait::async_trait;
use kn_core::{Error, FetchResult, RawArticle, Result};
use serde::Deserialize;
use tracing::info;

use crate::NewsSource;

const DEFAULT_BASE_URL: &str = "https://newsapi.org";

/// Live source backed by the NewsAPI `everything` search endpoint. One
/// outbound request per fetch: English, most recent first, page size 20.
pub struct NewsApiSource {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl NewsApiSource {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    status: String,
    message: Option<String>,
    #[serde(rename = "totalResults")]
    total_results: Option<u64>,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    source: Option<NewsApiOutlet>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(rename = "urlToImage")]
    url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiOutlet {
    name: Option<String>,
}

impl From<NewsApiArticle> for RawArticle {
    fn from(article: NewsApiArticle) -> Self {
        RawArticle {
            title: article.title,
            url: article.url,
            description: article.description,
            content: article.content,
            image_url: article.url_to_image,
            source: article.source.and_then(|outlet| outlet.name),
            published_at: article.published_at,
        }
    }
}

#[async_trait]
impl NewsSource for NewsApiSource {
    fn name(&self) -> &str {
        "newsapi"
    }

    async fn fetch(&self, keyword: &str) -> Result<FetchResult> {
        let url = format!("{}/v2/everything", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", keyword),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", "20"),
                ("apiKey", &self.api_key),
            ])
            .send()
            .await?;

        let ok = response.status().is_success();
        let body: NewsApiResponse = response.json().await?;

        if !ok || body.status != "ok" {
            return Err(Error::Upstream(
                body.message
                    .unwrap_or_else(|| "upstream returned an error".to_string()),
            ));
        }

        info!(
            "News API returned {} articles for {:?}",
            body.articles.len(),
            keyword
        );

        // The live path always reports a total, zero when upstream is silent.
        Ok(FetchResult {
            articles: body.articles.into_iter().map(RawArticle::from).collect(),
            total_found: Some(body.total_results.unwrap_or(0)),
        })
    }
}
