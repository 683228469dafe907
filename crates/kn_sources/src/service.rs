use std::sync::Arc;

use kn_core::{
    normalize, ArticleStore, CanonicalArticle, Error, Result, ScrapeConfig, ScrapeRequest,
};
use tracing::info;

use crate::{DemoSource, NewsApiSource, NewsSource};

/// Cap on how many live records get normalized and persisted per scrape.
/// The demo source stays under it by construction.
const MAX_ARTICLES_PER_SCRAPE: usize = 12;

/// Outcome of one successful scrape invocation.
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    pub articles: Vec<CanonicalArticle>,
    pub total_found: Option<u64>,
    pub message: Option<String>,
}

/// Orchestrates one scrape: validate the request, fetch from the selected
/// source, normalize each record and insert rows one at a time. Inserts are
/// sequential and untransacted; a mid-loop failure leaves earlier rows in
/// place.
pub struct ScrapeService {
    source: Arc<dyn NewsSource>,
    store: Arc<dyn ArticleStore>,
}

impl ScrapeService {
    pub fn new(source: Arc<dyn NewsSource>, store: Arc<dyn ArticleStore>) -> Self {
        Self { source, store }
    }

    /// Picks the live source when a news API credential is configured,
    /// the demo source otherwise.
    pub fn from_config(config: &ScrapeConfig, store: Arc<dyn ArticleStore>) -> Self {
        let source: Arc<dyn NewsSource> = match &config.news_api_key {
            Some(key) => Arc::new(NewsApiSource::new(key.clone())),
            None => Arc::new(DemoSource::new()),
        };
        Self::new(source, store)
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeReport> {
        if request.keyword.trim().is_empty() || request.scrape_id.trim().is_empty() {
            return Err(Error::Validation("keyword and scrapeId".to_string()));
        }

        info!(
            "starting news scrape for keyword {:?}, scrapeId {}",
            request.keyword, request.scrape_id
        );

        let fetched = self.source.fetch(&request.keyword).await?;
        info!(
            "source {} returned {} records",
            self.source.name(),
            fetched.articles.len()
        );

        let mut articles = Vec::new();
        for raw in fetched.articles.iter().take(MAX_ARTICLES_PER_SCRAPE) {
            let article = normalize(raw, &request.scrape_id);
            self.store.insert_article(&article).await?;
            articles.push(article);
        }

        info!(
            "stored {} articles for keyword {:?}",
            articles.len(),
            request.keyword
        );

        Ok(ScrapeReport {
            articles,
            total_found: fetched.total_found,
            message: self.source.advisory().map(String::from),
        })
    }
}
