use async_trait::async_trait;
use kn_core::{ArticleStore, CanonicalArticle, Result, ScrapeSession};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory store for tests and credential-less local runs. Rows only
/// ever get appended, mirroring the durable backends.
#[derive(Default)]
pub struct MemoryStore {
    scrapes: RwLock<Vec<(String, ScrapeSession)>>,
    articles: RwLock<Vec<CanonicalArticle>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn scrape_count(&self) -> usize {
        self.scrapes.read().await.len()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn create_scrape(&self, scrape: &ScrapeSession) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.scrapes.write().await.push((id.clone(), scrape.clone()));
        Ok(id)
    }

    async fn insert_article(&self, article: &CanonicalArticle) -> Result<()> {
        self.articles.write().await.push(article.clone());
        Ok(())
    }

    async fn articles_for_scrape(&self, scrape_id: &str) -> Result<Vec<CanonicalArticle>> {
        let mut articles: Vec<_> = self
            .articles
            .read()
            .await
            .iter()
            .filter(|article| article.scrape_id == scrape_id)
            .cloned()
            .collect();
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(articles)
    }
}
