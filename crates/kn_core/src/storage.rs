use async_trait::async_trait;

use crate::types::{CanonicalArticle, ScrapeSession};
use crate::Result;

/// Row-oriented persistence gateway. Articles are append-only: the service
/// inserts rows and reads nothing back except generated identifiers and,
/// for the results endpoint, the rows of a single scrape session.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Create a scrape session row and return its generated id.
    async fn create_scrape(&self, scrape: &ScrapeSession) -> Result<String>;

    /// Insert one article row.
    async fn insert_article(&self, article: &CanonicalArticle) -> Result<()>;

    /// All articles persisted under a scrape session, newest first.
    async fn articles_for_scrape(&self, scrape_id: &str) -> Result<Vec<CanonicalArticle>>;
}
