use async_trait::async_trait;
use kn_core::{ArticleStore, CanonicalArticle, Result, ScrapeSession};
use serde::Deserialize;

/// PostgREST-style HTTP gateway: one POST per row against
/// `{endpoint}/rest/v1/{table}` with the service credential in the
/// `apikey` and `Authorization` headers.
pub struct RestStore {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct CreatedRow {
    id: String,
}

impl RestStore {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.endpoint, table)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(kn_core::Error::Storage(format!(
            "{action} failed with {status}: {body}"
        )))
    }
}

#[async_trait]
impl ArticleStore for RestStore {
    async fn create_scrape(&self, scrape: &ScrapeSession) -> Result<String> {
        let response = self
            .authed(self.client.post(self.table_url("scrapes")))
            .header("Prefer", "return=representation")
            .json(scrape)
            .send()
            .await?;

        let rows: Vec<CreatedRow> = Self::check(response, "create scrape").await?.json().await?;
        rows.into_iter()
            .next()
            .map(|row| row.id)
            .ok_or_else(|| kn_core::Error::Storage("gateway returned no scrape row".to_string()))
    }

    async fn insert_article(&self, article: &CanonicalArticle) -> Result<()> {
        let response = self
            .authed(self.client.post(self.table_url("articles")))
            .header("Prefer", "return=minimal")
            .json(article)
            .send()
            .await?;

        Self::check(response, "insert article").await?;
        Ok(())
    }

    async fn articles_for_scrape(&self, scrape_id: &str) -> Result<Vec<CanonicalArticle>> {
        let response = self
            .authed(self.client.get(self.table_url("articles")))
            .query(&[
                ("scrape_id", format!("eq.{scrape_id}")),
                ("order", "published_at.desc".to_string()),
            ])
            .send()
            .await?;

        Ok(Self::check(response, "load articles").await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let store = RestStore::new("https://db.example.com/".to_string(), "key".to_string());
        assert_eq!(
            store.table_url("articles"),
            "https://db.example.com/rest/v1/articles"
        );
    }
}
