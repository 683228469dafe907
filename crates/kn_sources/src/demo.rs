use async_trait::async_trait;
use chrono::{Duration, Utc};
use kn_core::{FetchResult, RawArticle, Result};

use crate::NewsSource;

/// Deterministic canned source used when no news API credential is
/// configured. Always yields exactly three records interpolating the
/// keyword, timestamped now, two hours ago and four hours ago.
#[derive(Debug, Clone, Default)]
pub struct DemoSource;

impl DemoSource {
    pub fn new() -> Self {
        Self
    }
}

fn slug(keyword: &str) -> String {
    keyword
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[async_trait]
impl NewsSource for DemoSource {
    fn name(&self) -> &str {
        "demo"
    }

    async fn fetch(&self, keyword: &str) -> Result<FetchResult> {
        let now = Utc::now();
        let slug = slug(keyword);

        let articles = vec![
            RawArticle {
                title: Some(format!("Breaking: Latest Updates on {keyword}")),
                url: Some(format!("https://example.com/news/{slug}")),
                description: Some(format!(
                    "This is a demo article about {keyword}. In a real implementation, \
                     this would contain actual scraped news content from various sources \
                     providing comprehensive coverage of the topic."
                )),
                image_url: Some(
                    "https://images.unsplash.com/photo-1504711434969-e33886168f5c?w=800&h=400&fit=crop"
                        .to_string(),
                ),
                source: Some("Demo Source".to_string()),
                published_at: Some(now.to_rfc3339()),
                content: None,
            },
            RawArticle {
                title: Some(format!("Analysis: The Impact of {keyword} on Global Markets")),
                url: Some(format!("https://example.com/analysis/{slug}")),
                description: Some(format!(
                    "Expert analysis on how {keyword} is affecting various sectors. \
                     This demo article would typically contain insights from industry \
                     experts and market analysts."
                )),
                image_url: Some(
                    "https://images.unsplash.com/photo-1611224923853-80b023f02d71?w=800&h=400&fit=crop"
                        .to_string(),
                ),
                source: Some("Market Analysis Demo".to_string()),
                published_at: Some((now - Duration::hours(2)).to_rfc3339()),
                content: None,
            },
            RawArticle {
                title: Some(format!("Opinion: What {keyword} Means for the Future")),
                url: Some(format!("https://example.com/opinion/{slug}")),
                description: Some(format!(
                    "A thoughtful opinion piece exploring the long-term implications \
                     of {keyword}. This demo content represents the type of editorial \
                     coverage you would receive."
                )),
                image_url: Some(
                    "https://images.unsplash.com/photo-1586339949916-3e9457bef6d3?w=800&h=400&fit=crop"
                        .to_string(),
                ),
                source: Some("Editorial Demo".to_string()),
                published_at: Some((now - Duration::hours(4)).to_rfc3339()),
                content: None,
            },
        ];

        Ok(FetchResult {
            articles,
            total_found: None,
        })
    }

    fn advisory(&self) -> Option<&'static str> {
        Some("Demo articles returned. Add NEWS_API_KEY to get real news data.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_three_keyword_interpolated_records() {
        let result = DemoSource::new().fetch("climate").await.unwrap();

        assert_eq!(result.articles.len(), 3);
        for raw in &result.articles {
            assert!(raw.title.as_deref().unwrap().contains("climate"));
        }
    }

    #[tokio::test]
    async fn url_slug_is_lowercase_hyphenated() {
        let result = DemoSource::new().fetch("Climate Change").await.unwrap();

        assert_eq!(
            result.articles[0].url.as_deref().unwrap(),
            "https://example.com/news/climate-change"
        );
    }

    #[tokio::test]
    async fn timestamps_step_back_two_hours_each() {
        let result = DemoSource::new().fetch("energy").await.unwrap();

        let times: Vec<_> = result
            .articles
            .iter()
            .map(|raw| raw.published_at.as_deref().unwrap().to_string())
            .collect();
        assert!(times[0] > times[1]);
        assert!(times[1] > times[2]);
    }
}
