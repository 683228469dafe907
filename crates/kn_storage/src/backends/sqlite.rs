use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kn_core::{ArticleStore, CanonicalArticle, Result, ScrapeSession};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;
use uuid::Uuid;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS scrapes (
        id TEXT PRIMARY KEY,
        keyword TEXT NOT NULL,
        source TEXT NOT NULL,
        user_id TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id TEXT PRIMARY KEY,
        scrape_id TEXT NOT NULL REFERENCES scrapes(id),
        title TEXT NOT NULL,
        url TEXT NOT NULL,
        summary TEXT NOT NULL,
        image_url TEXT,
        source TEXT NOT NULL,
        published_at TEXT NOT NULL
    )
    "#,
];

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!(
            "sqlite:{}",
            db_path.as_ref().display()
        ))
        .map_err(|e| kn_core::Error::Storage(format!("Invalid database path: {e}")))?
        .create_if_missing(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| kn_core::Error::Storage(format!("Failed to connect to database: {e}")))?;

        Self::with_pool(pool).await
    }

    pub async fn with_pool(pool: SqlitePool) -> Result<Self> {
        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| kn_core::Error::Storage(format!("Failed to run migration {i}: {e}")))?;
        }
        Ok(Self { pool })
    }
}

#[async_trait]
impl ArticleStore for SqliteStore {
    async fn create_scrape(&self, scrape: &ScrapeSession) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO scrapes (id, keyword, source, user_id) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(&scrape.keyword)
            .bind(&scrape.source)
            .bind(scrape.user_id.as_deref())
            .execute(&self.pool)
            .await
            .map_err(|e| kn_core::Error::Storage(format!("Failed to create scrape: {e}")))?;
        Ok(id)
    }

    async fn insert_article(&self, article: &CanonicalArticle) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO articles
            (id, scrape_id, title, url, summary, image_url, source, published_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&article.scrape_id)
        .bind(&article.title)
        .bind(&article.url)
        .bind(&article.summary)
        .bind(article.image_url.as_deref())
        .bind(&article.source)
        .bind(article.published_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| kn_core::Error::Storage(format!("Failed to store article: {e}")))?;

        Ok(())
    }

    async fn articles_for_scrape(&self, scrape_id: &str) -> Result<Vec<CanonicalArticle>> {
        let rows = sqlx::query(
            r#"
            SELECT scrape_id, title, url, summary, image_url, source, published_at
            FROM articles
            WHERE scrape_id = ?
            ORDER BY published_at DESC
            "#,
        )
        .bind(scrape_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| kn_core::Error::Storage(format!("Failed to load articles: {e}")))?;

        rows.into_iter()
            .map(|row| {
                let published_at: String = row.get("published_at");
                let published_at = DateTime::parse_from_rfc3339(&published_at)
                    .map_err(|e| kn_core::Error::Storage(format!("Bad timestamp in row: {e}")))?
                    .with_timezone(&Utc);

                Ok(CanonicalArticle {
                    title: row.get("title"),
                    url: row.get("url"),
                    summary: row.get("summary"),
                    image_url: row.get("image_url"),
                    source: row.get("source"),
                    published_at,
                    scrape_id: row.get("scrape_id"),
                })
            })
            .collect()
    }
}
