use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use kn_core::{ArticleStore, ScrapeConfig, ScrapeRequest, ScrapeSession};
use kn_sources::ScrapeService;
use kn_storage::{MemoryStore, RestStore, SqliteStore};
use kn_web::{create_app, AppState};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "kn", about = "Keyword news scrape service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StorageKind {
    Memory,
    Sqlite,
    Rest,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        addr: String,
        #[arg(long, value_enum, default_value_t = StorageKind::Memory)]
        storage: StorageKind,
        /// SQLite database path, used with --storage sqlite
        #[arg(long, default_value = "articles.db")]
        db_path: PathBuf,
    },
    /// Create a scrape session and run a one-shot keyword scrape
    Scrape {
        keyword: String,
        #[arg(long, value_enum, default_value_t = StorageKind::Memory)]
        storage: StorageKind,
        #[arg(long, default_value = "articles.db")]
        db_path: PathBuf,
    },
}

async fn build_store(
    kind: StorageKind,
    db_path: &PathBuf,
    config: &ScrapeConfig,
) -> anyhow::Result<Arc<dyn ArticleStore>> {
    match kind {
        StorageKind::Memory => Ok(Arc::new(MemoryStore::new())),
        StorageKind::Sqlite => {
            let store = SqliteStore::new(db_path)
                .await
                .with_context(|| format!("opening sqlite store at {}", db_path.display()))?;
            Ok(Arc::new(store))
        }
        StorageKind::Rest => {
            let (Some(url), Some(key)) = (&config.persistence_url, &config.persistence_key) else {
                bail!("--storage rest requires PERSISTENCE_URL and PERSISTENCE_KEY");
            };
            Ok(Arc::new(RestStore::new(url.clone(), key.clone())))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();
    let config = ScrapeConfig::from_env();

    match cli.command {
        Commands::Serve {
            addr,
            storage,
            db_path,
        } => {
            let store = build_store(storage, &db_path, &config).await?;
            let service = ScrapeService::from_config(&config, store.clone());
            info!(
                "serving with {} source and {:?} storage",
                service.source_name(),
                storage
            );

            let app = create_app(AppState::new(service, store)).await;
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!("listening on {addr}");
            axum::serve(listener, app).await?;
        }
        Commands::Scrape {
            keyword,
            storage,
            db_path,
        } => {
            let store = build_store(storage, &db_path, &config).await?;
            let service = ScrapeService::from_config(&config, store.clone());

            let scrape_id = store
                .create_scrape(&ScrapeSession {
                    keyword: keyword.clone(),
                    source: service.source_name().to_string(),
                    user_id: None,
                })
                .await?;

            let report = service
                .scrape(&ScrapeRequest { keyword, scrape_id })
                .await?;

            if let Some(total) = report.total_found {
                println!("Found {} articles ({} total upstream)", report.articles.len(), total);
            } else {
                println!("Found {} articles", report.articles.len());
            }
            for article in &report.articles {
                println!("- {} ({})", article.title, article.source);
            }
            if let Some(message) = &report.message {
                println!("{message}");
            }
        }
    }

    Ok(())
}
