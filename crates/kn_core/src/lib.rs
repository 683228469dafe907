pub mod config;
pub mod error;
pub mod normalize;
pub mod storage;
pub mod types;

pub use config::ScrapeConfig;
pub use error::Error;
pub use normalize::normalize;
pub use storage::ArticleStore;
pub use types::{CanonicalArticle, FetchResult, RawArticle, ScrapeRequest, ScrapeSession};

pub type Result<T> = std::result::Result<T, Error>;
