use async_trait::async_trait;
use kn_core::{FetchResult, Result};

pub mod demo;
pub mod newsapi;
pub mod service;

pub use demo::DemoSource;
pub use newsapi::NewsApiSource;
pub use service::{ScrapeReport, ScrapeService};

/// A strategy supplying raw article records for one keyword search.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Returns the name of the news source
    fn name(&self) -> &str;

    /// Fetch raw records matching the keyword, single shot, no retries.
    async fn fetch(&self, keyword: &str) -> Result<FetchResult>;

    /// Caller-facing note attached to successful responses, if any.
    fn advisory(&self) -> Option<&'static str> {
        None
    }
}

pub mod prelude {
    pub use super::{NewsSource, ScrapeService};
    pub use kn_core::{Error, Result};
}
