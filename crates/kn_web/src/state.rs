use std::sync::Arc;

use kn_core::ArticleStore;
use kn_sources::ScrapeService;

pub struct AppState {
    pub service: ScrapeService,
    pub store: Arc<dyn ArticleStore>,
}

impl AppState {
    pub fn new(service: ScrapeService, store: Arc<dyn ArticleStore>) -> Self {
        Self { service, store }
    }
}
