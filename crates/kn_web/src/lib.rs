use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

/// Permissive CORS on every route; preflight OPTIONS requests are answered
/// by the layer itself.
pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/scrape", post(handlers::scrape))
        .route("/api/scrapes", post(handlers::create_scrape))
        .route("/api/scrapes/:id/articles", get(handlers::scrape_articles))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use kn_core::{Error, Result};
}
