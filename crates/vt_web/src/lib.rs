use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/feed.xml", get(handlers::feed))
        .route("/sitemap.xml", get(handlers::sitemap))
        .route("/robots.txt", get(handlers::robots))
        .route("/api/site", get(handlers::site_info))
        .route("/api/articles", get(handlers::list_articles))
        .route("/api/articles/latest", get(handlers::latest))
        .route("/api/articles/:slug", get(handlers::get_article))
        .route("/api/search", get(handlers::search))
        .route("/api/topics", get(handlers::list_topics))
        .route("/api/topics/:slug", get(handlers::get_topic))
        .route("/api/slugs", get(handlers::list_slugs))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::{create_app, AppState};
    pub use vt_core::{Article, Error, Result};
}
