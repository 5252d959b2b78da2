use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;
use vt_client::ArticleQuery;
use vt_core::{ArticleList, Error};
use vt_feeds::{collect_feed, collect_sitemap, render_sitemap, RobotsDirectives, FEED_CACHE_CONTROL, FEED_CONTENT_TYPE};
use vt_query::{
    article_page, latest_articles, list_topic_clusters, search_page, topic_page, HOME_ARTICLE_LIMIT,
    LISTING_ARTICLE_LIMIT,
};
use crate::AppState;

/// Upstream failures the caller asked to see rather than degrade.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_source_failure() {
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ArticleParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub cluster: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LatestParams {
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub async fn feed(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let xml = collect_feed(&state.client, &state.site).await;
    (
        [
            (header::CONTENT_TYPE, FEED_CONTENT_TYPE),
            (header::CACHE_CONTROL, FEED_CACHE_CONTROL),
        ],
        xml,
    )
}

pub async fn sitemap(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let entries = collect_sitemap(&state.client, &state.site).await;
    ([(header::CONTENT_TYPE, "application/xml")], render_sitemap(&entries))
}

pub async fn robots(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        RobotsDirectives::for_site(&state.site).render(),
    )
}

pub async fn site_info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.client.fetch_site_info().await)
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ArticleParams>,
) -> impl IntoResponse {
    let query = ArticleQuery {
        limit: params.limit,
        offset: params.offset,
        cluster_id: params.cluster,
    };
    match state.client.fetch_articles(&query).await {
        Ok(list) => Json(list),
        Err(e) => {
            warn!("⚠️ article listing unavailable, rendering empty: {}", e);
            Json(ArticleList { articles: Vec::new(), total: 0, has_more: false })
        }
    }
}

/// Newest articles for the home page (default) or the full listing, capped at the listing size.
pub async fn latest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LatestParams>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(HOME_ARTICLE_LIMIT).clamp(1, LISTING_ARTICLE_LIMIT);
    Json(latest_articles(&state.client, limit).await)
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    match article_page(&state.client, &slug).await {
        Some(page) => Json(page).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "article not found" }))).into_response(),
    }
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    Json(search_page(&state.client, params.q.as_deref().unwrap_or_default()).await)
}

pub async fn list_topics(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let clusters = state.client.fetch_clusters().await?.clusters;
    Ok(Json(list_topic_clusters(&clusters)).into_response())
}

pub async fn get_topic(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    Ok(match topic_page(&state.client, &slug).await? {
        Some(page) => Json(page).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "topic not found" }))).into_response(),
    })
}

pub async fn list_slugs(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.client.list_all_slugs().await {
        Ok(list) => {
            let truncated = list.is_truncated();
            Json(json!({ "slugs": list.slugs, "total": list.total, "truncated": truncated }))
        }
        Err(e) => {
            warn!("⚠️ slug enumeration unavailable: {}", e);
            Json(json!({ "slugs": [], "total": 0, "truncated": false }))
        }
    }
}
