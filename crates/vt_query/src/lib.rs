use tracing::warn;
use vt_client::{ArticleQuery, ContentClient};
use vt_core::{Article, Result};

pub mod filter;
pub mod views;

pub use filter::{
    find_article, find_topic, list_topic_clusters, search_articles, select_related_articles,
    DEFAULT_RELATED_COUNT,
};
pub use views::{article_page, related_for, search_page, topic_page, ArticlePage, SearchResults, TopicPage};

/// Latest articles shown on the home page.
pub const HOME_ARTICLE_LIMIT: u32 = 6;
/// Latest articles shown on the full article listing.
pub const LISTING_ARTICLE_LIMIT: u32 = 50;

/// Articles of one cluster, straight from the client.
pub async fn list_articles_for_cluster(client: &ContentClient, cluster_id: &str, limit: u32) -> Result<Vec<Article>> {
    let list = client
        .fetch_articles(&ArticleQuery::new().limit(limit).cluster(cluster_id))
        .await?;
    Ok(list.articles)
}

/// Newest articles for listing pages; empty when upstream is down.
pub async fn latest_articles(client: &ContentClient, limit: u32) -> Vec<Article> {
    or_empty(
        client
            .fetch_articles(&ArticleQuery::new().limit(limit))
            .await
            .map(|list| list.articles),
        "latest articles",
    )
}

/// Turns a failed listing into an empty one, logging the failure.
pub fn or_empty<T>(result: Result<Vec<T>>, context: &str) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            warn!("⚠️ {} unavailable, rendering empty: {}", context, e);
            Vec::new()
        }
    }
}

pub mod prelude {
    pub use super::filter::*;
    pub use super::views::*;
    pub use super::{latest_articles, list_articles_for_cluster, or_empty, HOME_ARTICLE_LIMIT, LISTING_ARTICLE_LIMIT};
}
