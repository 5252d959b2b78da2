use serde::Serialize;
use tracing::debug;
use vt_client::{ArticleQuery, ContentClient};
use vt_core::{Article, Cluster, FaqItem, Result, SiteInfo, TocItem};
use vt_text::{estimate_reading_minutes, extract_faq_pairs, extract_toc, inject_heading_anchors, should_render_toc};
use crate::filter::{find_topic, search_articles, select_related_articles, DEFAULT_RELATED_COUNT};
use crate::{latest_articles, list_articles_for_cluster, or_empty};

pub const SEARCH_CORPUS_LIMIT: u32 = 100;
pub const TOPIC_ARTICLE_LIMIT: u32 = 50;

/// Everything an article page needs, derived from one fetched record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    pub article: Article,
    /// Body with heading anchors injected.
    pub body: String,
    pub toc: Vec<TocItem>,
    pub show_toc: bool,
    pub faq: Vec<FaqItem>,
    pub reading_minutes: u32,
    pub related: Vec<Article>,
    pub site: SiteInfo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicPage {
    pub cluster: Cluster,
    pub articles: Vec<Article>,
    pub site: SiteInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub articles: Vec<Article>,
    pub total: usize,
}

/// Articles shown next to `slug`: its cluster's articles, or the latest
/// articles when it has no cluster. Fetch failures leave the section empty.
pub async fn related_for(client: &ContentClient, slug: &str, cluster_id: Option<&str>) -> Vec<Article> {
    // one extra so the current article can be dropped without coming up short
    let limit = DEFAULT_RELATED_COUNT as u32 + 1;
    let candidates = match cluster_id {
        Some(cluster_id) => or_empty(
            list_articles_for_cluster(client, cluster_id, limit).await,
            "related articles",
        ),
        None => latest_articles(client, limit).await,
    };
    select_related_articles(&candidates, slug, DEFAULT_RELATED_COUNT)
}

/// Fetches the article and site info concurrently and waits for both.
/// `None` means the page should answer not-found.
pub async fn article_page(client: &ContentClient, slug: &str) -> Option<ArticlePage> {
    let (article, site) = tokio::join!(client.fetch_article_by_slug(slug), client.fetch_site_info());
    let article = article?;

    let related = related_for(client, &article.slug, article.cluster_id.as_deref()).await;
    let body = inject_heading_anchors(article.body());
    let toc = extract_toc(&body);
    debug!("article '{}': {} toc entries", slug, toc.len());

    Some(ArticlePage {
        show_toc: should_render_toc(&toc),
        faq: extract_faq_pairs(&body),
        reading_minutes: estimate_reading_minutes(article.body()),
        toc,
        body,
        related,
        article,
        site,
    })
}

/// Hub page for a pillar slug. Cluster listing failures propagate; the
/// cluster's articles degrade to an empty list.
pub async fn topic_page(client: &ContentClient, pillar_slug: &str) -> Result<Option<TopicPage>> {
    let (clusters, site) = tokio::join!(client.fetch_clusters(), client.fetch_site_info());
    let clusters = clusters?.clusters;
    let Some(cluster) = find_topic(&clusters, pillar_slug).cloned() else {
        return Ok(None);
    };

    let articles = or_empty(
        list_articles_for_cluster(client, &cluster.id, TOPIC_ARTICLE_LIMIT).await,
        "topic articles",
    );
    Ok(Some(TopicPage { cluster, articles, site }))
}

/// Search as the search page runs it: a blank query shows nothing and
/// does not hit upstream.
pub async fn search_page(client: &ContentClient, raw_query: &str) -> SearchResults {
    let query = raw_query.trim().to_string();
    if query.is_empty() {
        return SearchResults { query, articles: Vec::new(), total: 0 };
    }

    let corpus = or_empty(
        client
            .fetch_articles(&ArticleQuery::new().limit(SEARCH_CORPUS_LIMIT))
            .await
            .map(|list| list.articles),
        "search corpus",
    );
    let articles = search_articles(&corpus, &query);
    SearchResults { total: articles.len(), query, articles }
}
