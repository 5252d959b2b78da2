//! Read-through client for the public content API.
//!
//! Every request URL is cached independently for the configured TTL
//! (60 seconds by default). Failures surface as source-failure errors
//! except where the call documents a fallback.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;
use vt_core::{Article, ArticleList, ClientConfig, ClusterList, Result, SiteInfo};

pub mod cache;
pub mod transport;

pub use cache::TtlCache;
pub use transport::{HttpTransport, MemoryTransport, Transport};

/// Hard ceiling on how many articles slug enumeration can see.
pub const MAX_ENUMERABLE_ARTICLES: u32 = 1000;

/// Parameters for the article listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub cluster_id: Option<String>,
}

impl ArticleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn cluster(mut self, cluster_id: impl Into<String>) -> Self {
        self.cluster_id = Some(cluster_id.into());
        self
    }

    /// Zero and empty values are left out, so `limit(0)` means "upstream default".
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset.filter(|o| *o > 0) {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(cluster) = self.cluster_id.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("cluster", cluster.to_string()));
        }
        pairs
    }
}

/// Result of exhaustive slug enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugList {
    pub slugs: Vec<String>,
    /// What upstream reports as the full article count.
    pub total: u64,
    /// Upstream's own signal that more articles exist past this page.
    pub has_more: bool,
}

impl SlugList {
    /// True when upstream holds more articles than enumeration could return.
    pub fn is_truncated(&self) -> bool {
        self.has_more || self.total > self.slugs.len() as u64
    }
}

pub struct ContentClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    cache: TtlCache,
    fallback_site_info: SiteInfo,
}

impl ContentClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new()?);
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let cache = TtlCache::new(config.cache_ttl);
        Self {
            config,
            transport,
            cache,
            fallback_site_info: SiteInfo::default(),
        }
    }

    /// Replaces the record [`ContentClient::fetch_site_info`] returns when upstream fails.
    pub fn with_fallback_site_info(mut self, site_info: SiteInfo) -> Self {
        self.fallback_site_info = site_info;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn fallback_site_info(&self) -> &SiteInfo {
        &self.fallback_site_info
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    pub async fn fetch_articles(&self, query: &ArticleQuery) -> Result<ArticleList> {
        let mut url = self.config.endpoint(&["articles"]);
        let pairs = query.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        self.get_json(url).await
    }

    /// Resolves to `None` both when the slug does not exist and when the lookup failed.
    pub async fn fetch_article_by_slug(&self, slug: &str) -> Option<Article> {
        match self.lookup_article(slug).await {
            Ok(article) => article,
            Err(e) => {
                warn!("Article lookup for '{}' failed: {}", slug, e);
                None
            }
        }
    }

    /// Distinguishes "no such article" (`Ok(None)`) from an upstream failure.
    pub async fn lookup_article(&self, slug: &str) -> Result<Option<Article>> {
        if slug.is_empty() {
            return Ok(None);
        }
        let url = self.config.endpoint(&["articles", slug]);
        match self.get_json(url).await {
            Ok(article) => Ok(Some(article)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn fetch_clusters(&self) -> Result<ClusterList> {
        self.get_json(self.config.endpoint(&["clusters"])).await
    }

    /// Never fails: any upstream error yields the fallback record.
    pub async fn fetch_site_info(&self) -> SiteInfo {
        match self.get_json(self.config.endpoint(&["site"])).await {
            Ok(site_info) => site_info,
            Err(e) => {
                warn!("Site info unavailable, using defaults: {}", e);
                self.fallback_site_info.clone()
            }
        }
    }

    /// Every slug upstream will give us, up to [`MAX_ENUMERABLE_ARTICLES`].
    pub async fn list_all_slugs(&self) -> Result<SlugList> {
        let list = self
            .fetch_articles(&ArticleQuery::new().limit(MAX_ENUMERABLE_ARTICLES))
            .await?;
        let slugs = SlugList {
            slugs: list.articles.into_iter().map(|a| a.slug).collect(),
            total: list.total,
            has_more: list.has_more,
        };
        if slugs.is_truncated() {
            warn!(
                "Slug enumeration capped at {} of {} articles",
                slugs.slugs.len(),
                slugs.total
            );
        }
        Ok(slugs)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let key = url.as_str();
        if let Some(body) = self.cache.get(key).await {
            debug!("cache hit {}", key);
            return Ok(serde_json::from_str(&body)?);
        }

        info!("📡 Fetching {} via {}", key, self.transport.name());
        let body = self.transport.get(&url, &self.config.api_key).await?;
        let value = serde_json::from_str(&body)?;
        self.cache.insert(key, Arc::from(body)).await;
        Ok(value)
    }
}

pub mod prelude {
    pub use super::{ArticleQuery, ContentClient, SlugList, Transport};
    pub use vt_core::{Article, Cluster, Error, Result, SiteInfo};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn client(transport: Arc<MemoryTransport>) -> ContentClient {
        let config = ClientConfig::new("https://engine.test")
            .unwrap()
            .with_api_key("secret");
        ContentClient::with_transport(config, transport)
    }

    fn article(slug: &str) -> serde_json::Value {
        json!({ "id": format!("id-{}", slug), "slug": slug, "title": slug.to_uppercase() })
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_freshness_window() {
        let transport = Arc::new(MemoryTransport::new());
        transport.respond_json(
            "/api/public/articles?limit=10",
            &json!({ "articles": [article("a")], "total": 1, "hasMore": false }),
        );
        let client = client(transport.clone());
        let query = ArticleQuery::new().limit(10);

        let first = client.fetch_articles(&query).await.unwrap();
        let second = client.fetch_articles(&query).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(transport.calls_to("/api/public/articles?limit=10"), 1);

        tokio::time::advance(Duration::from_secs(61)).await;
        client.fetch_articles(&query).await.unwrap();
        assert_eq!(transport.calls_to("/api/public/articles?limit=10"), 2);
    }

    #[tokio::test]
    async fn test_query_shapes_are_cached_separately() {
        let transport = Arc::new(MemoryTransport::new());
        let body = json!({ "articles": [], "total": 0, "hasMore": false });
        transport.respond_json("/api/public/articles?limit=5", &body);
        transport.respond_json("/api/public/articles?limit=5&offset=5&cluster=c1", &body);
        let client = client(transport.clone());

        client.fetch_articles(&ArticleQuery::new().limit(5)).await.unwrap();
        client
            .fetch_articles(&ArticleQuery::new().limit(5).offset(5).cluster("c1"))
            .await
            .unwrap();
        assert_eq!(transport.total_calls(), 2);
        assert_eq!(transport.last_api_key().as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn test_zero_parameters_are_omitted() {
        let transport = Arc::new(MemoryTransport::new());
        transport.respond_json(
            "/api/public/articles",
            &json!({ "articles": [article("a")], "total": 1, "hasMore": false }),
        );
        let client = client(transport.clone());
        let list = client
            .fetch_articles(&ArticleQuery::new().limit(0).offset(0))
            .await
            .unwrap();
        assert_eq!(list.articles.len(), 1);
    }

    #[tokio::test]
    async fn test_article_listing_failure_propagates() {
        let transport = Arc::new(MemoryTransport::new());
        transport.fail("/api/public/articles", 502);
        let client = client(transport);
        let err = client.fetch_articles(&ArticleQuery::new()).await.unwrap_err();
        assert!(err.is_source_failure());
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let transport = Arc::new(MemoryTransport::new());
        transport.unreachable("/api/public/clusters");
        let client = client(transport.clone());
        assert!(client.fetch_clusters().await.is_err());

        transport.respond_json("/api/public/clusters", &json!({ "clusters": [] }));
        assert!(client.fetch_clusters().await.unwrap().clusters.is_empty());
        assert_eq!(transport.calls_to("/api/public/clusters"), 2);
    }

    #[tokio::test]
    async fn test_malformed_response_is_source_failure() {
        let transport = Arc::new(MemoryTransport::new());
        transport.respond("/api/public/clusters", "{\"clusters\": 7}");
        let client = client(transport);
        let err = client.fetch_clusters().await.unwrap_err();
        assert!(err.is_source_failure());
    }

    #[tokio::test]
    async fn test_article_by_slug() {
        let transport = Arc::new(MemoryTransport::new());
        transport.respond_json("/api/public/articles/hallo", &article("hallo"));
        transport.fail("/api/public/articles/kapot", 500);
        let client = client(transport.clone());

        assert_eq!(client.fetch_article_by_slug("hallo").await.unwrap().slug, "hallo");
        assert!(client.fetch_article_by_slug("bestaat-niet").await.is_none());
        assert!(client.fetch_article_by_slug("kapot").await.is_none());
        assert!(client.fetch_article_by_slug("").await.is_none());

        // the internal lookup keeps the two cases apart
        assert!(client.lookup_article("bestaat-niet").await.unwrap().is_none());
        assert!(client.lookup_article("kapot").await.is_err());
        assert_eq!(transport.calls_to("/api/public/articles/"), 0);
    }

    #[tokio::test]
    async fn test_site_info_fallback() {
        let transport = Arc::new(MemoryTransport::new());
        transport.unreachable("/api/public/site");
        let client = client(transport);

        let site = client.fetch_site_info().await;
        assert_eq!(site, SiteInfo::default());
        assert!(!site.ads_enabled);
        assert_eq!(site.article_count, 0);
        assert_eq!(site.cluster_count, 0);
        assert!(!site.name.is_empty());
    }

    #[tokio::test]
    async fn test_injected_site_info_fallback() {
        let transport = Arc::new(MemoryTransport::new());
        transport.fail("/api/public/site", 503);
        let fallback = SiteInfo {
            name: "Reserve".to_string(),
            ..SiteInfo::default()
        };
        let client = client(transport).with_fallback_site_info(fallback.clone());
        assert_eq!(client.fetch_site_info().await, fallback);
    }

    #[tokio::test]
    async fn test_site_info_from_upstream() {
        let transport = Arc::new(MemoryTransport::new());
        let mut site = serde_json::to_value(SiteInfo::default()).unwrap();
        site["name"] = json!("Tuinblog");
        site["adsEnabled"] = json!(true);
        transport.respond_json("/api/public/site", &site);
        let client = client(transport);

        let site = client.fetch_site_info().await;
        assert_eq!(site.name, "Tuinblog");
        assert!(site.ads_enabled);
    }

    #[tokio::test]
    async fn test_list_all_slugs() {
        let transport = Arc::new(MemoryTransport::new());
        transport.respond_json(
            "/api/public/articles?limit=1000",
            &json!({ "articles": [article("a"), article("b")], "total": 1200, "hasMore": true }),
        );
        let client = client(transport);

        let slugs = client.list_all_slugs().await.unwrap();
        assert_eq!(slugs.slugs, vec!["a".to_string(), "b".to_string()]);
        assert!(slugs.is_truncated());
    }

    #[tokio::test]
    async fn test_has_more_alone_marks_truncation() {
        let transport = Arc::new(MemoryTransport::new());
        transport.respond_json(
            "/api/public/articles?limit=1000",
            &json!({ "articles": [article("a")], "hasMore": true }),
        );
        let client = client(transport);

        let slugs = client.list_all_slugs().await.unwrap();
        assert_eq!(slugs.total, 0);
        assert!(slugs.is_truncated());

        let complete = SlugList { slugs: vec!["a".to_string()], total: 1, has_more: false };
        assert!(!complete.is_truncated());
    }
}
