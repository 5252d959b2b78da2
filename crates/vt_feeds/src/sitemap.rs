use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::debug;
use vt_client::{ArticleQuery, ContentClient, MAX_ENUMERABLE_ARTICLES};
use vt_core::{Article, Cluster, SiteConfig};
use vt_query::{list_topic_clusters, or_empty};
use crate::xml::escape;

pub const ARTICLE_PRIORITY: f32 = 0.6;
pub const TOPIC_PRIORITY: f32 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Daily,
    Weekly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

impl SitemapEntry {
    fn new(url: String, last_modified: DateTime<Utc>, change_frequency: ChangeFrequency, priority: f32) -> Self {
        Self { url, last_modified, change_frequency, priority }
    }
}

/// Static pages first, then one entry per article and one per hub cluster.
pub fn build_sitemap_entries(
    site: &SiteConfig,
    now: DateTime<Utc>,
    articles: &[Article],
    clusters: &[Cluster],
) -> Vec<SitemapEntry> {
    let mut entries = vec![
        SitemapEntry::new(site.link("/"), now, ChangeFrequency::Daily, 1.0),
        SitemapEntry::new(site.link("/artikelen"), now, ChangeFrequency::Daily, 0.8),
        SitemapEntry::new(site.link("/onderwerpen"), now, ChangeFrequency::Weekly, 0.7),
    ];

    entries.extend(articles.iter().map(|article| {
        SitemapEntry::new(
            site.link(&format!("/{}", article.slug)),
            article.last_modified().unwrap_or(now),
            ChangeFrequency::Weekly,
            ARTICLE_PRIORITY,
        )
    }));

    entries.extend(list_topic_clusters(clusters).into_iter().filter_map(|cluster| {
        let slug = cluster.pillar_slug?;
        Some(SitemapEntry::new(
            site.link(&format!("/onderwerp/{}", slug)),
            now,
            ChangeFrequency::Weekly,
            TOPIC_PRIORITY,
        ))
    }));

    entries
}

/// Fetches articles and clusters concurrently. Either half may come back
/// empty; the static entries always ship.
pub async fn collect_sitemap(client: &ContentClient, site: &SiteConfig) -> Vec<SitemapEntry> {
    let query = ArticleQuery::new().limit(MAX_ENUMERABLE_ARTICLES);
    let (articles, clusters) = tokio::join!(client.fetch_articles(&query), client.fetch_clusters());
    let articles = or_empty(articles.map(|list| list.articles), "sitemap articles");
    let clusters = or_empty(clusters.map(|list| list.clusters), "sitemap clusters");
    debug!("sitemap from {} articles and {} clusters", articles.len(), clusters.len());
    build_sitemap_entries(site, Utc::now(), &articles, &clusters)
}

pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
            escape(&entry.url),
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true),
            entry.change_frequency.as_str(),
            entry.priority,
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}
