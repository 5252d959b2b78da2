use chrono::{DateTime, Utc};
use tracing::debug;
use vt_client::{ArticleQuery, ContentClient};
use vt_core::{Article, SiteConfig, SiteInfo};
use vt_query::or_empty;
use crate::xml::{cdata, escape};

pub const FEED_ITEM_LIMIT: usize = 50;
pub const FEED_CONTENT_TYPE: &str = "application/xml";
pub const FEED_CACHE_CONTROL: &str = "public, max-age=3600, s-maxage=3600";

fn render_item(article: &Article, site: &SiteConfig, now: DateTime<Utc>) -> String {
    let link = escape(&site.link(&format!("/{}", article.slug)));
    let description = article.excerpt.as_deref().unwrap_or(&article.title);
    let published = article.published_at().unwrap_or(now);

    let mut item = format!(
        "    <item>\n      <title>{}</title>\n      <link>{}</link>\n      <guid isPermaLink=\"true\">{}</guid>\n      <description>{}</description>\n      <pubDate>{}</pubDate>\n",
        cdata(&article.title),
        link,
        link,
        cdata(description),
        published.to_rfc2822(),
    );
    if let Some(image) = article.featured_image.as_deref() {
        item.push_str(&format!("      <enclosure url=\"{}\" type=\"image/jpeg\" />\n", escape(image)));
    }
    item.push_str("    </item>\n");
    item
}

/// RSS 2.0 document for the site. An empty article list still yields a
/// complete channel.
pub fn build_feed(articles: &[Article], site_info: &SiteInfo, site: &SiteConfig, now: DateTime<Utc>) -> String {
    let base = escape(&site.link("/"));
    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\" xmlns:content=\"http://purl.org/rss/1.0/modules/content/\">\n\
         \x20 <channel>\n\
         \x20   <title>{}</title>\n\
         \x20   <link>{}</link>\n\
         \x20   <description>{}</description>\n\
         \x20   <language>nl</language>\n\
         \x20   <lastBuildDate>{}</lastBuildDate>\n\
         \x20   <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\" />\n",
        cdata(&site_info.name),
        base,
        cdata(&site_info.description),
        now.to_rfc2822(),
        escape(&site.link("/feed.xml")),
    );
    for article in articles.iter().take(FEED_ITEM_LIMIT) {
        xml.push_str(&render_item(article, site, now));
    }
    xml.push_str("  </channel>\n</rss>\n");
    xml
}

/// Site info and the latest articles, fetched concurrently.
pub async fn collect_feed(client: &ContentClient, site: &SiteConfig) -> String {
    let query = ArticleQuery::new().limit(FEED_ITEM_LIMIT as u32);
    let (site_info, articles) = tokio::join!(client.fetch_site_info(), client.fetch_articles(&query));
    let articles = or_empty(articles.map(|list| list.articles), "feed articles");
    debug!("feed with {} items", articles.len().min(FEED_ITEM_LIMIT));
    build_feed(&articles, &site_info, site, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;
    use vt_client::MemoryTransport;
    use vt_core::ClientConfig;

    fn site() -> SiteConfig {
        SiteConfig::new("https://voorbeeld.nl").unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_feed_is_complete_channel() {
        let xml = build_feed(&[], &SiteInfo::default(), &site(), now());
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<channel>"));
        assert!(xml.contains("<title><![CDATA[Mijn Website]]></title>"));
        assert!(xml.contains("<atom:link href=\"https://voorbeeld.nl/feed.xml\""));
        assert!(!xml.contains("<item>"));
        assert!(xml.trim_end().ends_with("</channel>\n</rss>"));
    }

    #[test]
    fn test_items() {
        let mut article = Article::new("1", "tuin", "Tuin & <b>Terras</b>");
        article.excerpt = Some("Rare ]]> reeks".to_string());
        article.published_at = Some(1_700_000_000_000);
        article.featured_image = Some("https://img.test/a.jpg?w=1&h=2".to_string());
        let draft = Article::new("2", "concept", "Concept");

        let xml = build_feed(&[article, draft], &SiteInfo::default(), &site(), now());
        assert_eq!(xml.matches("<item>").count(), 2);
        assert!(xml.contains("<title><![CDATA[Tuin & <b>Terras</b>]]></title>"));
        assert!(xml.contains("<description><![CDATA[Rare ]]]]><![CDATA[> reeks]]></description>"));
        assert!(xml.contains("<link>https://voorbeeld.nl/tuin</link>"));
        assert!(xml.contains("<enclosure url=\"https://img.test/a.jpg?w=1&amp;h=2\" type=\"image/jpeg\" />"));
        assert!(xml.contains("<pubDate>Tue, 14 Nov 2023 22:13:20 +0000</pubDate>"));
        // the draft falls back to the build time and to its title as description
        assert!(xml.contains(&format!("<pubDate>{}</pubDate>", now().to_rfc2822())));
        assert!(xml.contains("<description><![CDATA[Concept]]></description>"));
    }

    #[test]
    fn test_item_limit() {
        let articles: Vec<Article> = (0..60).map(|i| Article::new(i.to_string(), format!("a{}", i), "t")).collect();
        let xml = build_feed(&articles, &SiteInfo::default(), &site(), now());
        assert_eq!(xml.matches("<item>").count(), FEED_ITEM_LIMIT);
    }

    #[tokio::test]
    async fn test_collect_feed_with_upstream_down() {
        let transport = Arc::new(MemoryTransport::new());
        transport.unreachable("/api/public/site");
        transport.unreachable("/api/public/articles?limit=50");
        let client = ContentClient::with_transport(ClientConfig::new("https://engine.test").unwrap(), transport);

        let xml = collect_feed(&client, &site()).await;
        assert!(xml.contains("<channel>"));
        assert!(!xml.contains("<item>"));
    }
}
