use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Upstream sends `null` for optional collections and counters; treat it like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A published content unit, as returned by the content API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_keyword: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image_alt: Option<String>,
    /// Epoch millis. Absent for drafts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<ClusterRef>,
}

impl Article {
    pub fn new(id: impl Into<String>, slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title: title.into(),
            excerpt: None,
            content: None,
            meta_title: None,
            meta_description: None,
            focus_keyword: None,
            keywords: Vec::new(),
            featured_image: None,
            featured_image_alt: None,
            published_at: None,
            updated_at: None,
            cluster_id: None,
            cluster: None,
        }
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at.and_then(DateTime::from_timestamp_millis)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at.and_then(DateTime::from_timestamp_millis)
    }

    /// An article is revised when it carries an update stamp later than its publish stamp.
    pub fn is_revised(&self) -> bool {
        match (self.published_at, self.updated_at) {
            (Some(published), Some(updated)) => updated > published,
            _ => false,
        }
    }

    /// Most recent known modification, falling back to the publish time.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.updated_at().or_else(|| self.published_at())
    }

    pub fn display_title(&self) -> &str {
        self.meta_title.as_deref().unwrap_or(&self.title)
    }

    pub fn display_description(&self) -> Option<&str> {
        self.meta_description.as_deref().or(self.excerpt.as_deref())
    }

    pub fn body(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// The cluster summary embedded in an article record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRef {
    pub id: String,
    #[serde(rename = "hoofdonderwerp")]
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: String,
    #[serde(rename = "hoofdonderwerp")]
    pub topic: String,
    #[serde(rename = "doelgroep", default, deserialize_with = "null_as_default")]
    pub audience: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar_slug: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub article_count: u64,
}

impl Cluster {
    /// Only clusters with a pillar slug get a dedicated hub page.
    pub fn is_hub(&self) -> bool {
        self.pillar_slug.is_some()
    }

    pub fn display_title(&self) -> &str {
        self.pillar_title.as_deref().unwrap_or(&self.topic)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomAd {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub link_url: String,
    pub position: String,
}

/// Global site configuration snapshot. Always resolvable: see [`SiteInfo::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfo {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub description: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub contact_email: String,
    pub primary_color: String,
    pub adsense_publisher_id: String,
    pub ads_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_ads: Vec<CustomAd>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub article_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cluster_count: u64,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: "Mijn Website".to_string(),
            domain: String::new(),
            description: "Welkom op mijn website".to_string(),
            hero_title: "Mijn Website".to_string(),
            hero_subtitle: "Welkom op mijn website".to_string(),
            contact_email: "info@example.com".to_string(),
            primary_color: "blue".to_string(),
            adsense_publisher_id: String::new(),
            ads_enabled: false,
            custom_ads: Vec::new(),
            article_count: 0,
            cluster_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleList {
    pub articles: Vec<Article>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterList {
    pub clusters: Vec<Cluster>,
}

/// One table-of-contents entry derived from an article body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocItem {
    pub id: String,
    pub text: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_wire_format() {
        let json = r#"{
            "id": "a1",
            "slug": "hallo-wereld",
            "title": "Hallo Wereld",
            "metaTitle": "Hallo!",
            "keywords": ["groet"],
            "publishedAt": 1700000000000,
            "updatedAt": 1700000600000,
            "clusterId": "c1",
            "cluster": { "id": "c1", "hoofdonderwerp": "Groeten" }
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.slug, "hallo-wereld");
        assert_eq!(article.display_title(), "Hallo!");
        assert_eq!(article.keywords, vec!["groet".to_string()]);
        assert!(article.is_revised());
        assert_eq!(article.body(), "");
        assert_eq!(article.cluster.as_ref().unwrap().topic, "Groeten");
    }

    #[test]
    fn test_missing_keywords_default_to_empty() {
        let article: Article =
            serde_json::from_str(r#"{"id":"a","slug":"s","title":"t"}"#).unwrap();
        assert!(article.keywords.is_empty());
        assert!(article.published_at().is_none());
        assert!(!article.is_revised());
        assert!(article.last_modified().is_none());
    }

    #[test]
    fn test_null_fields_default_inside_list() {
        let json = r#"{
            "articles": [
                { "id": "a", "slug": "a", "title": "A", "keywords": ["tuin"] },
                { "id": "b", "slug": "b", "title": "B", "keywords": null }
            ],
            "total": null,
            "hasMore": null
        }"#;
        let list: ArticleList = serde_json::from_str(json).unwrap();
        assert_eq!(list.articles.len(), 2);
        assert!(list.articles[1].keywords.is_empty());
        assert_eq!(list.total, 0);
        assert!(!list.has_more);

        let cluster: Cluster = serde_json::from_str(
            r#"{"id":"c1","hoofdonderwerp":"Tuin","doelgroep":null,"articleCount":null}"#,
        )
        .unwrap();
        assert_eq!(cluster.audience, "");
        assert_eq!(cluster.article_count, 0);
    }

    #[test]
    fn test_cluster_hub() {
        let json = r#"{"id":"c1","hoofdonderwerp":"Tuin","doelgroep":"Hobby","articleCount":4}"#;
        let mut cluster: Cluster = serde_json::from_str(json).unwrap();
        assert!(!cluster.is_hub());
        assert_eq!(cluster.display_title(), "Tuin");
        cluster.pillar_slug = Some("tuin".into());
        cluster.pillar_title = Some("Alles over de tuin".into());
        assert!(cluster.is_hub());
        assert_eq!(cluster.display_title(), "Alles over de tuin");
    }

    #[test]
    fn test_default_site_info_is_complete() {
        let site = SiteInfo::default();
        assert!(!site.name.is_empty());
        assert!(!site.description.is_empty());
        assert!(!site.contact_email.is_empty());
        assert!(!site.ads_enabled);
        assert!(site.custom_ads.is_empty());
        assert_eq!(site.article_count, 0);
        assert_eq!(site.cluster_count, 0);
    }
}
