use vt_core::{Article, Cluster};

pub const DEFAULT_RELATED_COUNT: usize = 3;

/// Case-insensitive substring search over title, excerpt and keywords.
/// An article matches when any one of them contains the query; an empty
/// query therefore matches every article.
pub fn search_articles(corpus: &[Article], query: &str) -> Vec<Article> {
    let needle = query.to_lowercase();
    corpus
        .iter()
        .filter(|article| {
            article.title.to_lowercase().contains(&needle)
                || article
                    .excerpt
                    .as_deref()
                    .is_some_and(|excerpt| excerpt.to_lowercase().contains(&needle))
                || article
                    .keywords
                    .iter()
                    .any(|keyword| keyword.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Up to `max_count` articles other than `current_slug`, in corpus order.
/// No ranking happens here.
pub fn select_related_articles(corpus: &[Article], current_slug: &str, max_count: usize) -> Vec<Article> {
    corpus
        .iter()
        .filter(|article| article.slug != current_slug)
        .take(max_count)
        .cloned()
        .collect()
}

/// Clusters that have their own hub page.
pub fn list_topic_clusters(clusters: &[Cluster]) -> Vec<Cluster> {
    clusters.iter().filter(|c| c.is_hub()).cloned().collect()
}

/// First article with the slug; later duplicates are ignored.
pub fn find_article<'a>(corpus: &'a [Article], slug: &str) -> Option<&'a Article> {
    corpus.iter().find(|a| a.slug == slug)
}

pub fn find_topic<'a>(clusters: &'a [Cluster], pillar_slug: &str) -> Option<&'a Cluster> {
    clusters
        .iter()
        .find(|c| c.pillar_slug.as_deref() == Some(pillar_slug))
}
