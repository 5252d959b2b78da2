use scraper::{Html, Selector};
use vt_core::TocItem;

/// Below this many entries a table of contents is not worth showing.
pub const MIN_TOC_ENTRIES: usize = 3;

/// Collects `h2`/`h3` headings in document order.
///
/// Run this on the output of [`crate::inject_heading_anchors`] so every
/// entry points at a real id. Headings still lacking one get the id the
/// injector would have assigned.
pub fn extract_toc(markup: &str) -> Vec<TocItem> {
    let fragment = Html::parse_fragment(markup);
    let selector = Selector::parse("h2, h3").unwrap();
    let mut unanchored = 0usize;

    fragment
        .select(&selector)
        .map(|el| {
            let id = match el.value().id() {
                Some(id) => id.to_string(),
                None => {
                    let id = format!("heading-{}", unanchored);
                    unanchored += 1;
                    id
                }
            };
            let level = if el.value().name() == "h3" { 3 } else { 2 };
            TocItem {
                id,
                text: el.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" "),
                level,
            }
        })
        .collect()
}

pub fn should_render_toc(items: &[TocItem]) -> bool {
    items.len() >= MIN_TOC_ENTRIES
}
