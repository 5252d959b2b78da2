//! Machine-readable listings: sitemap, RSS feed and crawler directives.
//!
//! None of these fail as a whole. A subset whose source is unreachable is
//! simply left out.

pub mod robots;
pub mod rss;
pub mod sitemap;
mod xml;

pub use robots::{RobotsDirectives, RobotsRule};
pub use rss::{build_feed, collect_feed, FEED_CACHE_CONTROL, FEED_CONTENT_TYPE, FEED_ITEM_LIMIT};
pub use sitemap::{build_sitemap_entries, collect_sitemap, render_sitemap, ChangeFrequency, SitemapEntry};
