//! Presentation-only derivations over article body markup.
//!
//! Bodies are trusted, upstream-authored HTML. Reading time, anchors and
//! FAQ pairs are found with lightweight patterns rather than a document
//! parser; only the table of contents walks a parsed fragment.

#[macro_use]
extern crate lazy_static;

pub mod anchors;
pub mod faq;
pub mod reading;
pub mod toc;

pub use anchors::inject_heading_anchors;
pub use faq::extract_faq_pairs;
pub use reading::{estimate_reading_minutes, format_reading_time, strip_tags, WORDS_PER_MINUTE};
pub use toc::{extract_toc, should_render_toc, MIN_TOC_ENTRIES};

pub mod prelude {
    pub use super::{estimate_reading_minutes, extract_faq_pairs, extract_toc, inject_heading_anchors};
    pub use vt_core::{FaqItem, TocItem};
}
