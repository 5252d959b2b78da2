use regex_lite::Regex;

pub const WORDS_PER_MINUTE: usize = 200;

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<[^>]*>").expect("TAG regex should compile");
}

/// Removes every `<...>` span. Not a parser: nesting and comments are not understood.
pub fn strip_tags(markup: &str) -> String {
    TAG.replace_all(markup, "").into_owned()
}

/// Whole minutes needed to read the body at 200 words per minute, rounded up.
/// An empty body reads in 0 minutes.
pub fn estimate_reading_minutes(markup: &str) -> u32 {
    let words = strip_tags(markup).split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE) as u32
}

pub fn format_reading_time(minutes: u32) -> String {
    format!("{} min leestijd", minutes)
}
