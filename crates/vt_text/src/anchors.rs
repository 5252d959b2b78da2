use regex_lite::{Captures, Regex};

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"(?is)<h([23])(\s[^>]*)?>(.*?)(</h[23]\s*>)")
        .expect("HEADING regex should compile");
    static ref ATTR: Regex = Regex::new(r#"([^\s=/>"']+)(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+))?"#)
        .expect("ATTR regex should compile");
}

/// Walks the attribute list name by name so quoted values never count as names.
fn has_id_attr(attrs: &str) -> bool {
    ATTR.captures_iter(attrs).any(|caps| caps[1].eq_ignore_ascii_case("id"))
}

/// Gives every `<h2>`/`<h3>` without an `id` attribute a sequential
/// `heading-N` id, in document order. Headings that already carry an id
/// are left alone, which makes the transformation idempotent.
pub fn inject_heading_anchors(markup: &str) -> String {
    let mut counter = 0usize;
    HEADING
        .replace_all(markup, |caps: &Captures| {
            let attrs = caps.get(2).map_or("", |m| m.as_str());
            if has_id_attr(attrs) {
                return caps[0].to_string();
            }
            let anchored = format!(
                "<h{} id=\"heading-{}\"{}>{}{}",
                &caps[1], counter, attrs, &caps[3], &caps[4]
            );
            counter += 1;
            anchored
        })
        .into_owned()
}
