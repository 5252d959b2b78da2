/// Characters XML 1.0 does not allow anywhere in a document.
fn is_forbidden(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}')
}

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars().filter(|c| !is_forbidden(*c)) {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps text in a CDATA section. A literal `]]>` is split across two
/// sections so it can never close the wrapper early.
pub(crate) fn cdata(text: &str) -> String {
    let clean: String = text.chars().filter(|c| !is_forbidden(*c)).collect();
    format!("<![CDATA[{}]]>", clean.replace("]]>", "]]]]><![CDATA[>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a & b <c> \"d\" 'e'"), "a &amp; b &lt;c&gt; &quot;d&quot; &apos;e&apos;");
        assert_eq!(escape("bel\u{7}"), "bel");
    }

    #[test]
    fn test_cdata_terminator_is_split() {
        assert_eq!(cdata("<b>R&D</b>"), "<![CDATA[<b>R&D</b>]]>");
        let wrapped = cdata("x]]>y");
        assert_eq!(wrapped, "<![CDATA[x]]]]><![CDATA[>y]]>");
        // exactly one terminator per opened section
        assert_eq!(wrapped.matches("<![CDATA[").count(), wrapped.matches("]]>").count());
    }
}
