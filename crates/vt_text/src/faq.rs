use regex_lite::Regex;
use vt_core::FaqItem;

lazy_static! {
    // An h3/h4 ending in '?' directly followed by one paragraph.
    static ref QUESTION: Regex = Regex::new(
        r"(?i)<h[34](?:\s[^>]*)?>([^<]+\?)\s*</h[34]>\s*<p(?:\s[^>]*)?>([^<]+)</p>"
    )
    .expect("QUESTION regex should compile");
}

pub fn extract_faq_pairs(markup: &str) -> Vec<FaqItem> {
    QUESTION
        .captures_iter(markup)
        .map(|caps| FaqItem {
            question: caps[1].trim().to_string(),
            answer: caps[2].trim().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pair() {
        let pairs = extract_faq_pairs("<h3>Wat is X?</h3><p>X is Y.</p>");
        assert_eq!(
            pairs,
            vec![FaqItem {
                question: "Wat is X?".to_string(),
                answer: "X is Y.".to_string(),
            }]
        );
    }

    #[test]
    fn test_heading_without_paragraph() {
        assert!(extract_faq_pairs("<h3>Wat is X?</h3>").is_empty());
        assert!(extract_faq_pairs("<h3>Wat is X?</h3><ul><li>X</li></ul><p>Later.</p>").is_empty());
    }

    #[test]
    fn test_requires_question_mark_and_level() {
        assert!(extract_faq_pairs("<h3>Een stelling</h3><p>Antwoord.</p>").is_empty());
        assert!(extract_faq_pairs("<h2>Wat is X?</h2><p>X is Y.</p>").is_empty());
    }

    #[test]
    fn test_multiple_pairs_in_order() {
        let body = "<h2>Veelgestelde vragen</h2>\
            <h4 class=\"faq\"> Hoe lang duurt het? </h4>\n  <p> Een uur. </p>\
            <p>Tussentekst</p>\
            <h3>Wat kost het?</h3><p class=\"a\">Niets.</p>";
        let pairs = extract_faq_pairs(body);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].question, "Hoe lang duurt het?");
        assert_eq!(pairs[0].answer, "Een uur.");
        assert_eq!(pairs[1].question, "Wat kost het?");
        assert_eq!(pairs[1].answer, "Niets.");
    }
}
