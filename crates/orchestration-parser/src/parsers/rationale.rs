use lazy_static::lazy_static;
use regex::Regex;

use super::classifier::ContentByKind;

lazy_static! {
    // Most to least strict, first match wins. The last pattern yields the text after an
    // unclosed <thinking>, never the tag itself.
    static ref RATIONALE_PATTERNS: [Regex; 3] = [
        Regex::new(r"(?s)<thinking>(.*?)</thinking>").expect("valid rationale pattern"),
        Regex::new(r"(?s)(.*?)</thinking>").expect("valid rationale pattern"),
        Regex::new(r"(?s)<thinking>(.*)").expect("valid rationale pattern"),
    ];
}

/// Pull the thinking segment out of a text block.
///
/// Falls back to the whole text when no delimiter is present.
pub fn extract_rationale(text: &str) -> String {
    RATIONALE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|captures| captures.get(1))
        .map(|inner| inner.as_str().trim().to_string())
        .unwrap_or_else(|| text.to_string())
}

/// The rationale of a step comes from its first text block, if any
pub fn parse_rationale(content: &ContentByKind) -> Option<String> {
    content.first_text().map(extract_rationale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::ContentItem;
    use crate::parsers::classifier::classify;

    #[test]
    fn test_fully_delimited() {
        assert_eq!(
            extract_rationale("preamble <thinking>\n  I should check the weather.\n</thinking> <answer>Sunny"),
            "I should check the weather."
        );
    }

    #[test]
    fn test_first_of_several_spans() {
        assert_eq!(
            extract_rationale("<thinking>one</thinking><thinking>two</thinking>"),
            "one"
        );
    }

    #[test]
    fn test_closing_delimiter_only() {
        assert_eq!(
            extract_rationale("The user wants Rome.\n</thinking>\nmore"),
            "The user wants Rome."
        );
    }

    #[test]
    fn test_opening_delimiter_only() {
        assert_eq!(
            extract_rationale("<thinking> Looking up the forecast"),
            "Looking up the forecast"
        );
    }

    #[test]
    fn test_no_delimiter_returns_raw_text() {
        assert_eq!(extract_rationale("  just text  "), "  just text  ");
    }

    #[test]
    fn test_parse_rationale_uses_first_text() {
        let content = classify(vec![
            ContentItem::text("<thinking>first</thinking>"),
            ContentItem::text("<thinking>second</thinking>"),
        ]);
        assert_eq!(parse_rationale(&content), Some("first".to_string()));
        assert_eq!(parse_rationale(&classify(Vec::new())), None);
    }
}
