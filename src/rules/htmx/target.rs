//! `hx-target`: keyword, keyword plus selector, or a CSS selector

use super::Finding;
use crate::htmlspec::elements;
use crate::htmlspec::htmx::{TARGET_KEYWORDS, TARGET_SPECIAL_VALUES};

/// True when the token already reads as a CSS selector rather than a keyword
fn looks_like_selector(token: &str) -> bool {
    token.starts_with(['#', '.', '[', '*', ':'])
        || token.contains(['#', '.', '[', '>', ':'])
        || elements::VALID_ELEMENTS.contains(token.to_ascii_lowercase().as_str())
}

pub fn validate_target(value: &str) -> Vec<Finding> {
    let value = value.trim();
    // Single words are a special value or a selector we cannot check further
    let Some((keyword, _selector)) = value.split_once(char::is_whitespace) else {
        return Vec::new();
    };

    let lowered = keyword.to_ascii_lowercase();
    if TARGET_KEYWORDS.contains(&lowered.as_str())
        || TARGET_SPECIAL_VALUES.contains(&lowered.as_str())
        || looks_like_selector(keyword)
    {
        return Vec::new();
    }

    vec![Finding::warning(format!(
        "invalid hx-target keyword '{}'; expected 'this', 'closest', 'find', 'next', 'previous', or a CSS selector",
        keyword
    ))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;

    #[test]
    fn test_valid_targets() {
        for value in [
            "this",
            "body",
            "#results",
            ".row",
            "closest tr",
            "find .item",
            "next div",
            "previous .sibling",
            "#list > li",
            "div .child",
            "my-widget",
        ] {
            assert!(validate_target(value).is_empty(), "{}", value);
        }
    }

    #[test]
    fn test_unknown_keyword_is_warning() {
        let findings = validate_target("nearest tr");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].message.starts_with("invalid hx-target keyword 'nearest'"));
    }
}
