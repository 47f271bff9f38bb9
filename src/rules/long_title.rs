//! `long-title`: overly long document titles

use super::{report, Rule, LONG_TITLE};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::Document;

/// Search engines truncate titles beyond this many characters
pub const MAX_TITLE_LENGTH: usize = 70;

pub struct LongTitle;

impl Rule for LongTitle {
    fn id(&self) -> &'static str {
        LONG_TITLE
    }

    fn description(&self) -> &'static str {
        "title text should not exceed 70 characters"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        doc.elements()
            .filter(|(_, n)| n.is("title"))
            .filter_map(|(id, title)| {
                let length = doc.text_content(id).chars().count();
                (length > MAX_TITLE_LENGTH).then(|| {
                    report(
                        doc,
                        title,
                        LONG_TITLE,
                        Severity::Warning,
                        format!(
                            "title is {} characters long; keep it under {}",
                            length, MAX_TITLE_LENGTH
                        ),
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::lint;

    #[test]
    fn test_short_title() {
        assert!(lint(&LongTitle, "<title>Home</title>").is_empty());
    }

    #[test]
    fn test_long_title() {
        let html = format!("<title>{}</title>", "x".repeat(71));
        let results = lint(&LongTitle, &html);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].severity, Severity::Warning);
        assert!(results[0].message.contains("71 characters"));
    }

    #[test]
    fn test_boundary_and_whitespace() {
        let html = format!("<title>\n   {}   \n</title>", "y".repeat(70));
        assert!(lint(&LongTitle, &html).is_empty());
    }
}
