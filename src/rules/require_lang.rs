//! `require-lang`: pages must declare their language

use super::{report, Rule, REQUIRE_LANG};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::Document;

pub struct RequireLang;

impl Rule for RequireLang {
    fn id(&self) -> &'static str {
        REQUIRE_LANG
    }

    fn description(&self) -> &'static str {
        "html element must have a non-empty lang attribute"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        if doc.is_fragment() {
            return Vec::new();
        }

        let Some((_, html)) = doc.elements().find(|(_, n)| n.is("html")) else {
            return Vec::new();
        };

        let message = match html.attr("lang").map(str::trim) {
            None => "html element is missing the lang attribute",
            Some("") => "html lang attribute must not be empty",
            Some(_) => return Vec::new(),
        };
        vec![report(doc, html, REQUIRE_LANG, Severity::Error, message)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{lint, lint_page, messages};

    #[test]
    fn test_lang_present() {
        assert!(lint_page(&RequireLang, r#"<!DOCTYPE html><html lang="en"><body></body></html>"#).is_empty());
    }

    #[test]
    fn test_lang_missing() {
        let results = lint_page(&RequireLang, "<!DOCTYPE html>\n<html>\n<body></body></html>");
        assert_eq!(messages(&results), vec!["html element is missing the lang attribute"]);
        assert_eq!(results[0].location.line, 2);
    }

    #[test]
    fn test_lang_empty() {
        let results = lint_page(&RequireLang, r#"<html lang=" "><body></body></html>"#);
        assert_eq!(messages(&results), vec!["html lang attribute must not be empty"]);
    }

    #[test]
    fn test_fragments_skipped() {
        assert!(lint(&RequireLang, "<div>partial</div>").is_empty());
        assert!(lint_page(&RequireLang, "{{define \"page\"}}<html><body></body></html>{{end}}").is_empty());
    }
}
