//! `unrecognized-char-ref`: unknown named character references
//!
//! The parser decodes references before the tree is built, so this rule reads
//! the original source line by line instead.

use super::{Rule, UNRECOGNIZED_CHAR_REF};
use crate::diagnostic::{Diagnostic, Location, Severity};
use crate::document::Document;
use crate::htmlspec::entities;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static NAMED_CHAR_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"&([a-zA-Z][a-zA-Z0-9]*);").unwrap());

pub struct UnrecognizedCharRef;

/// True when byte offset `pos` falls inside a `{{ ... }}` on this line
fn inside_directive(line: &str, pos: usize) -> bool {
    let bytes = line.as_bytes();
    let mut depth = 0i32;
    let mut i = 0;
    while i + 1 < bytes.len() && i < pos {
        match (bytes[i], bytes[i + 1]) {
            (b'{', b'{') => {
                depth += 1;
                i += 1;
            }
            (b'}', b'}') => {
                depth -= 1;
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    depth > 0
}

impl Rule for UnrecognizedCharRef {
    fn id(&self) -> &'static str {
        UNRECOGNIZED_CHAR_REF
    }

    fn description(&self) -> &'static str {
        "character references must be valid HTML entities"
    }

    fn check(&self, _doc: &Document) -> Vec<Diagnostic> {
        Vec::new()
    }

    fn check_raw(&self, filename: &Path, content: &str) -> Vec<Diagnostic> {
        let mut results = Vec::new();

        for (index, line) in content.split('\n').enumerate() {
            for caps in NAMED_CHAR_REF.captures_iter(line) {
                let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                if inside_directive(line, whole.start()) || entities::is_named_reference(name.as_str()) {
                    continue;
                }
                results.push(Diagnostic::new(
                    UNRECOGNIZED_CHAR_REF,
                    Severity::Warning,
                    &format!("unrecognized character reference &{};", name.as_str()),
                    Location::new(filename, index + 1, whole.start() + 1),
                ));
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::messages;

    fn scan(content: &str) -> Vec<Diagnostic> {
        UnrecognizedCharRef.check_raw(Path::new("test.html"), content)
    }

    #[test]
    fn test_known_references_pass() {
        assert!(scan("<p>&amp; &copy; &nbsp; &mdash; &Dagger;</p>").is_empty());
    }

    #[test]
    fn test_numeric_references_pass() {
        assert!(scan("<p>&#8212; &#x2014;</p>").is_empty());
    }

    #[test]
    fn test_unknown_reference() {
        let results = scan("<p>ok</p>\n<p>&foobar;</p>");
        assert_eq!(messages(&results), vec!["unrecognized character reference &foobar;"]);
        assert_eq!(results[0].severity, Severity::Warning);
        assert_eq!(results[0].location.line, 2);
        assert_eq!(results[0].location.column, 4);
    }

    #[test]
    fn test_inside_directive_skipped() {
        assert!(scan(r#"<p>{{ .Text | replace "&bogus;" }}</p>"#).is_empty());
        assert_eq!(scan(r#"<p>{{ .A }} &bogus;</p>"#).len(), 1);
    }

    #[test]
    fn test_tree_check_is_empty() {
        let doc = Document::parse_fragment("t.html", b"<p>&foobar;</p>").unwrap();
        assert!(UnrecognizedCharRef.check(&doc).is_empty());
    }
}
