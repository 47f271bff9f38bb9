//! `no-missing-references`: id references must resolve within the document

use super::{report, Rule, NO_MISSING_REFERENCES};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::{Document, NodeId};
use crate::htmlspec::{attributes, AttrType};
use crate::template::is_templated;
use std::collections::HashMap;

pub struct NoMissingReferences;

/// Map of id value to the first element carrying it
pub(crate) fn id_index(doc: &Document) -> HashMap<&str, NodeId> {
    let mut index = HashMap::new();
    for (id, node) in doc.elements() {
        if let Some(value) = node.attr("id").filter(|v| !v.is_empty()) {
            index.entry(value).or_insert(id);
        }
    }
    index
}

impl Rule for NoMissingReferences {
    fn id(&self) -> &'static str {
        NO_MISSING_REFERENCES
    }

    fn description(&self) -> &'static str {
        "id references must point at an element in the same document"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        // Partials are composed elsewhere, so their references may resolve later
        if doc.is_fragment() {
            return Vec::new();
        }

        let index = id_index(doc);
        let mut results = Vec::new();

        for (_, node) in doc.elements() {
            for attr in &node.attrs {
                let name = attr.name.to_ascii_lowercase();
                let Some(spec) = attributes::attr_spec(&name) else {
                    continue;
                };
                if !spec.is_valid_on(&node.tag) || is_templated(&attr.value) {
                    continue;
                }
                // Labels may target controls rendered by another template; valid-for
                // checks the targets that do exist
                if name == "for" && node.is("label") {
                    continue;
                }

                let references: Vec<&str> = match spec.kind {
                    AttrType::IdRef => vec![attr.value.trim()],
                    AttrType::IdRefList => attr.value.split_ascii_whitespace().collect(),
                    _ => continue,
                };

                for reference in references.into_iter().filter(|r| !r.is_empty()) {
                    if !index.contains_key(reference) {
                        results.push(report(
                            doc,
                            node,
                            NO_MISSING_REFERENCES,
                            Severity::Error,
                            format!("{} references missing id '{}'", name, reference),
                        ));
                    }
                }
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{lint, lint_page, messages};

    fn page(body: &str) -> String {
        format!(
            "<!DOCTYPE html><html lang=\"en\"><head><title>t</title></head><body>{}</body></html>",
            body
        )
    }

    #[test]
    fn test_resolved_references_pass() {
        let html = page(
            r#"<label for="name">Name</label><input id="name" aria-describedby="hint err">
               <p id="hint">h</p><p id="err">e</p>"#,
        );
        assert!(lint_page(&NoMissingReferences, &html).is_empty());
    }

    #[test]
    fn test_missing_reference() {
        let html = page(r#"<input aria-labelledby="nope"><output for="gone"></output>"#);
        let results = lint_page(&NoMissingReferences, &html);
        assert_eq!(
            messages(&results),
            vec![
                "aria-labelledby references missing id 'nope'",
                "for references missing id 'gone'",
            ]
        );
        assert_eq!(results[0].severity, Severity::Error);
    }

    #[test]
    fn test_label_without_target_not_reported() {
        let html = page(r#"<label for="rendered-elsewhere">x</label>"#);
        assert!(lint_page(&NoMissingReferences, &html).is_empty());
    }

    #[test]
    fn test_each_list_entry_checked() {
        let html = page(r#"<div id="a"></div><button aria-controls="a b c">x</button>"#);
        assert_eq!(lint_page(&NoMissingReferences, &html).len(), 2);
    }

    #[test]
    fn test_fragment_skipped() {
        assert!(lint(&NoMissingReferences, r#"<input list="elsewhere">"#).is_empty());
    }

    #[test]
    fn test_templated_reference_skipped() {
        let html = page(r#"<input list="opts-{{ .ID }}">"#);
        assert!(lint_page(&NoMissingReferences, &html).is_empty());
    }

    #[test]
    fn test_attribute_scope_respected() {
        // `for` on a div is not a reference
        let html = page(r#"<div for="nothing"></div>"#);
        assert!(lint_page(&NoMissingReferences, &html).is_empty());
    }
}
