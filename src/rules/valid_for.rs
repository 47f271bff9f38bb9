//! `valid-for`: label targets must be labelable

use super::references::id_index;
use super::{report, Rule, VALID_FOR};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::Document;
use crate::htmlspec::aria;
use crate::template::is_templated;

pub struct ValidFor;

impl Rule for ValidFor {
    fn id(&self) -> &'static str {
        VALID_FOR
    }

    fn description(&self) -> &'static str {
        "label for attribute must reference a labelable element"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        let index = id_index(doc);
        let mut results = Vec::new();

        for (_, label) in doc.elements().filter(|(_, n)| n.is("label")) {
            let target_id = label.attr_or_empty("for");
            if target_id.is_empty() || is_templated(target_id) {
                continue;
            }
            // Missing targets may live in another template
            let Some(&target) = index.get(target_id) else {
                continue;
            };

            let target = doc.node(target);
            if aria::is_labelable(&target.tag, target.attr("type")) {
                continue;
            }

            let message = if target.is("input") {
                "label for attribute references hidden input".to_string()
            } else {
                format!("label for attribute references non-labelable element <{}>", target.tag)
            };
            results.push(report(doc, label, VALID_FOR, Severity::Error, message));
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{lint, messages};

    #[test]
    fn test_labelable_target_passes() {
        let html = r#"<label for="q">Q</label><input id="q"><label for="s">S</label><select id="s"></select>"#;
        assert!(lint(&ValidFor, html).is_empty());
    }

    #[test]
    fn test_non_labelable_target() {
        let results = lint(&ValidFor, r#"<label for="d">D</label><div id="d"></div>"#);
        assert_eq!(
            messages(&results),
            vec!["label for attribute references non-labelable element <div>"]
        );
        assert_eq!(results[0].severity, Severity::Error);
    }

    #[test]
    fn test_hidden_input_target() {
        let results = lint(&ValidFor, r#"<label for="h">H</label><input type="hidden" id="h">"#);
        assert_eq!(messages(&results), vec!["label for attribute references hidden input"]);
    }

    #[test]
    fn test_missing_target_ignored() {
        assert!(lint(&ValidFor, r#"<label for="elsewhere">x</label>"#).is_empty());
    }

    #[test]
    fn test_templated_target_ignored() {
        assert!(lint(&ValidFor, r#"<label for="{{ .ID }}">x</label><div id="TMPL"></div>"#).is_empty());
    }
}
