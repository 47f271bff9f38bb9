//! `attribute-misuse`: attributes on elements they do not apply to

use super::element_name::in_foreign_content;
use super::{report, Rule, ATTRIBUTE_MISUSE};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::Document;
use crate::htmlspec::{attributes, elements, htmx};

pub struct AttributeMisuse;

impl Rule for AttributeMisuse {
    fn id(&self) -> &'static str {
        ATTRIBUTE_MISUSE
    }

    fn description(&self) -> &'static str {
        "attributes must be used on elements that support them"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        let mut results = Vec::new();

        for (id, node) in doc.elements() {
            if elements::is_custom_element(&node.tag) || in_foreign_content(doc, id) || node.is("svg") {
                continue;
            }

            for attr in &node.attrs {
                let name = attr.name.to_ascii_lowercase();

                // The htmx namespace belongs to input-attributes
                if htmx::is_htmx_attribute(&name) {
                    continue;
                }

                let Some(spec) = attributes::attr_spec(&name) else {
                    continue;
                };
                let message = if let Some(guidance) = spec.deprecated {
                    format!("attribute '{}' is deprecated; {}", name, guidance)
                } else if !spec.is_valid_on(&node.tag) {
                    format!("attribute '{}' is not valid on <{}>", name, node.tag)
                } else {
                    continue;
                };
                results.push(report(doc, node, ATTRIBUTE_MISUSE, Severity::Warning, message));
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{lint, messages};

    #[test]
    fn test_attributes_in_place_pass() {
        let html = r#"<a href="/">x</a><img src="a.png" alt="a"><label for="x">L</label><input id="x" required>"#;
        assert!(lint(&AttributeMisuse, html).is_empty());
    }

    #[test]
    fn test_misplaced_attribute() {
        let results = lint(&AttributeMisuse, r#"<div href="/x" alt="no"></div>"#);
        assert_eq!(
            messages(&results),
            vec!["attribute 'href' is not valid on <div>", "attribute 'alt' is not valid on <div>"]
        );
        assert_eq!(results[0].severity, Severity::Warning);
    }

    #[test]
    fn test_deprecated_attribute() {
        let results = lint(&AttributeMisuse, r#"<p align="center">x</p>"#);
        assert_eq!(
            messages(&results),
            vec!["attribute 'align' is deprecated; use CSS text-align or flexbox"]
        );
    }

    #[test]
    fn test_htmx_attributes_left_alone() {
        let html = r#"<button hx-get="/x" data-hx-bogus="1">x</button>"#;
        assert!(lint(&AttributeMisuse, html).is_empty());
    }

    #[test]
    fn test_custom_and_svg_elements_skipped() {
        let html = r#"<my-link href="/"></my-link><svg><a href="/"><text x="1">t</text></a></svg>"#;
        assert!(lint(&AttributeMisuse, html).is_empty());
    }
}
