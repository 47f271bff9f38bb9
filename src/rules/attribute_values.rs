//! `attribute-allowed-values`: enumerated, numeric and boolean attribute values

use super::element_name::in_foreign_content;
use super::{report, Rule, ATTRIBUTE_ALLOWED_VALUES};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::{Document, Node};
use crate::htmlspec::attributes::{self, ValueSyntax};
use crate::htmlspec::{aria, AttrType};
use crate::template::is_templated;

pub struct AttributeAllowedValues;

const AUTOCOMPLETE_ELEMENTS: &[&str] = &["input", "select", "textarea"];

impl AttributeAllowedValues {
    fn check_attr(&self, node: &Node, name: &str, value: &str) -> Option<(Severity, String)> {
        let tag = node.tag.as_str();

        if let Some(enumerated) = attributes::enumerated(tag, name) {
            let lowered = value.trim().to_ascii_lowercase();
            return match enumerated.syntax {
                ValueSyntax::Keyword if !enumerated.values.contains(lowered.as_str()) => Some((
                    Severity::Error,
                    format!("invalid value '{}' for attribute '{}' on <{}>", value, name, tag),
                )),
                ValueSyntax::Keyword => None,
                ValueSyntax::TokenList => lowered
                    .split_ascii_whitespace()
                    .find(|token| !enumerated.values.contains(token))
                    .map(|token| {
                        let severity = if name == "sandbox" {
                            Severity::Error
                        } else {
                            Severity::Warning
                        };
                        (
                            severity,
                            format!("unknown token '{}' in attribute '{}' on <{}>", token, name, tag),
                        )
                    }),
            };
        }

        match name {
            "autocomplete" if tag == "form" => {
                let lowered = value.trim().to_ascii_lowercase();
                (lowered != "on" && lowered != "off").then(|| {
                    (
                        Severity::Error,
                        format!("form autocomplete must be 'on' or 'off', found '{}'", value),
                    )
                })
            }
            "autocomplete" if AUTOCOMPLETE_ELEMENTS.contains(&tag) => {
                (!attributes::is_valid_autocomplete(&value.to_ascii_lowercase())).then(|| {
                    (Severity::Error, format!("invalid autocomplete value '{}'", value))
                })
            }
            "role" => self.check_role(node, value),
            _ => self.check_typed(tag, name, value),
        }
    }

    fn check_role(&self, node: &Node, value: &str) -> Option<(Severity, String)> {
        let role = value.split_ascii_whitespace().next()?.to_ascii_lowercase();

        if aria::ABSTRACT_ROLES.contains(role.as_str()) {
            return Some((
                Severity::Error,
                format!("role '{}' is abstract and must not be used", role),
            ));
        }

        // <a> only has the link role when it has an href
        if node.tag == "a" && !node.has_attr("href") {
            return None;
        }
        let implicit = aria::implicit_role(&node.tag, node.attr("type"))?;
        (implicit == role).then(|| {
            (
                Severity::Warning,
                format!("role '{}' is implicit on <{}> and can be removed", role, node.tag),
            )
        })
    }

    fn check_typed(&self, tag: &str, name: &str, value: &str) -> Option<(Severity, String)> {
        let spec = attributes::attr_spec(name).filter(|s| s.is_valid_on(tag))?;
        let trimmed = value.trim();

        match spec.kind {
            AttrType::Integer if trimmed.parse::<i64>().is_err() => Some((
                Severity::Error,
                format!("attribute '{}' must be an integer, found '{}'", name, value),
            )),
            AttrType::Positive if !trimmed.parse::<u64>().is_ok_and(|n| n > 0) => Some((
                Severity::Error,
                format!("attribute '{}' must be a positive integer, found '{}'", name, value),
            )),
            AttrType::Boolean if !value.is_empty() && !value.eq_ignore_ascii_case(name) => {
                Some((
                    Severity::Warning,
                    format!(
                        "boolean attribute '{}' ignores its value '{}'; presence alone enables it",
                        name, value
                    ),
                ))
            }
            _ => None,
        }
    }
}

impl Rule for AttributeAllowedValues {
    fn id(&self) -> &'static str {
        ATTRIBUTE_ALLOWED_VALUES
    }

    fn description(&self) -> &'static str {
        "attribute values must be allowed for their attribute"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        let mut results = Vec::new();

        for (id, node) in doc.elements() {
            if in_foreign_content(doc, id) || node.is("svg") || node.is("math") {
                continue;
            }
            for attr in &node.attrs {
                if is_templated(&attr.value) {
                    continue;
                }
                let name = attr.name.to_ascii_lowercase();
                if let Some((severity, message)) = self.check_attr(node, &name, &attr.value) {
                    results.push(report(doc, node, ATTRIBUTE_ALLOWED_VALUES, severity, message));
                }
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{lint, messages};

    fn check(html: &str) -> Vec<Diagnostic> {
        lint(&AttributeAllowedValues, html)
    }

    #[test]
    fn test_valid_values_pass() {
        let html = r#"
            <form method="POST" enctype="multipart/form-data" autocomplete="off">
              <input type="email" autocomplete="shipping email">
              <button type="submit">Go</button>
            </form>
            <a href="/" target="_blank" rel="noopener noreferrer">x</a>
            <img src="a.png" alt="" loading="lazy" decoding="async">
            <iframe src="/f" sandbox="allow-scripts allow-forms"></iframe>
            <script type="module"></script>
        "#;
        assert_eq!(messages(&check(html)), Vec::<&str>::new());
    }

    #[test]
    fn test_invalid_keyword() {
        let results = check(r#"<input type="txt">"#);
        assert_eq!(messages(&results), vec!["invalid value 'txt' for attribute 'type' on <input>"]);
        assert_eq!(results[0].severity, Severity::Error);
    }

    #[test]
    fn test_unknown_rel_token_is_warning() {
        let results = check(r#"<a href="/" rel="noopener sponsored-ish">x</a>"#);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].severity, Severity::Warning);
    }

    #[test]
    fn test_unknown_sandbox_token_is_error() {
        let results = check(r#"<iframe sandbox="allow-everything"></iframe>"#);
        assert_eq!(results[0].severity, Severity::Error);
    }

    #[test]
    fn test_autocomplete() {
        assert_eq!(check(r#"<input autocomplete="emial">"#).len(), 1);
        assert_eq!(check(r#"<form autocomplete="email"></form>"#).len(), 1);
        assert!(check(r#"<input autocomplete="section-a billing cc-number">"#).is_empty());
    }

    #[test]
    fn test_numeric_attributes() {
        let results = check(r#"<table><tr><td colspan="0">a</td><td rowspan="x">b</td></tr></table>"#);
        assert_eq!(results.len(), 2);
        assert!(results[0].message.contains("positive integer"));
    }

    #[test]
    fn test_boolean_attribute_value() {
        let results = check(r#"<input disabled="false"><input disabled><input disabled="disabled">"#);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].severity, Severity::Warning);
    }

    #[test]
    fn test_roles() {
        let results = check(r#"<div role="widget"></div><nav role="navigation"></nav><a role="link">x</a>"#);
        assert_eq!(
            messages(&results),
            vec![
                "role 'widget' is abstract and must not be used",
                "role 'navigation' is implicit on <nav> and can be removed",
            ]
        );
    }

    #[test]
    fn test_templated_values_skipped() {
        assert!(check(r#"<input type="{{ .Kind }}"><a target="{{.T}}">x</a>"#).is_empty());
    }

    #[test]
    fn test_svg_attributes_ignored() {
        assert!(check(r#"<svg><rect width="x" disabled="no"></rect></svg>"#).is_empty());
    }
}
