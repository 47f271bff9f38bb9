//! `input-attributes`: attributes that do not apply to an input's type, and the
//! htmx attribute names (flagged while htmx is off, checked against the
//! vocabulary while it is on)

use super::{report, FrameworkSettings, HtmxVersion, Rule, INPUT_ATTRIBUTES};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::{Document, Node};
use crate::htmlspec::{attributes, htmx};
use crate::template::is_templated;

#[derive(Debug, Default)]
pub struct InputAttributes {
    settings: FrameworkSettings,
}

impl InputAttributes {
    fn check_input_type(&self, doc: &Document, input: &Node, results: &mut Vec<Diagnostic>) {
        let kind = input.attr("type").unwrap_or("text").trim().to_ascii_lowercase();
        if is_templated(&kind) {
            return;
        }
        let Some(supported) = attributes::INPUT_TYPE_ATTRIBUTES.get(kind.as_str()) else {
            return;
        };

        for attr in &input.attrs {
            let name = attr.name.to_ascii_lowercase();
            if attributes::TYPE_SPECIFIC_INPUT_ATTRIBUTES.contains(name.as_str())
                && !supported.contains(name.as_str())
            {
                results.push(report(
                    doc,
                    input,
                    INPUT_ATTRIBUTES,
                    Severity::Warning,
                    format!("attribute '{}' does not apply to input type '{}'", name, kind),
                ));
            }
        }
    }

    fn check_htmx_disabled(&self, doc: &Document, node: &Node, results: &mut Vec<Diagnostic>) {
        for attr in &node.attrs {
            let name = attr.name.to_ascii_lowercase();
            if htmx::is_htmx_attribute(&name) {
                results.push(report(
                    doc,
                    node,
                    INPUT_ATTRIBUTES,
                    Severity::Warning,
                    format!("htmx attribute '{}' used but htmx not enabled", name),
                ));
            }
        }
    }

    fn check_htmx_names(&self, doc: &Document, node: &Node, results: &mut Vec<Diagnostic>) {
        for attr in &node.attrs {
            let lowered = attr.name.to_ascii_lowercase();
            let name = lowered.strip_prefix("data-").unwrap_or(&lowered);
            if !name.starts_with("hx-") || name.starts_with("hx-on") {
                continue;
            }

            let message = match self.settings.htmx_version {
                HtmxVersion::V2 if htmx::V4_ONLY_ATTRIBUTES.contains(name) => {
                    format!("htmx attribute '{}' is only available in htmx 4", name)
                }
                HtmxVersion::V4 if htmx::V4_DEPRECATED_ATTRIBUTES.contains(name) => {
                    format!("htmx attribute '{}' is deprecated in htmx 4", name)
                }
                _ if htmx::V2_ATTRIBUTES.contains(name) || htmx::V4_ONLY_ATTRIBUTES.contains(name) => {
                    continue
                }
                _ => format!("unknown htmx attribute '{}'", name),
            };
            results.push(report(doc, node, INPUT_ATTRIBUTES, Severity::Warning, message));
        }
    }
}

impl Rule for InputAttributes {
    fn id(&self) -> &'static str {
        INPUT_ATTRIBUTES
    }

    fn description(&self) -> &'static str {
        "input attributes must apply to the input type and htmx attributes must exist"
    }

    fn configure(&mut self, settings: &FrameworkSettings) {
        self.settings = *settings;
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        let mut results = Vec::new();

        for (_, node) in doc.elements() {
            if node.is("input") {
                self.check_input_type(doc, node, &mut results);
            }
            if self.settings.htmx_enabled {
                self.check_htmx_names(doc, node, &mut results);
            } else {
                self.check_htmx_disabled(doc, node, &mut results);
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{lint, messages};

    fn with_htmx(version: &str) -> InputAttributes {
        let mut rule = InputAttributes::default();
        rule.configure(&FrameworkSettings::htmx(version));
        rule
    }

    #[test]
    fn test_matching_attributes_pass() {
        let html = r#"<input type="email" multiple placeholder="a@b.c">
            <input type="checkbox" checked><input type="number" min="1" max="9" step="1">
            <input name="plain" maxlength="10">"#;
        assert!(lint(&InputAttributes::default(), html).is_empty());
    }

    #[test]
    fn test_attribute_not_for_type() {
        let results = lint(&InputAttributes::default(), r#"<input type="text" checked>"#);
        assert_eq!(messages(&results), vec!["attribute 'checked' does not apply to input type 'text'"]);
        assert_eq!(results[0].severity, Severity::Warning);
    }

    #[test]
    fn test_default_type_is_text() {
        let results = lint(&InputAttributes::default(), r#"<input min="3">"#);
        assert_eq!(messages(&results), vec!["attribute 'min' does not apply to input type 'text'"]);
    }

    #[test]
    fn test_unknown_type_skipped() {
        assert!(lint(&InputAttributes::default(), r#"<input type="{{ .T }}" checked>"#).is_empty());
        assert!(lint(&InputAttributes::default(), r#"<input type="wat" checked>"#).is_empty());
    }

    #[test]
    fn test_htmx_attribute_without_htmx() {
        let results = lint(&InputAttributes::default(), r#"<input type="text" hx-get="/api" data-hx-trigger="keyup">"#);
        assert_eq!(
            messages(&results),
            vec![
                "htmx attribute 'hx-get' used but htmx not enabled",
                "htmx attribute 'data-hx-trigger' used but htmx not enabled",
            ]
        );
        assert!(results.iter().all(|d| d.rule_id == INPUT_ATTRIBUTES && d.severity == Severity::Warning));
    }

    #[test]
    fn test_htmx_attribute_with_htmx_enabled_passes() {
        assert!(lint(&with_htmx("2"), r#"<input type="text" hx-get="/api">"#).is_empty());
    }

    #[test]
    fn test_htmx_vocabulary_v2() {
        let html = r#"<div hx-get="/a" hx-bogus="1" hx-action="/b" hx-on:click="x()" data-hx-post="/c"></div>"#;
        let results = lint(&with_htmx("2"), html);
        assert_eq!(
            messages(&results),
            vec![
                "unknown htmx attribute 'hx-bogus'",
                "htmx attribute 'hx-action' is only available in htmx 4",
            ]
        );
    }

    #[test]
    fn test_htmx_vocabulary_v4() {
        let html = r#"<div hx-action="/b" hx-vars="a:1" hx-get="/a"></div>"#;
        let results = lint(&with_htmx("4"), html);
        assert_eq!(messages(&results), vec!["htmx attribute 'hx-vars' is deprecated in htmx 4"]);
    }
}
