//! `form-dup-name`: duplicate control names inside one form

use super::{report, Rule, FORM_DUP_NAME};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::{Document, Node};
use crate::htmlspec::aria;
use crate::template::is_templated;
use std::collections::HashSet;

pub struct FormDupName;

/// Input types whose controls may share one name inside a form
const SHARED_INPUT_TYPES: &[&str] = &["radio", "checkbox", "submit", "button", "reset"];

/// Groups, plus action buttons where only the activated one is submitted
fn shares_names(control: &Node) -> bool {
    if control.is("button") {
        return true;
    }
    control.is("input")
        && SHARED_INPUT_TYPES.contains(&control.attr_or_empty("type").trim().to_ascii_lowercase().as_str())
}

impl Rule for FormDupName {
    fn id(&self) -> &'static str {
        FORM_DUP_NAME
    }

    fn description(&self) -> &'static str {
        "form controls inside one form must have unique names"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        let mut results = Vec::new();

        for (form_id, _) in doc.elements().filter(|(_, n)| n.is("form")) {
            let mut seen = HashSet::new();

            for (_, control) in doc.descendants(form_id) {
                if !control.is_element() || !aria::FORM_CONTROL_ELEMENTS.contains(control.tag.as_str()) {
                    continue;
                }
                let name = control.attr_or_empty("name");
                if name.is_empty() || name.ends_with("[]") || is_templated(name) {
                    continue;
                }
                if shares_names(control) {
                    continue;
                }
                if !seen.insert(name) {
                    results.push(report(
                        doc,
                        control,
                        FORM_DUP_NAME,
                        Severity::Error,
                        format!("duplicate form control name '{}'", name),
                    ));
                }
            }
        }

        results
    }
}
