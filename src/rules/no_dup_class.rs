//! `no-dup-class`: repeated class tokens

use super::{report, Rule, NO_DUP_CLASS};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::Document;
use crate::template::PLACEHOLDER;
use std::collections::HashSet;

pub struct NoDupClass;

impl Rule for NoDupClass {
    fn id(&self) -> &'static str {
        NO_DUP_CLASS
    }

    fn description(&self) -> &'static str {
        "class attribute must not repeat a class name"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        let mut results = Vec::new();

        for (_, node) in doc.elements() {
            let Some(classes) = node.attr("class") else {
                continue;
            };
            let mut seen = HashSet::new();
            let mut reported = HashSet::new();

            for class in classes.split_ascii_whitespace() {
                // Each directive leaves its own placeholder behind
                if class.contains(PLACEHOLDER) || class.contains("{{") {
                    continue;
                }
                if !seen.insert(class) && reported.insert(class) {
                    results.push(report(
                        doc,
                        node,
                        NO_DUP_CLASS,
                        Severity::Warning,
                        format!("duplicate class '{}'", class),
                    ));
                }
            }
        }

        results
    }
}
