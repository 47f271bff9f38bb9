//! `valid-id`: id attribute syntax

use super::{report, Rule, VALID_ID};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::Document;
use crate::template::is_templated;
use once_cell::sync::Lazy;
use regex::Regex;

static SAFE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").unwrap());

pub struct ValidId;

impl Rule for ValidId {
    fn id(&self) -> &'static str {
        VALID_ID
    }

    fn description(&self) -> &'static str {
        "id attributes must be non-empty, contain no whitespace and be selector-friendly"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        let mut results = Vec::new();

        for (_, node) in doc.elements() {
            let Some(id) = node.attr("id") else {
                continue;
            };
            if is_templated(id) {
                continue;
            }

            let problem = if id.is_empty() {
                Some((Severity::Error, "id attribute must not be empty".to_string()))
            } else if id.chars().any(char::is_whitespace) {
                Some((Severity::Error, format!("id '{}' must not contain whitespace", id)))
            } else if id.starts_with(|c: char| c.is_ascii_digit()) {
                Some((Severity::Warning, format!("id '{}' should not start with a digit", id)))
            } else if !SAFE_ID.is_match(id) {
                Some((
                    Severity::Warning,
                    format!("id '{}' contains characters that must be escaped in CSS selectors", id),
                ))
            } else {
                None
            };

            if let Some((severity, message)) = problem {
                results.push(report(doc, node, VALID_ID, severity, message));
            }
        }

        results
    }
}
