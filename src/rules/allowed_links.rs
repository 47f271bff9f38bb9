//! `allowed-links`: script and data URLs in link attributes

use super::{report, Rule, ALLOWED_LINKS};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::Document;
use crate::template::is_templated;

pub struct AllowedLinks;

/// Attributes that navigate or submit
const NAVIGATION_ATTRIBUTES: &[&str] = &["href", "action", "formaction"];

/// URL scheme, lowercased, ignoring the whitespace and control characters browsers strip
fn scheme(url: &str) -> Option<String> {
    let cleaned: String = url
        .trim()
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .take_while(|&c| c != '/' && c != '?' && c != '#')
        .collect();
    cleaned
        .split_once(':')
        .map(|(scheme, _)| scheme.to_ascii_lowercase())
}

impl Rule for AllowedLinks {
    fn id(&self) -> &'static str {
        ALLOWED_LINKS
    }

    fn description(&self) -> &'static str {
        "links must not use javascript: or data: URLs"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        let mut results = Vec::new();

        for (_, node) in doc.elements() {
            for attr in &node.attrs {
                let name = attr.name.to_ascii_lowercase();
                let navigates = NAVIGATION_ATTRIBUTES.contains(&name.as_str());
                if !(navigates || name == "src") || is_templated(&attr.value) {
                    continue;
                }

                let message = match scheme(&attr.value).as_deref() {
                    Some("javascript") => format!("javascript: URL in {} is not allowed", name),
                    Some("data") if navigates => format!("data: URL in {} is not allowed", name),
                    _ => continue,
                };
                results.push(report(doc, node, ALLOWED_LINKS, Severity::Error, message));
            }
        }

        results
    }
}
