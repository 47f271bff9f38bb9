//! `htmx-attributes`: the mini-languages inside htmx attributes
//!
//! Each grammar lives in its own module and returns [`Finding`]s, which are
//! anchored to the element here. Values that still carry a template directive
//! are skipped, since their runtime content is unknown.

mod on;
mod swap;
mod target;
mod trigger;

use super::{report, FrameworkSettings, HtmxVersion, Rule, HTMX_ATTRIBUTES};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::{Document, NodeId};
use crate::htmlspec::htmx;
use crate::template::is_templated;

/// A grammar violation before it is tied to a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

pub use on::validate_event_handler;
pub use swap::validate_swap;
pub use target::validate_target;
pub use trigger::validate_trigger;

/// Validates htmx attribute values
#[derive(Debug, Default)]
pub struct HtmxAttributes {
    settings: FrameworkSettings,
}

impl HtmxAttributes {
    pub fn new(settings: FrameworkSettings) -> Self {
        Self { settings }
    }

    fn version(&self) -> HtmxVersion {
        self.settings.htmx_version
    }

    fn validate_attribute(&self, name: &str, value: &str) -> Vec<Finding> {
        if htmx::is_event_handler_attribute(name) {
            // The event lives in the name, so templated values do not matter
            return validate_event_handler(name, self.version());
        }
        if value.is_empty() || is_templated(value) {
            return Vec::new();
        }
        match name {
            "hx-swap" => validate_swap(value, self.version()),
            "hx-trigger" => validate_trigger(value),
            "hx-target" => validate_target(value),
            "hx-vals" | "hx-headers" => validate_json(name, value),
            _ => Vec::new(),
        }
    }

    /// hx-get and friends on a submit button inside a form
    fn check_submit_button(&self, doc: &Document, id: NodeId) -> Option<Finding> {
        let node = doc.node(id);
        let kind = node.attr_or_empty("type").to_ascii_lowercase();
        let is_submit = (node.is("button") && (kind.is_empty() || kind == "submit"))
            || (node.is("input") && kind == "submit");
        if !is_submit {
            return None;
        }

        let request = node
            .attrs
            .iter()
            .map(|a| a.name.to_ascii_lowercase())
            .filter(|name| htmx::REQUEST_ATTRIBUTES.contains(&name.as_str()))
            .last()?;

        doc.closest(id, "form")?;
        Some(Finding::warning(format!(
            "{} on submit button inside form may bypass form validation; consider moving to the form element",
            request
        )))
    }
}

/// hx-vals and hx-headers must be JSON; hx-vals may instead be a script expression
fn validate_json(name: &str, value: &str) -> Vec<Finding> {
    if name == "hx-vals" && (value.starts_with("js:") || value.starts_with("javascript:")) {
        return Vec::new();
    }
    match serde_json::from_str::<serde_json::Value>(value) {
        Ok(_) => Vec::new(),
        Err(e) => vec![Finding::error(format!(
            "{} contains invalid JSON: syntax error at line {} column {}",
            name,
            e.line(),
            e.column()
        ))],
    }
}

impl Rule for HtmxAttributes {
    fn id(&self) -> &'static str {
        HTMX_ATTRIBUTES
    }

    fn description(&self) -> &'static str {
        "htmx attribute values must be valid"
    }

    fn configure(&mut self, settings: &FrameworkSettings) {
        self.settings = *settings;
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        if !self.settings.htmx_enabled {
            return Vec::new();
        }

        let mut results = Vec::new();
        for (id, node) in doc.elements() {
            let mut findings = Vec::new();
            for attr in &node.attrs {
                let name = attr.name.to_ascii_lowercase();
                if name.starts_with("hx-") {
                    findings.extend(self.validate_attribute(&name, &attr.value));
                }
            }
            findings.extend(self.check_submit_button(doc, id));

            results.extend(
                findings
                    .into_iter()
                    .map(|f| report(doc, node, HTMX_ATTRIBUTES, f.severity, f.message)),
            );
        }
        results
    }
}
