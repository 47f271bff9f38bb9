//! `no-inline-style`: style attributes

use super::{report, Rule, NO_INLINE_STYLE};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::Document;

pub struct NoInlineStyle;

impl Rule for NoInlineStyle {
    fn id(&self) -> &'static str {
        NO_INLINE_STYLE
    }

    fn description(&self) -> &'static str {
        "inline style attributes should be avoided"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        doc.elements()
            .filter(|(_, n)| n.has_attr("style"))
            .map(|(_, n)| {
                report(
                    doc,
                    n,
                    NO_INLINE_STYLE,
                    Severity::Warning,
                    format!("inline style on <{}>; move it to a stylesheet", n.tag),
                )
            })
            .collect()
    }
}
