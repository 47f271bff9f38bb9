//! `element-name`: unknown element names

use super::{report, Rule, ELEMENT_NAME};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::{Document, NodeId};
use crate::htmlspec::elements;
use crate::template::PLACEHOLDER;

pub struct ElementName;

/// True when the node sits inside an SVG or MathML subtree
pub(crate) fn in_foreign_content(doc: &Document, id: NodeId) -> bool {
    doc.ancestors(id).any(|(_, n)| n.is("svg") || n.is("math"))
}

impl Rule for ElementName {
    fn id(&self) -> &'static str {
        ELEMENT_NAME
    }

    fn description(&self) -> &'static str {
        "element names must be standard HTML or valid custom elements"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        doc.elements()
            .filter(|(_, node)| !node.tag.eq_ignore_ascii_case(PLACEHOLDER))
            .filter(|(_, node)| !elements::is_known_element(&node.tag))
            .filter(|(id, _)| !in_foreign_content(doc, *id))
            .map(|(_, node)| {
                report(
                    doc,
                    node,
                    ELEMENT_NAME,
                    Severity::Error,
                    format!("unknown element <{}>", node.tag),
                )
            })
            .collect()
    }
}
