//! `element-structure`: HTML content-model constraints
//!
//! Every violation is reported on its own; one element can produce several
//! diagnostics.

use super::element_name::in_foreign_content;
use super::{report, Rule, ELEMENT_STRUCTURE};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::{Document, Node, NodeId, NodeKind};
use crate::htmlspec::elements::{self, ALWAYS_ALLOWED_CHILDREN};
use crate::htmlspec::{ContentModel, ElementSpec};
use std::collections::HashMap;

pub struct ElementStructure;

/// `<a>, <b> or <c>`
fn tag_list(tags: &[&str]) -> String {
    let quoted: Vec<String> = tags.iter().map(|t| format!("<{}>", t)).collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
        _ => quoted.join(""),
    }
}

struct Checker<'a> {
    doc: &'a Document,
    results: Vec<Diagnostic>,
}

impl<'a> Checker<'a> {
    fn error(&mut self, node: &Node, message: String) {
        self.results
            .push(report(self.doc, node, ELEMENT_STRUCTURE, Severity::Error, message));
    }

    fn check_element(&mut self, id: NodeId, node: &'a Node) {
        if let Some(guidance) = elements::DEPRECATED_ELEMENTS.get(node.tag.as_str()) {
            self.results.push(report(
                self.doc,
                node,
                ELEMENT_STRUCTURE,
                Severity::Warning,
                format!("element <{}> is deprecated; {}", node.tag, guidance),
            ));
        }

        if elements::VOID_ELEMENTS.contains(node.tag.as_str()) && !node.children.is_empty() {
            self.error(node, format!("void element <{}> must not have children", node.tag));
        }

        let Some(spec) = elements::spec(&node.tag) else {
            return;
        };

        if let Some(guidance) = spec.deprecated {
            self.results.push(report(
                self.doc,
                node,
                ELEMENT_STRUCTURE,
                Severity::Warning,
                format!("element <{}> is deprecated; {}", node.tag, guidance),
            ));
        }

        self.check_placement(id, node, spec);
        self.check_children(node, spec);
        self.check_descendants(id, node, spec);

        for attr in spec.required_attributes {
            if !node.has_attr(attr) {
                self.error(
                    node,
                    format!("element <{}> is missing required attribute '{}'", node.tag, attr),
                );
            }
        }
    }

    fn check_placement(&mut self, id: NodeId, node: &Node, spec: &ElementSpec) {
        let doc = self.doc;
        let Some(parent) = node.parent.map(|p| doc.node(p)) else {
            return;
        };
        // Top-level nodes of a partial get their context from the including page
        if parent.kind == NodeKind::Document {
            return;
        }

        if !spec.permitted_parents.is_empty()
            && !spec.permitted_parents.iter().any(|p| parent.is(p))
        {
            self.error(
                node,
                format!(
                    "element <{}> is not allowed inside <{}>; expected parent {}",
                    node.tag,
                    parent.tag,
                    tag_list(spec.permitted_parents)
                ),
            );
        }

        if !spec.required_ancestors.is_empty()
            && !doc
                .ancestors(id)
                .any(|(_, a)| spec.required_ancestors.iter().any(|t| a.is(t)))
        {
            self.error(
                node,
                format!(
                    "element <{}> requires an ancestor {}",
                    node.tag,
                    tag_list(spec.required_ancestors)
                ),
            );
        }
    }

    fn check_children(&mut self, node: &Node, spec: &ElementSpec) {
        let doc = self.doc;
        let children: Vec<&Node> = node
            .children
            .iter()
            .map(|&c| doc.node(c))
            .filter(|c| c.is_element())
            .collect();

        if !spec.permitted_content.is_empty() {
            self.check_permitted(node, spec, &children);
        }

        for required in spec.required_children {
            if !children.iter().any(|c| c.is(required)) {
                self.error(
                    node,
                    format!("element <{}> is missing required child <{}>", node.tag, required),
                );
            }
        }
    }

    /// Children against `permitted_content`, widened by the content model
    fn check_permitted(&mut self, node: &Node, spec: &ElementSpec, children: &[&Node]) {
        let transparent = spec.content_model.contains(ContentModel::TRANSPARENT);
        let mut in_fallback = false;

        for child in children {
            let tag = child.tag.as_str();
            if ALWAYS_ALLOWED_CHILDREN.contains(&tag) {
                continue;
            }

            if spec.permitted_content.contains(&tag) {
                if in_fallback {
                    self.error(
                        child,
                        format!("element <{}> must come before fallback content in <{}>", tag, node.tag),
                    );
                }
                continue;
            }

            let accepted = if transparent {
                in_fallback = true;
                elements::categories(tag).contains(ContentModel::FLOW)
            } else {
                spec.content_model.intersects(elements::categories(tag))
            };
            if !accepted {
                self.error(
                    child,
                    format!("element <{}> is not allowed as a child of <{}>", tag, node.tag),
                );
            }
        }
    }

    fn check_descendants(&mut self, id: NodeId, node: &Node, spec: &ElementSpec) {
        if spec.forbidden_descendants.is_empty() {
            return;
        }
        let doc = self.doc;
        for (_, descendant) in doc.descendants(id) {
            if descendant.is_element() && spec.forbidden_descendants.contains(&descendant.tag.as_str()) {
                self.error(
                    descendant,
                    format!("element <{}> must not be nested inside <{}>", descendant.tag, node.tag),
                );
            }
        }
    }

    fn check_unique(&mut self) {
        let doc = self.doc;
        let mut counts: HashMap<(NodeId, &str), usize> = HashMap::new();

        for (id, node) in doc.elements() {
            let Some(&container) = elements::UNIQUE_ELEMENTS.get(node.tag.as_str()) else {
                continue;
            };
            let Some((container_id, _)) = doc.closest(id, container) else {
                continue;
            };
            let count = counts.entry((container_id, node.tag.as_str())).or_insert(0);
            *count += 1;
            if *count == 2 {
                self.error(
                    node,
                    format!("element <{}> must appear at most once in <{}>", node.tag, container),
                );
            }
        }
    }
}

impl Rule for ElementStructure {
    fn id(&self) -> &'static str {
        ELEMENT_STRUCTURE
    }

    fn description(&self) -> &'static str {
        "elements must follow HTML content-model rules"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        let mut checker = Checker {
            doc,
            results: Vec::new(),
        };

        for (id, node) in doc.elements() {
            if in_foreign_content(doc, id) {
                continue;
            }
            checker.check_element(id, node);
        }
        checker.check_unique();

        checker.results
    }
}
