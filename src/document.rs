//! HTML document model
//!
//! Preprocessed markup is parsed with html5ever into an `RcDom` and then copied
//! into an index arena. Children are owned through `Node::children`; the
//! `Node::parent` index is a plain back-reference.

use crate::template::{self, Preprocessor, SourceMap};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error during parsing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("input is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("HTML parse error: {0}")]
    Io(#[from] std::io::Error),
}

/// Index of a node inside its [`Document`]
pub type NodeId = usize;

/// Node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Doctype,
    Element,
    Text,
    Comment,
}

/// A single attribute as written on the element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A node in the document tree
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Lowercase tag name for elements, empty otherwise
    pub tag: String,
    pub attrs: Vec<Attribute>,
    /// Text or comment content
    pub text: String,
    /// 1-based line (best effort)
    pub line: usize,
    /// 1-based column (best effort)
    pub column: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, parent: Option<NodeId>, line: usize, column: usize) -> Self {
        Self {
            kind,
            tag: String::new(),
            attrs: Vec::new(),
            text: String::new(),
            line,
            column,
            parent,
            children: Vec::new(),
        }
    }

    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// True for an element with the given tag (case-insensitive)
    pub fn is(&self, tag: &str) -> bool {
        self.is_element() && self.tag.eq_ignore_ascii_case(tag)
    }

    /// Attribute value by name (case-insensitive)
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Attribute value, or "" when absent
    pub fn attr_or_empty(&self, name: &str) -> &str {
        self.attr(name).unwrap_or("")
    }
}

/// Which parser entry point produced a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Whole page with html/head/body
    Full,
    /// Partial content hoisted under a synthetic root
    Fragment,
}

/// A parsed source unit
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: PathBuf,
    /// Source begins with `{{define`
    pub is_template_fragment: bool,
    pub mode: ParseMode,
    pub source_map: SourceMap,
    nodes: Vec<Node>,
}

impl Document {
    /// Parse a full HTML page
    pub fn parse(filename: impl AsRef<Path>, content: &[u8]) -> Result<Self, ParseError> {
        Self::parse_with_mode(filename.as_ref(), content, ParseMode::Full)
    }

    /// Parse a template partial or other content without a document root
    pub fn parse_fragment(filename: impl AsRef<Path>, content: &[u8]) -> Result<Self, ParseError> {
        Self::parse_with_mode(filename.as_ref(), content, ParseMode::Fragment)
    }

    fn parse_with_mode(filename: &Path, content: &[u8], mode: ParseMode) -> Result<Self, ParseError> {
        let source = std::str::from_utf8(content)?;
        let processed = Preprocessor::new().process(source);

        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut processed.text.as_bytes())?;

        let mut builder = TreeBuilder {
            nodes: vec![Node::new(NodeKind::Document, None, 1, 1)],
            locator: Locator::new(&processed.text),
        };

        match mode {
            ParseMode::Full => builder.convert_children(&dom.document, 0),
            ParseMode::Fragment => builder.hoist_fragment(&dom.document),
        }

        log::debug!(
            "parsed {} ({:?}): {} nodes",
            filename.display(),
            mode,
            builder.nodes.len()
        );

        Ok(Self {
            filename: filename.to_path_buf(),
            is_template_fragment: template::is_template_fragment(source),
            mode,
            source_map: processed.source_map,
            nodes: builder.nodes,
        })
    }

    /// True when whole-document rules should not run
    pub fn is_fragment(&self) -> bool {
        self.is_template_fragment || self.mode == ParseMode::Fragment
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// All nodes in document order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate()
    }

    /// All elements in document order
    pub fn elements(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.iter().filter(|(_, n)| n.is_element())
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.nodes[id].parent,
        }
    }

    /// Descendants in document order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.nodes[id].children.clone();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// Nearest ancestor element with the given tag
    pub fn closest(&self, id: NodeId, tag: &str) -> Option<(NodeId, &Node)> {
        self.ancestors(id).find(|(_, n)| n.is(tag))
    }

    /// Concatenated text of all descendant text nodes, trimmed
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if self.nodes[id].kind == NodeKind::Text {
            out.push_str(&self.nodes[id].text);
        }
        for (_, node) in self.descendants(id) {
            if node.kind == NodeKind::Text {
                out.push_str(&node.text);
            }
        }
        out.trim().to_string()
    }
}

/// Iterator over ancestors
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = &self.doc.nodes[id];
        self.next = node.parent;
        Some((id, node))
    }
}

/// Iterator over descendants
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.doc.nodes[id];
        self.stack.extend(node.children.iter().rev());
        Some((id, node))
    }
}

/// Converts an `RcDom` into the arena in document order
struct TreeBuilder {
    nodes: Vec<Node>,
    locator: Locator,
}

impl TreeBuilder {
    fn push(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len();
        if let Some(parent) = node.parent {
            self.nodes[parent].children.push(id);
        }
        self.nodes.push(node);
        id
    }

    fn convert_children(&mut self, handle: &Handle, parent: NodeId) {
        for child in handle.children.borrow().iter() {
            self.convert(child, parent);
        }
    }

    /// Lift the contents of the implied html/head/body under the root
    fn hoist_fragment(&mut self, document: &Handle) {
        for child in document.children.borrow().iter() {
            match &child.data {
                RcNodeData::Element { name, .. } if &*name.local == "html" => {
                    for section in child.children.borrow().iter() {
                        match &section.data {
                            RcNodeData::Element { name, .. }
                                if matches!(&*name.local, "head" | "body") =>
                            {
                                self.convert_children(section, 0)
                            }
                            _ => self.convert(section, 0),
                        }
                    }
                }
                RcNodeData::Doctype { .. } => {}
                _ => self.convert(child, 0),
            }
        }
    }

    fn convert(&mut self, handle: &Handle, parent: NodeId) {
        let (line, column) = (self.nodes[parent].line, self.nodes[parent].column);

        match &handle.data {
            RcNodeData::Document => self.convert_children(handle, parent),
            RcNodeData::Doctype { .. } => {
                self.push(Node::new(NodeKind::Doctype, Some(parent), line, column));
            }
            RcNodeData::Text { contents } => {
                let mut node = Node::new(NodeKind::Text, Some(parent), line, column);
                node.text = contents.borrow().to_string();
                self.push(node);
            }
            RcNodeData::Comment { contents } => {
                let mut node = Node::new(NodeKind::Comment, Some(parent), line, column);
                node.text = contents.to_string();
                self.push(node);
            }
            RcNodeData::Element {
                name,
                attrs,
                template_contents,
                ..
            } => {
                let tag = name.local.to_string();
                let (line, column) = self.locator.find_start_tag(&tag).unwrap_or((line, column));

                let mut node = Node::new(NodeKind::Element, Some(parent), line, column);
                node.attrs = attrs
                    .borrow()
                    .iter()
                    .map(|a| Attribute {
                        name: qualified_attr_name(a),
                        value: a.value.to_string(),
                    })
                    .collect();
                node.tag = tag;
                let id = self.push(node);

                // <template> content lives in a separate fragment in the RcDom
                if let Some(contents) = template_contents.borrow().as_ref() {
                    self.convert_children(contents, id);
                }
                self.convert_children(handle, id);
            }
            RcNodeData::ProcessingInstruction { .. } => {}
        }
    }
}

/// Attribute name including any foreign prefix (`xlink:href`)
fn qualified_attr_name(attr: &html5ever::Attribute) -> String {
    match &attr.name.prefix {
        Some(prefix) => format!("{}:{}", prefix, attr.name.local),
        None => attr.name.local.to_string(),
    }
}

/// Elements whose content the tokenizer reads as text
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "textarea", "title", "xmp", "iframe", "noembed", "noframes", "noscript",
];

/// Elements the tree builder may create without a start tag in the source:
/// implied wrappers, `</p>`/`</br>` recovery and reopened formatting elements
const PARSER_INSERTED_ELEMENTS: &[&str] = &[
    "html", "head", "body", "tbody", "colgroup", "p", "br", "a", "b", "big", "code", "em",
    "font", "i", "nobr", "s", "small", "strike", "strong", "tt", "u",
];

/// Forward scan for start tags in the preprocessed source
///
/// Elements arrive in tree order, which matches source order for every
/// element the markup actually spells out. An element the tree builder
/// inserted on its own (`html`, `tbody`, ...) does not match the next start
/// tag, keeps its parent's position and leaves the cursor in place.
/// Any other mismatch means the tree was reordered, and the scan resyncs
/// on the next start tag with the element's name.
struct Locator {
    lowered: String,
    line_starts: Vec<usize>,
    cursor: usize,
}

impl Locator {
    fn new(text: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            lowered: text.to_ascii_lowercase(),
            line_starts,
            cursor: 0,
        }
    }

    /// Position of the start tag for the next element in tree order
    fn find_start_tag(&mut self, tag: &str) -> Option<(usize, usize)> {
        let tag = tag.to_ascii_lowercase();
        let (start, name_end) = self.start_tag_from(self.cursor)?;
        if self.lowered[start + 1..name_end] == *tag {
            return Some(self.consume(start, name_end, &tag));
        }
        if PARSER_INSERTED_ELEMENTS.contains(&tag.as_str()) {
            return None;
        }

        // Out of step, e.g. after foster parenting; resync on the tag name
        let mut from = name_end;
        while let Some((start, name_end)) = self.start_tag_from(from) {
            if self.lowered[start + 1..name_end] == *tag {
                return Some(self.consume(start, name_end, &tag));
            }
            from = name_end;
        }
        None
    }

    fn consume(&mut self, start: usize, name_end: usize, tag: &str) -> (usize, usize) {
        self.cursor = self.tag_end(name_end);
        if RAW_TEXT_ELEMENTS.contains(&tag) {
            let close = format!("</{}", tag);
            let body = self.cursor;
            self.cursor = self.lowered[body..]
                .find(&close)
                .map_or(self.lowered.len(), |i| body + i);
        }
        self.pos_to_line_col(start)
    }

    /// Next `<name` at or after `from`; end tags, doctypes and comments are skipped
    fn start_tag_from(&self, mut from: usize) -> Option<(usize, usize)> {
        let bytes = self.lowered.as_bytes();

        while let Some(rel) = self.lowered.get(from..)?.find('<') {
            let start = from + rel;
            if self.lowered[start..].starts_with("<!--") {
                from = self.lowered[start..]
                    .find("-->")
                    .map_or(self.lowered.len(), |i| start + i + 3);
                continue;
            }
            if bytes.get(start + 1).is_some_and(|b| b.is_ascii_alphabetic()) {
                let name_end = bytes[start + 1..]
                    .iter()
                    .position(|&b| b.is_ascii_whitespace() || matches!(b, b'>' | b'/'))
                    .map_or(bytes.len(), |i| start + 1 + i);
                return Some((start, name_end));
            }
            from = start + 1;
        }
        None
    }

    /// Offset just past the `>` closing a start tag, skipping quoted values
    fn tag_end(&self, from: usize) -> usize {
        let mut quote = None;
        for (i, &b) in self.lowered.as_bytes()[from..].iter().enumerate() {
            match quote {
                Some(q) if b == q => quote = None,
                Some(_) => {}
                None if b == b'"' || b == b'\'' => quote = Some(b),
                None if b == b'>' => return from + i + 1,
                None => {}
            }
        }
        self.lowered.len()
    }

    fn pos_to_line_col(&self, pos: usize) -> (usize, usize) {
        let line = self.line_starts.partition_point(|&start| start <= pos);
        let line_start = self.line_starts[line - 1];
        (line, pos - line_start + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fragment(html: &str) -> Document {
        Document::parse_fragment("test.html", html.as_bytes()).unwrap()
    }

    fn find<'a>(doc: &'a Document, tag: &str) -> (NodeId, &'a Node) {
        doc.elements().find(|(_, n)| n.is(tag)).unwrap()
    }

    #[test]
    fn test_fragment_has_no_implied_wrappers() {
        let doc = fragment("<div><span>hi</span></div>");
        let tags: Vec<&str> = doc.elements().map(|(_, n)| n.tag.as_str()).collect();
        assert_eq!(tags, vec!["div", "span"]);
        assert_eq!(doc.node(doc.root()).kind, NodeKind::Document);
        assert_eq!(doc.mode, ParseMode::Fragment);
    }

    #[test]
    fn test_full_document_keeps_structure() {
        let doc = Document::parse("page.html", b"<!DOCTYPE html><html lang=\"en\"><head><title>T</title></head><body><p>x</p></body></html>").unwrap();
        let tags: Vec<&str> = doc.elements().map(|(_, n)| n.tag.as_str()).collect();
        assert_eq!(tags, vec!["html", "head", "title", "body", "p"]);
        assert_eq!(find(&doc, "html").1.attr("lang"), Some("en"));
        assert!(!doc.is_fragment());
    }

    #[test]
    fn test_parent_links_match_children() {
        let doc = fragment("<ul><li>a</li><li>b <b>c</b></li></ul>");
        for (id, node) in doc.iter() {
            for &child in &node.children {
                assert_eq!(doc.node(child).parent, Some(id));
            }
            if let Some(parent) = node.parent {
                assert!(doc.node(parent).children.contains(&id));
            }
        }
    }

    #[test]
    fn test_attribute_lookup_is_case_insensitive() {
        let doc = fragment(r#"<input TYPE="text" Name="q">"#);
        let (_, input) = find(&doc, "input");
        assert_eq!(input.attr("type"), Some("text"));
        assert_eq!(input.attr("NAME"), Some("q"));
        assert!(!input.has_attr("value"));
    }

    #[test]
    fn test_ancestors_and_closest() {
        let doc = fragment("<form><div><button>go</button></div></form>");
        let (button, _) = find(&doc, "button");
        let tags: Vec<&str> = doc
            .ancestors(button)
            .filter(|(_, n)| n.is_element())
            .map(|(_, n)| n.tag.as_str())
            .collect();
        assert_eq!(tags, vec!["div", "form"]);
        assert!(doc.closest(button, "form").is_some());
        assert!(doc.closest(button, "table").is_none());
    }

    #[test]
    fn test_descendants_in_document_order() {
        let doc = fragment("<div><p><a>1</a></p><span>2</span></div>");
        let (div, _) = find(&doc, "div");
        let tags: Vec<&str> = doc
            .descendants(div)
            .filter(|(_, n)| n.is_element())
            .map(|(_, n)| n.tag.as_str())
            .collect();
        assert_eq!(tags, vec!["p", "a", "span"]);
    }

    #[test]
    fn test_text_content() {
        let doc = fragment("<p>  Hello <b>world</b> </p>");
        let (p, _) = find(&doc, "p");
        assert_eq!(doc.text_content(p), "Hello world");
    }

    #[test]
    fn test_positions_from_source() {
        let doc = fragment("<div>\n  <p>one</p>\n  <span>two</span>\n</div>");
        let (_, p) = find(&doc, "p");
        let (_, span) = find(&doc, "span");
        assert_eq!((p.line, p.column), (2, 3));
        assert_eq!((span.line, span.column), (3, 3));
    }

    #[test]
    fn test_positions_survive_preprocessing() {
        let doc = fragment("{{if .A}}\n<p>a</p>\n{{else}}\n<p>b</p>\n{{end}}\n<em>x</em>");
        let (_, em) = find(&doc, "em");
        assert_eq!(em.line, 6);
    }

    #[test]
    fn test_positions_after_inserted_table_body() {
        let doc = Document::parse(
            "t.html",
            b"<table><tr><td>a</td></tr></table>\n<p id=\"x\">x</p>\n<table><tbody><tr><td>b</td></tr></tbody></table>",
        )
        .unwrap();
        let (_, p) = find(&doc, "p");
        assert_eq!((p.line, p.column), (2, 1));

        let bodies: Vec<(usize, usize)> = doc
            .elements()
            .filter(|(_, n)| n.is("tbody"))
            .map(|(_, n)| (n.line, n.column))
            .collect();
        assert_eq!(bodies, vec![(1, 1), (3, 8)]);
    }

    #[test]
    fn test_positions_skip_comments_and_raw_text() {
        let doc = fragment(
            "<div title=\"<span>\">\n<!-- <em>old</em> -->\n<script>if (a<b) {}</script>\n<em>x</em>\n<b>y</b></div>",
        );
        let (_, em) = find(&doc, "em");
        let (_, b) = find(&doc, "b");
        assert_eq!(em.line, 4);
        assert_eq!(b.line, 5);
    }

    #[test]
    fn test_positions_resync_after_foster_parenting() {
        let doc = fragment("<table><div>x</div>\n<tr><td>1</td></tr></table>\n<em>z</em>");
        let (_, div) = find(&doc, "div");
        let (_, td) = find(&doc, "td");
        let (_, em) = find(&doc, "em");
        assert_eq!((div.line, div.column), (1, 8));
        assert_eq!(td.line, 2);
        assert_eq!(em.line, 3);
    }

    #[test]
    fn test_implied_elements_inherit_parent_position() {
        let doc = Document::parse("t.html", b"<p>x</p>").unwrap();
        let (_, html) = find(&doc, "html");
        assert_eq!((html.line, html.column), (1, 1));
    }

    #[test]
    fn test_template_contents_are_children() {
        let doc = fragment("<template><li>row</li></template>");
        let (template, _) = find(&doc, "template");
        let (_, li) = find(&doc, "li");
        assert_eq!(li.parent, Some(template));
    }

    #[test]
    fn test_template_fragment_flag() {
        let doc = fragment("{{define \"row\"}}<div></div>{{end}}");
        assert!(doc.is_template_fragment);
        assert!(doc.is_fragment());
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let err = Document::parse_fragment("bad.html", &[0x3c, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, ParseError::Encoding(_)));
    }
}
