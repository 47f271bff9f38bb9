//! Element names and content-model constraints

use super::{ContentModel, ElementSpec};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Elements that can never have children
pub static VOID_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ]
    .into_iter()
    .collect()
});

/// Standard HTML element names (custom elements are handled separately)
pub static VALID_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Document metadata
        "html", "head", "title", "base", "link", "meta", "style",
        // Sectioning root
        "body",
        // Content sectioning
        "article", "section", "nav", "aside", "h1", "h2", "h3", "h4", "h5", "h6", "hgroup",
        "header", "footer", "address",
        // Text content
        "p", "hr", "pre", "blockquote", "ol", "ul", "menu", "li", "dl", "dt", "dd", "figure",
        "figcaption", "main", "search", "div",
        // Inline text
        "a", "em", "strong", "small", "s", "cite", "q", "dfn", "abbr", "ruby", "rt", "rp",
        "data", "time", "code", "var", "samp", "kbd", "sub", "sup", "i", "b", "u", "mark", "bdi",
        "bdo", "span", "br", "wbr",
        // Edits
        "ins", "del",
        // Embedded content
        "picture", "source", "img", "iframe", "embed", "object", "param", "video", "audio",
        "track", "map", "area",
        // SVG and MathML roots
        "svg", "math",
        // Tabular data
        "table", "caption", "colgroup", "col", "tbody", "thead", "tfoot", "tr", "td", "th",
        // Forms
        "form", "label", "input", "button", "select", "datalist", "optgroup", "option",
        "textarea", "output", "progress", "meter", "fieldset", "legend",
        // Interactive
        "details", "summary", "dialog",
        // Scripting
        "script", "noscript", "template", "slot", "canvas",
    ]
    .into_iter()
    .collect()
});

/// Obsolete elements and what to use instead
pub static DEPRECATED_ELEMENTS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("acronym", "use <abbr>"),
        ("applet", "use <object> or <embed>"),
        ("basefont", "use CSS"),
        ("big", "use CSS"),
        ("blink", "use CSS animations"),
        ("center", "use CSS text-align"),
        ("dir", "use <ul>"),
        ("font", "use CSS"),
        ("frame", "use <iframe>"),
        ("frameset", "use <iframe> or CSS layout"),
        ("marquee", "use CSS animations"),
        ("strike", "use <s> or <del>"),
        ("tt", "use <code> or CSS"),
    ]
    .into_iter()
    .collect()
});

/// Children that are accepted regardless of a parent's permitted content
pub const ALWAYS_ALLOWED_CHILDREN: &[&str] = &["script", "template"];

const LIST_CONTENT: &[&str] = &["li", "script", "template"];
const ROW_GROUP_CONTENT: &[&str] = &["tr", "script", "template"];
const TABLE_PARENT: &[&str] = &["table"];
const INTERACTIVE_CONTENT: &[&str] = &["a", "button", "input", "select", "textarea"];
const MEDIA_ELEMENTS: &[&str] = &["audio", "video"];

const PHRASING_ELEMENTS: &[&str] = &[
    "a", "abbr", "audio", "b", "bdi", "bdo", "br", "button", "canvas", "cite", "code", "data",
    "datalist", "del", "dfn", "em", "embed", "i", "iframe", "img", "input", "ins", "kbd", "label",
    "map", "mark", "math", "meter", "noscript", "object", "output", "picture", "progress", "q",
    "ruby", "s", "samp", "script", "select", "slot", "small", "span", "strong", "sub", "sup",
    "svg", "template", "textarea", "time", "u", "var", "video", "wbr",
];

const FLOW_ONLY_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "dialog", "div", "dl", "fieldset",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup", "hr",
    "main", "menu", "nav", "ol", "p", "pre", "search", "section", "table", "ul",
];

const EMBEDDED_ELEMENTS: &[&str] = &[
    "audio", "canvas", "embed", "iframe", "img", "math", "object", "picture", "svg", "video",
];

const METADATA_ELEMENTS: &[&str] = &[
    "base", "link", "meta", "noscript", "script", "style", "template", "title",
];

/// Detailed constraints for the elements that need them
pub static ELEMENT_SPECS: Lazy<HashMap<&'static str, ElementSpec>> = Lazy::new(|| {
    use ContentModel as M;

    let e = ElementSpec::EMPTY;
    let void = ElementSpec { void: true, ..e };

    let mut specs: HashMap<&'static str, ElementSpec> = HashMap::new();

    // Document structure
    specs.insert("html", ElementSpec { required_children: &["head", "body"], ..e });
    specs.insert(
        "head",
        ElementSpec {
            content_model: M::METADATA,
            required_children: &["title"],
            permitted_parents: &["html"],
            ..e
        },
    );
    specs.insert("body", ElementSpec { content_model: M::FLOW, permitted_parents: &["html"], ..e });
    specs.insert("title", ElementSpec { permitted_parents: &["head"], ..e });

    // Lists
    specs.insert("ul", ElementSpec { permitted_content: LIST_CONTENT, ..e });
    specs.insert("ol", ElementSpec { permitted_content: LIST_CONTENT, ..e });
    specs.insert(
        "li",
        ElementSpec { content_model: M::FLOW, required_ancestors: &["ul", "ol", "menu"], ..e },
    );
    specs.insert(
        "dl",
        ElementSpec {
            permitted_content: &["dt", "dd", "div", "script", "template"],
            ..e
        },
    );
    specs.insert("dt", ElementSpec { content_model: M::FLOW, required_ancestors: &["dl"], ..e });
    specs.insert("dd", ElementSpec { content_model: M::FLOW, required_ancestors: &["dl"], ..e });

    // Tables
    specs.insert(
        "table",
        ElementSpec {
            permitted_content: &[
                "caption", "colgroup", "thead", "tbody", "tfoot", "tr", "script", "template",
            ],
            ..e
        },
    );
    specs.insert(
        "caption",
        ElementSpec {
            content_model: M::FLOW,
            permitted_parents: TABLE_PARENT,
            required_ancestors: TABLE_PARENT,
            ..e
        },
    );
    specs.insert(
        "colgroup",
        ElementSpec {
            permitted_content: &["col", "template"],
            permitted_parents: TABLE_PARENT,
            required_ancestors: TABLE_PARENT,
            ..e
        },
    );
    specs.insert(
        "col",
        ElementSpec { permitted_parents: &["colgroup"], required_ancestors: &["colgroup"], ..void },
    );
    for group in ["thead", "tbody", "tfoot"] {
        specs.insert(
            group,
            ElementSpec {
                permitted_content: ROW_GROUP_CONTENT,
                permitted_parents: TABLE_PARENT,
                required_ancestors: TABLE_PARENT,
                ..e
            },
        );
    }
    specs.insert(
        "tr",
        ElementSpec {
            permitted_content: &["td", "th", "script", "template"],
            required_ancestors: TABLE_PARENT,
            ..e
        },
    );
    for cell in ["td", "th"] {
        specs.insert(
            cell,
            ElementSpec {
                content_model: M::FLOW,
                permitted_parents: &["tr"],
                required_ancestors: TABLE_PARENT,
                ..e
            },
        );
    }

    // Forms
    specs.insert(
        "form",
        ElementSpec { content_model: M::FLOW, forbidden_descendants: &["form"], ..e },
    );
    specs.insert("fieldset", ElementSpec { content_model: M::FLOW, ..e });
    specs.insert(
        "legend",
        ElementSpec {
            content_model: M::PHRASING,
            permitted_parents: &["fieldset"],
            required_ancestors: &["fieldset"],
            ..e
        },
    );
    specs.insert(
        "label",
        ElementSpec {
            content_model: M::PHRASING,
            forbidden_descendants: &["label"],
            ..e
        },
    );
    specs.insert(
        "select",
        ElementSpec {
            permitted_content: &["option", "optgroup", "hr", "script", "template"],
            ..e
        },
    );
    specs.insert(
        "optgroup",
        ElementSpec {
            permitted_content: &["option", "script", "template"],
            permitted_parents: &["select"],
            required_ancestors: &["select"],
            ..e
        },
    );
    specs.insert(
        "option",
        ElementSpec { required_ancestors: &["select", "optgroup", "datalist"], ..e },
    );
    specs.insert(
        "datalist",
        ElementSpec {
            content_model: M::PHRASING,
            permitted_content: &["option", "script", "template"],
            ..e
        },
    );
    specs.insert(
        "button",
        ElementSpec {
            content_model: M::PHRASING,
            forbidden_descendants: INTERACTIVE_CONTENT,
            ..e
        },
    );

    // Media and embeds
    specs.insert(
        "picture",
        ElementSpec {
            permitted_content: &["source", "img", "script", "template"],
            ..e
        },
    );
    for media in ["video", "audio"] {
        specs.insert(
            media,
            ElementSpec {
                content_model: M::TRANSPARENT,
                permitted_content: &["source", "track"],
                forbidden_descendants: MEDIA_ELEMENTS,
                ..e
            },
        );
    }
    specs.insert(
        "source",
        ElementSpec {
            permitted_parents: &["audio", "video", "picture"],
            required_ancestors: &["audio", "video", "picture"],
            ..void
        },
    );
    specs.insert(
        "track",
        ElementSpec {
            permitted_parents: &["audio", "video"],
            required_ancestors: &["audio", "video"],
            ..void
        },
    );
    specs.insert(
        "map",
        ElementSpec { content_model: M::TRANSPARENT, ..e },
    );
    specs.insert("area", ElementSpec { required_ancestors: &["map"], ..void });
    specs.insert(
        "img",
        ElementSpec { required_attributes: &["src", "alt"], ..void },
    );
    specs.insert("param", ElementSpec { deprecated: Some("use the object data attribute"), ..void });

    // Interactive
    specs.insert("details", ElementSpec { content_model: M::FLOW, ..e });
    specs.insert(
        "summary",
        ElementSpec {
            content_model: M::PHRASING,
            permitted_parents: &["details"],
            required_ancestors: &["details"],
            ..e
        },
    );
    specs.insert(
        "figcaption",
        ElementSpec { content_model: M::FLOW, required_ancestors: &["figure"], ..e },
    );

    // Ruby annotations
    specs.insert(
        "ruby",
        ElementSpec { content_model: M::PHRASING, permitted_content: &["rt", "rp"], ..e },
    );
    for annotation in ["rt", "rp"] {
        specs.insert(
            annotation,
            ElementSpec {
                permitted_parents: &["ruby"],
                required_ancestors: &["ruby"],
                ..e
            },
        );
    }

    // Self-nesting restrictions
    specs.insert(
        "a",
        ElementSpec {
            content_model: M::TRANSPARENT,
            forbidden_descendants: &["a"],
            ..e
        },
    );
    let phrasing = ElementSpec { content_model: M::PHRASING, ..e };
    specs.insert("progress", ElementSpec { forbidden_descendants: &["progress"], ..phrasing });
    specs.insert("meter", ElementSpec { forbidden_descendants: &["meter"], ..phrasing });
    specs.insert("dfn", ElementSpec { forbidden_descendants: &["dfn"], ..phrasing });
    specs.insert("abbr", ElementSpec { forbidden_descendants: &["abbr"], ..phrasing });
    for tag in ["header", "footer"] {
        specs.insert(
            tag,
            ElementSpec {
                content_model: M::FLOW,
                forbidden_descendants: &["header", "footer"],
                ..e
            },
        );
    }
    specs.insert(
        "address",
        ElementSpec {
            content_model: M::FLOW,
            forbidden_descendants: &["address", "header", "footer"],
            ..e
        },
    );

    // Remaining void elements
    for tag in ["br", "hr", "input", "meta", "link", "base", "embed", "wbr"] {
        specs.entry(tag).or_insert(void);
    }

    specs
});

/// Elements that may appear at most once inside the given container
pub static UNIQUE_ELEMENTS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("title", "head"),
        ("base", "head"),
        ("main", "body"),
        ("caption", "table"),
        ("thead", "table"),
        ("tfoot", "table"),
        ("summary", "details"),
        ("legend", "fieldset"),
    ]
    .into_iter()
    .collect()
});

/// Constraints for a tag, if it has any
pub fn spec(tag: &str) -> Option<&'static ElementSpec> {
    ELEMENT_SPECS.get(tag)
}

/// Content categories an element belongs to when used as a child
///
/// Custom and unknown elements count as flow and phrasing; naming problems
/// belong to `element-name`.
pub fn categories(tag: &str) -> ContentModel {
    use ContentModel as M;

    if !VALID_ELEMENTS.contains(tag) {
        return M::FLOW | M::PHRASING;
    }

    let mut model = M::NONE;
    if PHRASING_ELEMENTS.contains(&tag) {
        model = model | M::FLOW | M::PHRASING;
    }
    if FLOW_ONLY_ELEMENTS.contains(&tag) {
        model = model | M::FLOW;
    }
    if EMBEDDED_ELEMENTS.contains(&tag) {
        model = model | M::EMBEDDED;
    }
    if METADATA_ELEMENTS.contains(&tag) {
        model = model | M::METADATA;
    }
    if matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "hgroup") {
        model = model | M::HEADING;
    }
    if matches!(tag, "article" | "aside" | "nav" | "section") {
        model = model | M::SECTIONING;
    }
    if INTERACTIVE_CONTENT.contains(&tag) || matches!(tag, "details" | "embed" | "iframe" | "label") {
        model = model | M::INTERACTIVE;
    }
    model
}

/// True for standard, deprecated and custom (hyphenated) element names
pub fn is_known_element(tag: &str) -> bool {
    let tag = tag.to_ascii_lowercase();
    VALID_ELEMENTS.contains(tag.as_str())
        || DEPRECATED_ELEMENTS.contains_key(tag.as_str())
        || is_custom_element(&tag)
}

/// Custom element names must contain a hyphen and start with a letter
pub fn is_custom_element(tag: &str) -> bool {
    tag.contains('-') && tag.starts_with(|c: char| c.is_ascii_alphabetic())
}
