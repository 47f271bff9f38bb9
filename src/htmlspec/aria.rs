//! ARIA role maps and element groupings used by accessibility checks

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Elements that can be associated with a `<label>` (hidden inputs excluded)
pub static LABELABLE_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["button", "input", "meter", "output", "progress", "select", "textarea"]
        .into_iter()
        .collect()
});

/// Implicit ARIA role of an element; `input` depends on its type
pub static IMPLICIT_ROLES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("a", "link"),
        ("article", "article"),
        ("aside", "complementary"),
        ("button", "button"),
        ("dialog", "dialog"),
        ("form", "form"),
        ("h1", "heading"),
        ("h2", "heading"),
        ("h3", "heading"),
        ("h4", "heading"),
        ("h5", "heading"),
        ("h6", "heading"),
        ("header", "banner"),
        ("footer", "contentinfo"),
        ("img", "img"),
        ("li", "listitem"),
        ("main", "main"),
        ("nav", "navigation"),
        ("ol", "list"),
        ("option", "option"),
        ("progress", "progressbar"),
        ("section", "region"),
        ("select", "combobox"),
        ("table", "table"),
        ("tbody", "rowgroup"),
        ("td", "cell"),
        ("textarea", "textbox"),
        ("tfoot", "rowgroup"),
        ("th", "columnheader"),
        ("thead", "rowgroup"),
        ("tr", "row"),
        ("ul", "list"),
    ]
    .into_iter()
    .collect()
});

pub static INPUT_TYPE_ROLES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("button", "button"),
        ("checkbox", "checkbox"),
        ("email", "textbox"),
        ("image", "button"),
        ("number", "spinbutton"),
        ("radio", "radio"),
        ("range", "slider"),
        ("reset", "button"),
        ("search", "searchbox"),
        ("submit", "button"),
        ("tel", "textbox"),
        ("text", "textbox"),
        ("url", "textbox"),
    ]
    .into_iter()
    .collect()
});

/// Elements that submit a name/value pair with their form
pub static FORM_CONTROL_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["input", "select", "textarea", "button", "output"]
        .into_iter()
        .collect()
});

/// Roles that exist only as ontology categories and may not be used directly
pub static ABSTRACT_ROLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "command", "composite", "input", "landmark", "range", "roletype", "section",
        "sectionhead", "select", "structure", "widget", "window",
    ]
    .into_iter()
    .collect()
});

/// Implicit role of an element, resolving `input` by its type
pub fn implicit_role(tag: &str, input_type: Option<&str>) -> Option<&'static str> {
    if tag == "input" {
        let kind = input_type.unwrap_or("text").to_ascii_lowercase();
        return INPUT_TYPE_ROLES.get(kind.as_str()).copied();
    }
    IMPLICIT_ROLES.get(tag).copied()
}

/// True when a `<label>` may point at this element
pub fn is_labelable(tag: &str, input_type: Option<&str>) -> bool {
    LABELABLE_ELEMENTS.contains(tag)
        && !(tag == "input" && input_type.is_some_and(|t| t.eq_ignore_ascii_case("hidden")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implicit_role() {
        assert_eq!(implicit_role("nav", None), Some("navigation"));
        assert_eq!(implicit_role("input", None), Some("textbox"));
        assert_eq!(implicit_role("input", Some("RANGE")), Some("slider"));
        assert_eq!(implicit_role("input", Some("hidden")), None);
        assert_eq!(implicit_role("div", None), None);
    }

    #[test]
    fn test_is_labelable() {
        assert!(is_labelable("select", None));
        assert!(is_labelable("input", Some("text")));
        assert!(!is_labelable("input", Some("Hidden")));
        assert!(!is_labelable("div", None));
    }

    #[test]
    fn test_abstract_roles() {
        assert!(ABSTRACT_ROLES.contains("widget"));
        assert!(!ABSTRACT_ROLES.contains("button"));
        assert!(FORM_CONTROL_ELEMENTS.contains("output"));
    }
}
