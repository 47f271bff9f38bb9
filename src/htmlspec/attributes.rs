//! Attribute value vocabularies and per-attribute constraints

use super::{AttrSpec, AttrType};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

type Vocabulary = Lazy<HashSet<&'static str>>;

macro_rules! vocabulary {
    ($($value:expr),* $(,)?) => {
        Lazy::new(|| [$($value),*].into_iter().collect())
    };
}

/// Tokens accepted by `autocomplete`
pub static AUTOCOMPLETE_TOKENS: Vocabulary = vocabulary![
    "on", "off",
    // Contact information
    "name", "honorific-prefix", "given-name", "additional-name", "family-name",
    "honorific-suffix", "nickname", "organization-title", "username", "new-password",
    "current-password", "one-time-code", "organization", "street-address", "address-line1",
    "address-line2", "address-line3", "address-level4", "address-level3", "address-level2",
    "address-level1", "country", "country-name", "postal-code", "cc-name", "cc-given-name",
    "cc-additional-name", "cc-family-name", "cc-number", "cc-exp", "cc-exp-month", "cc-exp-year",
    "cc-csc", "cc-type", "transaction-currency", "transaction-amount", "language", "bday",
    "bday-day", "bday-month", "bday-year", "sex", "url", "photo",
    // Telephone
    "tel", "tel-country-code", "tel-national", "tel-area-code", "tel-local", "tel-local-prefix",
    "tel-local-suffix", "tel-extension",
    // Email and messaging
    "email", "impp",
    "webauthn",
];

/// Prefixes that scope an autocomplete token to a section or address group
pub const AUTOCOMPLETE_SECTION_PREFIXES: &[&str] = &["section-", "shipping", "billing"];

pub static INPUT_TYPES: Vocabulary = vocabulary![
    "button", "checkbox", "color", "date", "datetime-local", "email", "file", "hidden", "image",
    "month", "number", "password", "radio", "range", "reset", "search", "submit", "tel", "text",
    "time", "url", "week",
];

pub static BUTTON_TYPES: Vocabulary = vocabulary!["submit", "reset", "button"];

/// Script types, including data blocks; empty means JavaScript
pub static SCRIPT_TYPES: Vocabulary = vocabulary![
    "", "text/javascript", "application/javascript", "text/ecmascript", "application/ecmascript",
    "module", "importmap", "speculationrules", "text/html", "application/json",
    "application/ld+json", "text/plain",
];

pub static LINK_RELS: Vocabulary = vocabulary![
    "alternate", "author", "canonical", "dns-prefetch", "expect", "help", "icon", "license",
    "manifest", "modulepreload", "next", "pingback", "preconnect", "prefetch", "preload",
    "prerender", "prev", "privacy-policy", "search", "stylesheet", "terms-of-service",
];

pub static ANCHOR_RELS: Vocabulary = vocabulary![
    "alternate", "author", "bookmark", "external", "help", "license", "me", "next", "nofollow",
    "noopener", "noreferrer", "opener", "prev", "privacy-policy", "search", "tag",
    "terms-of-service",
];

pub static FORM_METHODS: Vocabulary = vocabulary!["get", "post", "dialog"];

pub static FORM_ENCTYPES: Vocabulary =
    vocabulary!["application/x-www-form-urlencoded", "multipart/form-data", "text/plain"];

pub static TARGETS: Vocabulary = vocabulary!["_self", "_blank", "_parent", "_top"];

pub static SCOPE_VALUES: Vocabulary = vocabulary!["row", "col", "rowgroup", "colgroup"];

pub static DIR_VALUES: Vocabulary = vocabulary!["ltr", "rtl", "auto"];

pub static LOADING_VALUES: Vocabulary = vocabulary!["eager", "lazy"];

pub static DECODING_VALUES: Vocabulary = vocabulary!["sync", "async", "auto"];

/// Empty is the same as `anonymous`
pub static CROSSORIGIN_VALUES: Vocabulary = vocabulary!["", "anonymous", "use-credentials"];

pub static REFERRER_POLICIES: Vocabulary = vocabulary![
    "", "no-referrer", "no-referrer-when-downgrade", "origin", "origin-when-cross-origin",
    "same-origin", "strict-origin", "strict-origin-when-cross-origin", "unsafe-url",
];

pub static SANDBOX_TOKENS: Vocabulary = vocabulary![
    "allow-downloads", "allow-forms", "allow-modals", "allow-orientation-lock",
    "allow-pointer-lock", "allow-popups", "allow-popups-to-escape-sandbox", "allow-presentation",
    "allow-same-origin", "allow-scripts", "allow-storage-access-by-user-activation",
    "allow-top-navigation", "allow-top-navigation-by-user-activation",
    "allow-top-navigation-to-custom-protocols",
];

/// Whether a value is one keyword or a space-separated token list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSyntax {
    Keyword,
    TokenList,
}

/// An enumerated attribute and where it applies
#[derive(Debug, Clone, Copy)]
pub struct EnumeratedAttr {
    pub attr: &'static str,
    /// Elements this vocabulary applies to; empty means every element
    pub elements: &'static [&'static str],
    pub values: &'static Vocabulary,
    pub syntax: ValueSyntax,
}

const fn keyword(
    attr: &'static str,
    elements: &'static [&'static str],
    values: &'static Vocabulary,
) -> EnumeratedAttr {
    EnumeratedAttr { attr, elements, values, syntax: ValueSyntax::Keyword }
}

const fn tokens(
    attr: &'static str,
    elements: &'static [&'static str],
    values: &'static Vocabulary,
) -> EnumeratedAttr {
    EnumeratedAttr { attr, elements, values, syntax: ValueSyntax::TokenList }
}

/// Enumerated attributes checked by value, in lookup order
pub static ENUMERATED_ATTRIBUTES: &[EnumeratedAttr] = &[
    keyword("type", &["input"], &INPUT_TYPES),
    keyword("type", &["button"], &BUTTON_TYPES),
    keyword("type", &["script"], &SCRIPT_TYPES),
    keyword("method", &["form"], &FORM_METHODS),
    keyword("formmethod", &["button", "input"], &FORM_METHODS),
    keyword("enctype", &["form"], &FORM_ENCTYPES),
    keyword("formenctype", &["button", "input"], &FORM_ENCTYPES),
    keyword("target", &["a", "area", "base", "form"], &TARGETS),
    keyword("formtarget", &["button", "input"], &TARGETS),
    keyword("scope", &["th"], &SCOPE_VALUES),
    keyword("dir", &[], &DIR_VALUES),
    keyword("loading", &["img", "iframe"], &LOADING_VALUES),
    keyword("decoding", &["img"], &DECODING_VALUES),
    keyword("crossorigin", &["audio", "img", "link", "script", "video"], &CROSSORIGIN_VALUES),
    keyword(
        "referrerpolicy",
        &["a", "area", "iframe", "img", "link", "script"],
        &REFERRER_POLICIES,
    ),
    tokens("sandbox", &["iframe"], &SANDBOX_TOKENS),
    tokens("rel", &["link"], &LINK_RELS),
    tokens("rel", &["a", "area"], &ANCHOR_RELS),
];

/// Vocabulary for an attribute on a given element, if it is enumerated there
pub fn enumerated(tag: &str, attr: &str) -> Option<&'static EnumeratedAttr> {
    ENUMERATED_ATTRIBUTES
        .iter()
        .find(|e| e.attr == attr && (e.elements.is_empty() || e.elements.contains(&tag)))
}

/// Check an `autocomplete` value: optional section and address-group prefixes,
/// then one field name, with an optional trailing `webauthn`
pub fn is_valid_autocomplete(value: &str) -> bool {
    let mut tokens: Vec<&str> = value.split_ascii_whitespace().collect();
    if tokens.is_empty() {
        return true;
    }
    if tokens.len() > 1 && tokens.last() == Some(&"webauthn") {
        tokens.pop();
    }
    let Some((field, prefixes)) = tokens.split_last() else {
        return true;
    };
    prefixes.iter().all(|p| {
        AUTOCOMPLETE_SECTION_PREFIXES
            .iter()
            .any(|prefix| p.starts_with(prefix))
            || matches!(*p, "home" | "work" | "mobile" | "fax" | "pager")
    }) && AUTOCOMPLETE_TOKENS.contains(field)
}

/// Attributes each input type supports beyond the global ones
pub static INPUT_TYPE_ATTRIBUTES: Lazy<HashMap<&'static str, HashSet<&'static str>>> =
    Lazy::new(|| {
        const TEXT_LIKE: &[&str] = &[
            "autocomplete", "list", "maxlength", "minlength", "pattern", "placeholder",
            "readonly", "required", "size",
        ];
        const DATE_LIKE: &[&str] =
            &["autocomplete", "list", "max", "min", "readonly", "required", "step"];
        const SUBMIT_LIKE: &[&str] =
            &["formaction", "formenctype", "formmethod", "formnovalidate", "formtarget"];

        let set = |parts: &[&[&'static str]]| -> HashSet<&'static str> {
            parts.iter().flat_map(|p| p.iter().copied()).collect()
        };

        let mut table = HashMap::new();
        table.insert("text", set(&[TEXT_LIKE, &["dirname"]]));
        table.insert("search", set(&[TEXT_LIKE, &["dirname"]]));
        table.insert("url", set(&[TEXT_LIKE]));
        table.insert("tel", set(&[TEXT_LIKE]));
        table.insert("email", set(&[TEXT_LIKE, &["multiple"]]));
        table.insert(
            "password",
            set(&[&[
                "autocomplete", "maxlength", "minlength", "pattern", "placeholder", "readonly",
                "required", "size",
            ]]),
        );
        for date in ["date", "month", "week", "time", "datetime-local"] {
            table.insert(date, set(&[DATE_LIKE]));
        }
        table.insert("number", set(&[DATE_LIKE, &["placeholder"]]));
        table.insert("range", set(&[&["autocomplete", "list", "max", "min", "step"]]));
        table.insert("color", set(&[&["autocomplete", "list"]]));
        table.insert("checkbox", set(&[&["checked", "required"]]));
        table.insert("radio", set(&[&["checked", "required"]]));
        table.insert("file", set(&[&["accept", "capture", "multiple", "required"]]));
        table.insert("submit", set(&[SUBMIT_LIKE]));
        table.insert("image", set(&[SUBMIT_LIKE, &["alt", "height", "src", "width"]]));
        table.insert("reset", HashSet::new());
        table.insert("button", HashSet::new());
        table.insert("hidden", set(&[&["autocomplete"]]));
        table
    });

/// Every attribute that appears in [`INPUT_TYPE_ATTRIBUTES`] for some type
pub static TYPE_SPECIFIC_INPUT_ATTRIBUTES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    INPUT_TYPE_ATTRIBUTES
        .values()
        .flat_map(|attrs| attrs.iter().copied())
        .collect()
});

const FORM_ASSOCIATED: &[&str] =
    &["button", "fieldset", "input", "object", "output", "select", "textarea"];
const MEDIA: &[&str] = &["audio", "video"];

/// Typed constraints for attributes the linter reasons about
pub static ATTRIBUTE_SPECS: Lazy<HashMap<&'static str, AttrSpec>> = Lazy::new(|| {
    use AttrType as T;

    let mut specs = HashMap::new();

    specs.insert("id", AttrSpec::of(T::Id));

    // References to other elements by id
    specs.insert("for", AttrSpec::of(T::IdRef).on(&["label", "output"]));
    specs.insert("list", AttrSpec::of(T::IdRef).on(&["input"]));
    specs.insert("form", AttrSpec::of(T::IdRef).on(FORM_ASSOCIATED));
    specs.insert("headers", AttrSpec::of(T::IdRefList).on(&["td", "th"]));
    specs.insert("popovertarget", AttrSpec::of(T::IdRef).on(&["button", "input"]));
    for aria in ["aria-activedescendant", "aria-errormessage"] {
        specs.insert(aria, AttrSpec::of(T::IdRef));
    }
    for aria in [
        "aria-labelledby",
        "aria-describedby",
        "aria-controls",
        "aria-owns",
        "aria-details",
        "aria-flowto",
    ] {
        specs.insert(aria, AttrSpec::of(T::IdRefList));
    }

    // Element-specific attributes
    specs.insert("href", AttrSpec::of(T::Url).on(&["a", "area", "base", "link"]));
    specs.insert(
        "src",
        AttrSpec::of(T::Url).on(&[
            "audio", "embed", "iframe", "img", "input", "script", "source", "track", "video",
        ]),
    );
    specs.insert("alt", AttrSpec::of(T::String).on(&["area", "img", "input"]));
    specs.insert("action", AttrSpec::of(T::Url).on(&["form"]));
    specs.insert("download", AttrSpec::of(T::String).on(&["a", "area"]));
    specs.insert("hreflang", AttrSpec::of(T::String).on(&["a", "link"]));
    specs.insert("ping", AttrSpec::of(T::String).on(&["a", "area"]));
    specs.insert("colspan", AttrSpec::of(T::Positive).on(&["td", "th"]));
    specs.insert("rowspan", AttrSpec::of(T::Integer).on(&["td", "th"]));
    specs.insert("scope", AttrSpec::of(T::Enum).on(&["th"]));
    specs.insert("checked", AttrSpec::of(T::Boolean).on(&["input"]));
    specs.insert("selected", AttrSpec::of(T::Boolean).on(&["option"]));
    specs.insert("multiple", AttrSpec::of(T::Boolean).on(&["input", "select"]));
    specs.insert("readonly", AttrSpec::of(T::Boolean).on(&["input", "textarea"]));
    specs.insert("required", AttrSpec::of(T::Boolean).on(&["input", "select", "textarea"]));
    specs.insert(
        "disabled",
        AttrSpec::of(T::Boolean).on(&[
            "button", "fieldset", "input", "optgroup", "option", "select", "textarea",
        ]),
    );
    specs.insert("placeholder", AttrSpec::of(T::String).on(&["input", "textarea"]));
    specs.insert("maxlength", AttrSpec::of(T::Integer).on(&["input", "textarea"]));
    specs.insert("minlength", AttrSpec::of(T::Integer).on(&["input", "textarea"]));
    specs.insert("rows", AttrSpec::of(T::Positive).on(&["textarea"]));
    specs.insert("cols", AttrSpec::of(T::Positive).on(&["textarea"]));
    specs.insert("wrap", AttrSpec::of(T::Enum).on(&["textarea"]));
    specs.insert("accept", AttrSpec::of(T::String).on(&["input"]));
    specs.insert("async", AttrSpec::of(T::Boolean).on(&["script"]));
    specs.insert("defer", AttrSpec::of(T::Boolean).on(&["script"]));
    specs.insert("nomodule", AttrSpec::of(T::Boolean).on(&["script"]));
    for media_attr in ["autoplay", "controls", "loop", "muted"] {
        specs.insert(media_attr, AttrSpec::of(T::Boolean).on(MEDIA));
    }
    specs.insert("poster", AttrSpec::of(T::Url).on(&["video"]));
    specs.insert("srcset", AttrSpec::of(T::String).on(&["img", "source"]));
    specs.insert("sizes", AttrSpec::of(T::String).on(&["img", "link", "source"]));
    specs.insert("loading", AttrSpec::of(T::Enum).on(&["img", "iframe"]));
    specs.insert("decoding", AttrSpec::of(T::Enum).on(&["img"]));
    specs.insert("reversed", AttrSpec::of(T::Boolean).on(&["ol"]));
    specs.insert("start", AttrSpec::of(T::Integer).on(&["ol"]));
    specs.insert("open", AttrSpec::of(T::Boolean).on(&["details", "dialog"]));
    specs.insert("datetime", AttrSpec::of(T::String).on(&["del", "ins", "time"]));
    specs.insert("cite", AttrSpec::of(T::Url).on(&["blockquote", "del", "ins", "q"]));
    specs.insert("span", AttrSpec::of(T::Positive).on(&["col", "colgroup"]));
    specs.insert("sandbox", AttrSpec::of(T::Enum).on(&["iframe"]));
    specs.insert("srcdoc", AttrSpec::of(T::String).on(&["iframe"]));
    specs.insert("allow", AttrSpec::of(T::String).on(&["iframe"]));
    specs.insert("http-equiv", AttrSpec::of(T::String).on(&["meta"]));
    specs.insert("content", AttrSpec::of(T::String).on(&["meta"]));
    specs.insert("usemap", AttrSpec::of(T::String).on(&["img", "object"]));
    specs.insert("ismap", AttrSpec::of(T::Boolean).on(&["img"]));

    // Presentational attributes replaced by CSS
    specs.insert("align", AttrSpec::of(T::String).deprecated("use CSS text-align or flexbox"));
    specs.insert("valign", AttrSpec::of(T::String).deprecated("use CSS vertical-align"));
    specs.insert("bgcolor", AttrSpec::of(T::String).deprecated("use CSS background-color"));
    specs.insert("background", AttrSpec::of(T::Url).deprecated("use CSS background-image"));
    specs.insert("cellpadding", AttrSpec::of(T::Integer).on(&["table"]).deprecated("use CSS padding"));
    specs.insert(
        "cellspacing",
        AttrSpec::of(T::Integer).on(&["table"]).deprecated("use CSS border-spacing"),
    );
    specs.insert("frameborder", AttrSpec::of(T::String).on(&["iframe"]).deprecated("use CSS border"));
    specs.insert("scrolling", AttrSpec::of(T::String).on(&["iframe"]).deprecated("use CSS overflow"));
    specs.insert("hspace", AttrSpec::of(T::Integer).deprecated("use CSS margin"));
    specs.insert("vspace", AttrSpec::of(T::Integer).deprecated("use CSS margin"));
    specs.insert("nowrap", AttrSpec::of(T::Boolean).deprecated("use CSS white-space"));
    specs.insert("noshade", AttrSpec::of(T::Boolean).on(&["hr"]).deprecated("use CSS"));
    specs.insert("clear", AttrSpec::of(T::String).on(&["br"]).deprecated("use CSS clear"));
    specs.insert(
        "language",
        AttrSpec::of(T::String).on(&["script"]).deprecated("use the type attribute"),
    );

    specs
});

/// Typed constraints for an attribute name, if any are recorded
pub fn attr_spec(name: &str) -> Option<&'static AttrSpec> {
    ATTRIBUTE_SPECS.get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerated_lookup_is_element_scoped() {
        assert!(enumerated("input", "type").unwrap().values.contains("email"));
        assert!(enumerated("button", "type").unwrap().values.contains("reset"));
        assert!(enumerated("div", "type").is_none());
        assert!(enumerated("span", "dir").is_some());
        assert_eq!(enumerated("a", "rel").unwrap().syntax, ValueSyntax::TokenList);
    }

    #[test]
    fn test_empty_values_where_allowed() {
        assert!(SCRIPT_TYPES.contains(""));
        assert!(CROSSORIGIN_VALUES.contains(""));
        assert!(!TARGETS.contains(""));
    }

    #[test]
    fn test_autocomplete_tokens() {
        assert!(is_valid_autocomplete("email"));
        assert!(is_valid_autocomplete("shipping street-address"));
        assert!(is_valid_autocomplete("section-blue billing postal-code"));
        assert!(is_valid_autocomplete("username webauthn"));
        assert!(!is_valid_autocomplete("emial"));
        assert!(!is_valid_autocomplete("bogus email"));
    }

    #[test]
    fn test_input_type_attributes() {
        assert!(INPUT_TYPE_ATTRIBUTES["email"].contains("multiple"));
        assert!(!INPUT_TYPE_ATTRIBUTES["text"].contains("checked"));
        assert!(INPUT_TYPE_ATTRIBUTES["reset"].is_empty());
        assert!(TYPE_SPECIFIC_INPUT_ATTRIBUTES.contains("formaction"));
        assert!(!TYPE_SPECIFIC_INPUT_ATTRIBUTES.contains("name"));
    }

    #[test]
    fn test_attribute_specs() {
        assert_eq!(attr_spec("aria-labelledby").unwrap().kind, AttrType::IdRefList);
        assert!(!attr_spec("href").unwrap().is_valid_on("div"));
        assert!(attr_spec("align").unwrap().deprecated.is_some());
        assert!(attr_spec("class").is_none());
    }
}
