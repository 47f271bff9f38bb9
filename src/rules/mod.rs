//! Lint rules
//!
//! Every rule is an independent check over a [`Document`]. A few rules also
//! scan the raw source ([`Rule::check_raw`]) for constructs the tree does not
//! keep verbatim, and framework rules take their settings through
//! [`Rule::configure`] before the registry is used.

mod allowed_links;
mod attribute_misuse;
mod attribute_values;
mod char_ref;
mod element_name;
mod element_structure;
mod form_dup_name;
pub mod htmx;
mod input_attributes;
mod long_title;
mod map_id_name;
mod no_dup_class;
mod no_inline_style;
mod references;
mod require_lang;
mod valid_for;
mod valid_id;

pub use allowed_links::AllowedLinks;
pub use attribute_misuse::AttributeMisuse;
pub use attribute_values::AttributeAllowedValues;
pub use char_ref::UnrecognizedCharRef;
pub use element_name::ElementName;
pub use element_structure::ElementStructure;
pub use form_dup_name::FormDupName;
pub use htmx::HtmxAttributes;
pub use input_attributes::InputAttributes;
pub use long_title::LongTitle;
pub use map_id_name::MapIdName;
pub use no_dup_class::NoDupClass;
pub use no_inline_style::NoInlineStyle;
pub use references::NoMissingReferences;
pub use require_lang::RequireLang;
pub use valid_for::ValidFor;
pub use valid_id::ValidId;

use crate::diagnostic::{Diagnostic, Location, Severity};
use crate::document::{Document, Node};
use std::path::Path;

pub const VALID_ID: &str = "valid-id";
pub const ELEMENT_NAME: &str = "element-name";
pub const ATTRIBUTE_ALLOWED_VALUES: &str = "attribute-allowed-values";
pub const NO_MISSING_REFERENCES: &str = "no-missing-references";
pub const FORM_DUP_NAME: &str = "form-dup-name";
pub const MAP_ID_NAME: &str = "map-id-name";
pub const NO_DUP_CLASS: &str = "no-dup-class";
pub const ALLOWED_LINKS: &str = "allowed-links";
pub const REQUIRE_LANG: &str = "require-lang";
pub const LONG_TITLE: &str = "long-title";
pub const NO_INLINE_STYLE: &str = "no-inline-style";
pub const VALID_FOR: &str = "valid-for";
pub const UNRECOGNIZED_CHAR_REF: &str = "unrecognized-char-ref";
pub const ATTRIBUTE_MISUSE: &str = "attribute-misuse";
pub const INPUT_ATTRIBUTES: &str = "input-attributes";
pub const ELEMENT_STRUCTURE: &str = "element-structure";
pub const HTMX_ATTRIBUTES: &str = "htmx-attributes";

/// htmx vocabulary generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HtmxVersion {
    #[default]
    V2,
    V4,
}

impl HtmxVersion {
    /// Interpret a configured version string; anything but "4" selects v2
    pub fn parse(version: &str) -> Self {
        match version.trim() {
            "4" => HtmxVersion::V4,
            "2" | "" => HtmxVersion::V2,
            other => {
                log::warn!("unknown htmx version '{}', using htmx 2 vocabulary", other);
                HtmxVersion::V2
            }
        }
    }
}

impl std::fmt::Display for HtmxVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HtmxVersion::V2 => write!(f, "2"),
            HtmxVersion::V4 => write!(f, "4"),
        }
    }
}

/// Framework support handed to configurable rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameworkSettings {
    pub htmx_enabled: bool,
    pub htmx_version: HtmxVersion,
}

impl FrameworkSettings {
    pub fn htmx(version: &str) -> Self {
        Self {
            htmx_enabled: true,
            htmx_version: HtmxVersion::parse(version),
        }
    }
}

/// A single lint check
pub trait Rule: Send + Sync {
    /// Stable identifier used in configuration and output
    fn id(&self) -> &'static str;

    /// One-line summary for `--list-rules`
    fn description(&self) -> &'static str;

    /// Check a parsed document
    fn check(&self, doc: &Document) -> Vec<Diagnostic>;

    /// Check the original source text
    fn check_raw(&self, _filename: &Path, _content: &str) -> Vec<Diagnostic> {
        Vec::new()
    }

    /// Receive framework settings before linting starts
    fn configure(&mut self, _settings: &FrameworkSettings) {}
}

/// Ordered collection of rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// All rules with framework support disabled
    pub fn new() -> Self {
        Self::configured(&FrameworkSettings::default())
    }

    /// All rules, configured for the given framework settings
    pub fn configured(settings: &FrameworkSettings) -> Self {
        let mut rules: Vec<Box<dyn Rule>> = vec![
            Box::new(ValidId),
            Box::new(ElementName),
            Box::new(AttributeAllowedValues),
            Box::new(NoMissingReferences),
            Box::new(FormDupName),
            Box::new(MapIdName),
            Box::new(NoDupClass),
            Box::new(AllowedLinks),
            Box::new(RequireLang),
            Box::new(LongTitle),
            Box::new(NoInlineStyle),
            Box::new(ValidFor),
            Box::new(UnrecognizedCharRef),
            Box::new(AttributeMisuse),
            Box::new(InputAttributes::default()),
            Box::new(ElementStructure),
            Box::new(HtmxAttributes::default()),
        ];
        for rule in rules.iter_mut() {
            rule.configure(settings);
        }
        Self { rules }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> + '_ {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn get(&self, id: &str) -> Option<&dyn Rule> {
        self.iter().find(|r| r.id() == id)
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.iter().map(|r| r.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Diagnostic anchored at a node
pub(crate) fn report(
    doc: &Document,
    node: &Node,
    rule_id: &str,
    severity: Severity,
    message: impl AsRef<str>,
) -> Diagnostic {
    let (line, column) = doc.source_map.original_position(node.line, node.column);
    Diagnostic::new(
        rule_id,
        severity,
        message.as_ref(),
        Location::new(doc.filename.clone(), line, column),
    )
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Run a rule over content parsed as a fragment
    pub fn lint(rule: &dyn Rule, html: &str) -> Vec<Diagnostic> {
        let doc = Document::parse_fragment("test.html", html.as_bytes()).unwrap();
        rule.check(&doc)
    }

    /// Run a rule over content parsed as a full page
    pub fn lint_page(rule: &dyn Rule, html: &str) -> Vec<Diagnostic> {
        let doc = Document::parse("test.html", html.as_bytes()).unwrap();
        rule.check(&doc)
    }

    pub fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.message.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_order_and_ids() {
        let registry = RuleRegistry::new();
        assert_eq!(
            registry.ids(),
            vec![
                VALID_ID,
                ELEMENT_NAME,
                ATTRIBUTE_ALLOWED_VALUES,
                NO_MISSING_REFERENCES,
                FORM_DUP_NAME,
                MAP_ID_NAME,
                NO_DUP_CLASS,
                ALLOWED_LINKS,
                REQUIRE_LANG,
                LONG_TITLE,
                NO_INLINE_STYLE,
                VALID_FOR,
                UNRECOGNIZED_CHAR_REF,
                ATTRIBUTE_MISUSE,
                INPUT_ATTRIBUTES,
                ELEMENT_STRUCTURE,
                HTMX_ATTRIBUTES,
            ]
        );
    }

    #[test]
    fn test_ids_unique_and_described() {
        let registry = RuleRegistry::new();
        let unique: HashSet<_> = registry.ids().into_iter().collect();
        assert_eq!(unique.len(), registry.len());
        for rule in registry.iter() {
            assert!(!rule.description().is_empty(), "{}", rule.id());
        }
    }

    #[test]
    fn test_registry_lookup() {
        let registry = RuleRegistry::new();
        assert!(registry.get(VALID_FOR).is_some());
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn test_htmx_version_parse() {
        assert_eq!(HtmxVersion::parse("4"), HtmxVersion::V4);
        assert_eq!(HtmxVersion::parse("2"), HtmxVersion::V2);
        assert_eq!(HtmxVersion::parse(""), HtmxVersion::V2);
        assert_eq!(HtmxVersion::parse("3"), HtmxVersion::V2);
        assert_eq!(FrameworkSettings::htmx("4").htmx_version.to_string(), "4");
    }
}
