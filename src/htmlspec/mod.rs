//! Static HTML knowledge tables
//!
//! Element content models, attribute constraints, ARIA role maps and the htmx
//! vocabulary. Everything here is immutable and built once on first use, so
//! the tables can be read from any number of threads.

pub mod aria;
pub mod attributes;
pub mod elements;
pub mod entities;
pub mod htmx;

use std::ops::BitOr;

/// HTML content categories as a bit set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentModel(u16);

impl ContentModel {
    pub const NONE: Self = Self(0);
    pub const FLOW: Self = Self(1 << 0);
    pub const PHRASING: Self = Self(1 << 1);
    pub const INTERACTIVE: Self = Self(1 << 2);
    pub const HEADING: Self = Self(1 << 3);
    pub const SECTIONING: Self = Self(1 << 4);
    pub const EMBEDDED: Self = Self(1 << 5);
    pub const METADATA: Self = Self(1 << 6);
    pub const TRANSPARENT: Self = Self(1 << 7);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ContentModel {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Per-element constraints
#[derive(Debug, Clone, Copy)]
pub struct ElementSpec {
    /// Categories accepted as children besides `permitted_content`.
    /// `TRANSPARENT` means the permitted tags come first, then flow fallback.
    pub content_model: ContentModel,
    /// Allowed child tags; empty means no restriction
    pub permitted_content: &'static [&'static str],
    /// Tags that may not appear anywhere below this element
    pub forbidden_descendants: &'static [&'static str],
    /// Allowed parent tags; empty means no restriction
    pub permitted_parents: &'static [&'static str],
    /// At least one of these must be an ancestor
    pub required_ancestors: &'static [&'static str],
    pub required_children: &'static [&'static str],
    pub required_attributes: &'static [&'static str],
    pub void: bool,
    /// Replacement guidance when the element is deprecated
    pub deprecated: Option<&'static str>,
}

impl ElementSpec {
    pub const EMPTY: Self = Self {
        content_model: ContentModel::NONE,
        permitted_content: &[],
        forbidden_descendants: &[],
        permitted_parents: &[],
        required_ancestors: &[],
        required_children: &[],
        required_attributes: &[],
        void: false,
        deprecated: None,
    };
}

/// How an attribute value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    String,
    Enum,
    Boolean,
    Pattern,
    Id,
    IdRef,
    IdRefList,
    Url,
    Integer,
    Positive,
}

/// Per-attribute constraints
#[derive(Debug, Clone, Copy)]
pub struct AttrSpec {
    pub kind: AttrType,
    pub allowed_values: &'static [&'static str],
    /// Elements the attribute applies to; empty means global
    pub valid_for: &'static [&'static str],
    /// Replacement guidance when the attribute is deprecated
    pub deprecated: Option<&'static str>,
}

impl AttrSpec {
    pub const fn of(kind: AttrType) -> Self {
        Self {
            kind,
            allowed_values: &[],
            valid_for: &[],
            deprecated: None,
        }
    }

    pub const fn on(self, valid_for: &'static [&'static str]) -> Self {
        Self { valid_for, ..self }
    }

    pub const fn deprecated(self, guidance: &'static str) -> Self {
        Self {
            deprecated: Some(guidance),
            ..self
        }
    }

    pub fn is_valid_on(&self, tag: &str) -> bool {
        self.valid_for.is_empty() || self.valid_for.contains(&tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_model_flags() {
        let model = ContentModel::FLOW | ContentModel::PHRASING;
        assert!(model.contains(ContentModel::FLOW));
        assert!(model.contains(ContentModel::PHRASING));
        assert!(!model.contains(ContentModel::HEADING));
        assert!(ContentModel::NONE.is_empty());
        assert!(model.intersects(ContentModel::PHRASING | ContentModel::HEADING));
        assert!(!model.intersects(ContentModel::METADATA));
    }

    #[test]
    fn test_attr_spec_scope() {
        let global = AttrSpec::of(AttrType::String);
        assert!(global.is_valid_on("div"));

        let scoped = AttrSpec::of(AttrType::Url).on(&["a", "area"]);
        assert!(scoped.is_valid_on("a"));
        assert!(!scoped.is_valid_on("div"));
    }
}
