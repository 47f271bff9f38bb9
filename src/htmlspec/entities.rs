//! Named character references

use html5ever::data::NAMED_ENTITIES;

/// True when `&name;` is a named character reference the HTML tokenizer
/// recognises. `name` excludes the `&` and the trailing `;`.
pub fn is_named_reference(name: &str) -> bool {
    // The table also stores every proper prefix of a name, mapped to (0, 0)
    NAMED_ENTITIES
        .get(format!("{name};").as_str())
        .is_some_and(|&(first, _)| first != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_references() {
        for name in ["amp", "lt", "gt", "quot", "nbsp", "copy", "mdash", "hellip", "Dagger"] {
            assert!(is_named_reference(name), "{}", name);
        }
    }

    #[test]
    fn test_unknown_references() {
        assert!(!is_named_reference("foobar"));
        assert!(!is_named_reference(""));
        assert!(!is_named_reference("am"));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(is_named_reference("Alpha"));
        assert!(is_named_reference("alpha"));
        assert!(!is_named_reference("AMPX"));
    }
}
