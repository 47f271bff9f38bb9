//! Go template directive preprocessing
//!
//! Rewrites `{{ ... }}` directives so the remaining text parses as plain HTML.
//! Conditionals collapse to their first branch, control-flow directives are
//! removed and value interpolations become the [`PLACEHOLDER`] sentinel.
//! Every removed span keeps its newlines, so line numbers in the output match
//! the original source.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Sentinel left in place of a value interpolation such as `{{ .Name }}`.
pub const PLACEHOLDER: &str = "TMPL";

/// Opening delimiter of a directive that survived preprocessing.
pub const DIRECTIVE_OPEN: &str = "{{";

/// `{{if}}...{{else}}...{{end}}` with the if-branch captured.
static IF_ELSE_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)\{\{-?\s*if\s[^}]*\}\}(.*?)\{\{-?\s*else\s*-?\}\}.*?\{\{-?\s*end\s*-?\}\}",
    )
    .unwrap()
});

/// `{{if}}...{{end}}` with the body captured.
static IF_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{\{-?\s*if\s[^}]*\}\}(.*?)\{\{-?\s*end\s*-?\}\}").unwrap()
});

/// Any remaining directive.
static DIRECTIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{[\s\S]*?\}\}").unwrap());

/// A file whose first directive is `{{define ...}}` is a template partial.
static DEFINE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{\{-?\s*define[\s\x22]").unwrap());

/// Leading tokens of directives that are removed outright.
const REMOVED_PREFIXES: &[&str] = &[
    "/*", "if ", "if(", "else if", "end", "range ", "template ", "block ", "define ", "with ",
    "-",
];

/// Maps positions in preprocessed text back to the original source.
///
/// Preprocessing never adds or drops a line, so the mapping is the identity on
/// lines. Columns are reported as-is and may drift on lines where a directive
/// was rewritten.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    original_lines: usize,
}

impl SourceMap {
    /// Original position for a position in the preprocessed text
    pub fn original_position(&self, line: usize, column: usize) -> (usize, usize) {
        (line.min(self.original_lines.max(1)), column)
    }

    /// Number of lines in the original source
    pub fn line_count(&self) -> usize {
        self.original_lines
    }
}

/// Output of [`Preprocessor::process`]
#[derive(Debug, Clone)]
pub struct Processed {
    /// HTML with directives neutralised
    pub text: String,
    /// Position mapping back to the original
    pub source_map: SourceMap,
}

/// Directive preprocessor
#[derive(Debug, Default, Clone, Copy)]
pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Neutralise directives in `input`.
    ///
    /// Malformed directives (no closing `}}`) are left as literal text.
    pub fn process(&self, input: &str) -> Processed {
        let keep_first_branch = |caps: &Captures| {
            let kept = caps.get(1).map_or("", |m| m.as_str());
            let mut out = String::with_capacity(kept.len());
            out.push_str(kept);
            push_newlines(&mut out, count_newlines(&caps[0]) - count_newlines(kept));
            out
        };

        let text = IF_ELSE_END.replace_all(input, keep_first_branch);
        let text = IF_END.replace_all(&text, keep_first_branch);
        let text = DIRECTIVE
            .replace_all(&text, |caps: &Captures| replace_directive(&caps[0]))
            .into_owned();

        Processed {
            text,
            source_map: SourceMap {
                original_lines: input.lines().count(),
            },
        }
    }
}

/// Replacement for a single directive span
fn replace_directive(directive: &str) -> String {
    let inner = directive
        .strip_prefix("{{")
        .and_then(|s| s.strip_suffix("}}"))
        .unwrap_or(directive)
        .trim();

    let mut out = String::new();
    if !is_removed(inner) {
        out.push_str(PLACEHOLDER);
    }
    push_newlines(&mut out, count_newlines(directive));
    out
}

fn is_removed(inner: &str) -> bool {
    inner == "else" || REMOVED_PREFIXES.iter().any(|p| inner.starts_with(p))
}

fn count_newlines(s: &str) -> usize {
    s.bytes().filter(|&b| b == b'\n').count()
}

fn push_newlines(out: &mut String, n: usize) {
    out.extend(std::iter::repeat('\n').take(n));
}

/// True when the source is a template partial (starts with `{{define`)
pub fn is_template_fragment(input: &str) -> bool {
    DEFINE_PREFIX.is_match(input.trim_start())
}

/// True when an attribute value came from (or still contains) a directive
pub fn is_templated(value: &str) -> bool {
    value.contains(PLACEHOLDER) || value.contains(DIRECTIVE_OPEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn process(input: &str) -> String {
        Preprocessor::new().process(input).text
    }

    #[test]
    fn test_value_becomes_placeholder() {
        assert_eq!(process(r#"<a href="{{ .URL }}">x</a>"#), r#"<a href="TMPL">x</a>"#);
        assert_eq!(process("<p>{{ printf \"%d\" .N }}</p>"), "<p>TMPL</p>");
    }

    #[test]
    fn test_control_flow_removed() {
        assert_eq!(
            process("<ul>{{range .Items}}<li>{{.}}</li>{{end}}</ul>"),
            "<ul><li>TMPL</li></ul>"
        );
        assert_eq!(process("{{/* note */}}<p></p>"), "<p></p>");
        assert_eq!(process(r#"{{template "nav" .}}<p></p>"#), "<p></p>");
        assert_eq!(process("{{with .User}}<b></b>{{end}}"), "<b></b>");
        assert_eq!(process("{{- .Trimmed }}x"), "x");
    }

    #[test]
    fn test_if_else_keeps_first_branch() {
        let out = process(r#"<div class="{{if .A}}on{{else}}off{{end}}"></div>"#);
        assert_eq!(out, r#"<div class="on"></div>"#);
    }

    #[test]
    fn test_if_without_else_keeps_body() {
        assert_eq!(process("{{if .Show}}<p>hi</p>{{end}}"), "<p>hi</p>");
        assert_eq!(process("{{- if .Show -}}<p>hi</p>{{- end -}}"), "<p>hi</p>");
    }

    #[test]
    fn test_line_count_preserved() {
        let input = "<div>\n{{if .A}}\n<p>a</p>\n{{else}}\n<p>b</p>\n<p>c</p>\n{{end}}\n<span>{{\n.X\n}}</span>\n</div>\n";
        let out = process(input);
        assert_eq!(count_newlines(&out), count_newlines(input));
        assert!(out.contains("<p>a</p>"));
        assert!(!out.contains("<p>b</p>"));
        assert!(out.contains("<span>TMPL\n\n</span>"));
    }

    #[test]
    fn test_unbalanced_directive_left_alone() {
        assert_eq!(process("<p>{{ .Broken </p>"), "<p>{{ .Broken </p>");
    }

    #[test]
    fn test_idempotent_on_clean_output() {
        let once = process("<a href=\"{{.U}}\">{{if .X}}y{{end}}</a>");
        assert_eq!(process(&once), once);
    }

    #[test]
    fn test_template_fragment_detection() {
        assert!(is_template_fragment("{{define \"row\"}}<tr></tr>{{end}}"));
        assert!(is_template_fragment("\n  {{- define \"row\" }}"));
        assert!(!is_template_fragment("<html>{{define \"x\"}}{{end}}</html>"));
    }

    #[test]
    fn test_is_templated() {
        assert!(is_templated("TMPL"));
        assert!(is_templated("/users/TMPL/edit"));
        assert!(is_templated("{{ .Missed"));
        assert!(!is_templated("/static/app.css"));
    }

    #[test]
    fn test_source_map_is_identity_on_lines() {
        let processed = Preprocessor::new().process("a\nb\nc");
        assert_eq!(processed.source_map.line_count(), 3);
        assert_eq!(processed.source_map.original_position(2, 4), (2, 4));
    }
}
