//! `.htmlintignore` support
//!
//! One pattern per line, `#` starts a comment. Patterns follow a small subset
//! of gitignore: `dir/` ignores a directory anywhere in the path, `**` crosses
//! directories, and a pattern without a slash matches the file name at any
//! depth. Negated patterns (`!keep.html`) are not supported and are skipped.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Name of the ignore file searched for from the working directory upward
pub const IGNORE_FILE_NAME: &str = ".htmlintignore";

/// Compiled ignore patterns
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    set: GlobSet,
    patterns: Vec<String>,
}

impl IgnoreMatcher {
    /// Compile patterns; an invalid glob is an error
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::new();

        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() || pattern.starts_with('#') {
                continue;
            }
            if pattern.starts_with('!') {
                log::debug!("skipping negated ignore pattern '{}'", pattern);
                continue;
            }
            for glob in expand(pattern) {
                builder.add(GlobBuilder::new(&glob).literal_separator(true).build()?);
            }
            kept.push(pattern.to_string());
        }

        Ok(Self {
            set: builder.build()?,
            patterns: kept,
        })
    }

    /// Matcher that ignores nothing
    pub fn empty() -> Self {
        Self {
            set: GlobSet::empty(),
            patterns: Vec::new(),
        }
    }

    /// True when `path` matches any pattern
    pub fn is_ignored(&self, path: &Path) -> bool {
        !self.patterns.is_empty() && self.set.is_match(normalize(path))
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for IgnoreMatcher {
    fn default() -> Self {
        Self::empty()
    }
}

/// Globs equivalent to one ignore pattern
fn expand(pattern: &str) -> Vec<String> {
    let anchored = pattern.trim_start_matches('/');

    if let Some(dir) = anchored.strip_suffix('/') {
        return vec![
            dir.to_string(),
            format!("{}/**", dir),
            format!("**/{}", dir),
            format!("**/{}/**", dir),
        ];
    }

    if anchored.contains("**") || anchored.contains('/') {
        return vec![anchored.to_string()];
    }

    vec![anchored.to_string(), format!("**/{}", anchored)]
}

/// Drop `.` components so `./web/a.html` matches `web/**`
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Search for the ignore file from `dir` upward
pub fn find_ignore_file(dir: &Path) -> Option<PathBuf> {
    let start = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    start
        .ancestors()
        .map(|d| d.join(IGNORE_FILE_NAME))
        .find(|p| p.is_file())
}

/// Read patterns from an ignore file, dropping blanks and comments
pub fn load_ignore_file(path: &Path) -> io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Patterns from the nearest ignore file, or none
pub fn load_ignore_patterns(dir: &Path) -> io::Result<Vec<String>> {
    match find_ignore_file(dir) {
        Some(path) => {
            log::debug!("using ignore file {}", path.display());
            load_ignore_file(&path)
        }
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn matcher(patterns: &[&str]) -> IgnoreMatcher {
        IgnoreMatcher::new(patterns).unwrap()
    }

    #[test]
    fn test_basename_pattern() {
        let m = matcher(&["*.generated.html"]);
        assert!(m.is_ignored(Path::new("page.generated.html")));
        assert!(m.is_ignored(Path::new("web/partials/page.generated.html")));
        assert!(!m.is_ignored(Path::new("web/page.html")));
    }

    #[test]
    fn test_directory_pattern() {
        let m = matcher(&["vendor/"]);
        assert!(m.is_ignored(Path::new("vendor/lib.html")));
        assert!(m.is_ignored(Path::new("web/vendor/deep/lib.html")));
        assert!(m.is_ignored(Path::new("./vendor/lib.html")));
        assert!(!m.is_ignored(Path::new("web/vendors.html")));
    }

    #[test]
    fn test_recursive_patterns() {
        let m = matcher(&["**/*.tmpl", "build/**"]);
        assert!(m.is_ignored(Path::new("a.tmpl")));
        assert!(m.is_ignored(Path::new("x/y/a.tmpl")));
        assert!(m.is_ignored(Path::new("build/out/index.html")));
        assert!(!m.is_ignored(Path::new("src/build.html")));
    }

    #[test]
    fn test_path_pattern_is_anchored() {
        let m = matcher(&["web/legacy/*.html"]);
        assert!(m.is_ignored(Path::new("web/legacy/old.html")));
        assert!(!m.is_ignored(Path::new("web/legacy/sub/old.html")));
        assert!(!m.is_ignored(Path::new("other/web/legacy/old.html")));
    }

    #[test]
    fn test_negation_and_comments_skipped() {
        let m = matcher(&["!keep.html", "# comment", "", "drop.html"]);
        assert_eq!(m.patterns(), &["drop.html".to_string()]);
        assert!(!m.is_ignored(Path::new("keep.html")));
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        assert!(IgnoreMatcher::new(&["a[.html"]).is_err());
    }

    #[test]
    fn test_empty_matcher() {
        assert!(IgnoreMatcher::empty().is_empty());
        assert!(!IgnoreMatcher::default().is_ignored(Path::new("a.html")));
    }

    #[test]
    fn test_load_ignore_file_from_parent() {
        let root = TempDir::new().unwrap();
        std::fs::write(
            root.path().join(IGNORE_FILE_NAME),
            "# generated output\nvendor/\n\n  *.min.html  \n",
        )
        .unwrap();
        let nested = root.path().join("web").join("pages");
        std::fs::create_dir_all(&nested).unwrap();

        let patterns = load_ignore_patterns(&nested).unwrap();
        assert_eq!(patterns, vec!["vendor/", "*.min.html"]);
    }

    #[test]
    fn test_missing_ignore_file() {
        let root = TempDir::new().unwrap();
        // A stray ignore file further up would be found too; only assert on
        // what a fresh directory can guarantee.
        let found = find_ignore_file(root.path());
        assert!(found.map_or(true, |p| !p.starts_with(root.path())));
    }
}
