//! Expanding command-line arguments into the files to lint

use crate::config::FilesConfig;
use crate::ignore::IgnoreMatcher;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error while expanding inputs
#[derive(Debug, Error)]
pub enum FilesError {
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Invalid exclude pattern: {0}")]
    Exclude(#[from] globset::Error),
}

/// Turns files, directories and glob patterns into a sorted file list
#[derive(Debug)]
pub struct FileCollector {
    include: Vec<String>,
    exclude: GlobSet,
    ignore: IgnoreMatcher,
}

impl FileCollector {
    pub fn new(files: &FilesConfig, ignore: IgnoreMatcher) -> Result<Self, FilesError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &files.exclude {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            include: files.include.clone(),
            exclude: builder.build()?,
            ignore,
        })
    }

    /// Expand every input; duplicates are dropped
    pub fn collect<S: AsRef<str>>(&self, inputs: &[S]) -> Result<Vec<PathBuf>, FilesError> {
        let mut found = BTreeSet::new();

        for input in inputs {
            let input = input.as_ref();
            let path = Path::new(input);

            if path.is_dir() {
                for pattern in &self.include {
                    let full = path.join(pattern);
                    for entry in expand_glob(&full.to_string_lossy())? {
                        let relative = entry.strip_prefix(path).unwrap_or(&entry).to_path_buf();
                        if !self.is_skipped(&entry) && !self.is_skipped(&relative) {
                            found.insert(entry);
                        }
                    }
                }
            } else if path.is_file() {
                if !self.ignore.is_ignored(path) {
                    found.insert(path.to_path_buf());
                }
            } else {
                for entry in expand_glob(input)? {
                    if !self.is_skipped(&entry) {
                        found.insert(entry);
                    }
                }
            }
        }

        log::debug!("discovered {} files", found.len());
        Ok(found.into_iter().collect())
    }

    fn is_skipped(&self, path: &Path) -> bool {
        self.exclude.is_match(path) || self.ignore.is_ignored(path)
    }
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>, FilesError> {
    let paths = glob::glob(pattern).map_err(|source| FilesError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(paths.flatten().filter(|p| p.is_file()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "<p>x</p>").unwrap();
        path
    }

    fn collector(exclude: &[&str], ignore: &[&str]) -> FileCollector {
        let files = FilesConfig {
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
            ..FilesConfig::default()
        };
        FileCollector::new(&files, IgnoreMatcher::new(ignore).unwrap()).unwrap()
    }

    #[test]
    fn test_directory_uses_include_globs() {
        let dir = TempDir::new().unwrap();
        let page = touch(dir.path(), "index.html");
        let partial = touch(dir.path(), "partials/nav.tmpl");
        let gohtml = touch(dir.path(), "a/b/c.gohtml");
        touch(dir.path(), "style.css");

        let root = dir.path().to_string_lossy().to_string();
        let files = collector(&[], &[]).collect(&[root]).unwrap();

        let mut expected = vec![page, partial, gohtml];
        expected.sort();
        assert_eq!(files, expected);
    }

    #[test]
    fn test_ignore_and_exclude() {
        let dir = TempDir::new().unwrap();
        let kept = touch(dir.path(), "web/index.html");
        touch(dir.path(), "web/vendor/lib.html");
        touch(dir.path(), "web/out.min.html");

        let root = dir.path().to_string_lossy().to_string();
        let files = collector(&["**/*.min.html"], &["vendor/"]).collect(&[root]).unwrap();
        assert_eq!(files, vec![kept]);
    }

    #[test]
    fn test_explicit_file_ignores_include_filter() {
        let dir = TempDir::new().unwrap();
        let odd = touch(dir.path(), "page.txt");
        let arg = odd.to_string_lossy().to_string();

        let files = collector(&[], &[]).collect(&[arg.clone(), arg]).unwrap();
        assert_eq!(files, vec![odd]);
    }

    #[test]
    fn test_glob_argument() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.html");
        touch(dir.path(), "b.tmpl");

        let pattern = format!("{}/*.html", dir.path().display());
        assert_eq!(collector(&[], &[]).collect(&[pattern]).unwrap(), vec![a]);
    }

    #[test]
    fn test_invalid_glob_argument() {
        let err = collector(&[], &[]).collect(&["web/[.html"]).unwrap_err();
        assert!(matches!(err, FilesError::Pattern { .. }));
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let files = FilesConfig {
            exclude: vec!["a[".to_string()],
            ..FilesConfig::default()
        };
        assert!(FileCollector::new(&files, IgnoreMatcher::empty()).is_err());
    }
}
