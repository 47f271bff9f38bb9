//! Core linter engine

use crate::config::Config;
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::{Document, ParseError, ParseMode};
use crate::rules::RuleRegistry;
use crate::template::Preprocessor;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

/// A file that could not be linted
#[derive(Debug, Error)]
pub enum LintError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl LintError {
    /// File the failure belongs to
    pub fn path(&self) -> &Path {
        match self {
            LintError::Io { path, .. } | LintError::Parse { path, .. } => path,
        }
    }
}

/// Result of linting operation
#[derive(Debug, Default)]
pub struct LintResult {
    /// All diagnostics, sorted by file, line and column
    pub diagnostics: Vec<Diagnostic>,

    /// Files that could not be read or parsed
    pub failures: Vec<LintError>,

    /// Files processed, failed ones included
    pub files_processed: usize,

    /// Files with errors
    pub files_with_errors: usize,

    /// Total errors
    pub error_count: usize,

    /// Total warnings
    pub warning_count: usize,

    /// Processing duration
    pub duration: Duration,
}

impl LintResult {
    /// Result for one successfully linted file
    fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        let error_count = diagnostics.iter().filter(|d| d.is_error()).count();
        Self {
            warning_count: diagnostics.len() - error_count,
            error_count,
            files_with_errors: usize::from(error_count > 0),
            files_processed: 1,
            diagnostics,
            ..Self::default()
        }
    }

    fn from_failure(error: LintError) -> Self {
        Self {
            failures: vec![error],
            files_processed: 1,
            ..Self::default()
        }
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }

    /// Check if result is clean (no diagnostics and no failures)
    pub fn is_clean(&self) -> bool {
        self.error_count == 0 && self.warning_count == 0 && self.failures.is_empty()
    }

    /// Get exit code (0 = success, 1 = errors or unreadable files)
    pub fn exit_code(&self) -> i32 {
        if self.error_count > 0 || !self.failures.is_empty() {
            1
        } else {
            0
        }
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: LintResult) {
        self.diagnostics.extend(other.diagnostics);
        self.failures.extend(other.failures);
        self.files_processed += other.files_processed;
        self.files_with_errors += other.files_with_errors;
        self.error_count += other.error_count;
        self.warning_count += other.warning_count;
    }
}

/// The main linter engine
pub struct Engine {
    config: Config,
    registry: RuleRegistry,
    preprocessor: Preprocessor,
}

impl Engine {
    /// Create a new engine with configuration
    pub fn new(config: Config) -> Self {
        let registry = RuleRegistry::configured(&config.framework_settings());
        for id in &config.rules.disabled {
            if registry.get(id).is_none() {
                log::warn!("disabled rule '{}' does not exist", id);
            }
        }
        Self {
            config,
            registry,
            preprocessor: Preprocessor::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Lint content parsed as a fragment (template partials, snippets)
    pub fn lint_content(
        &self,
        filename: impl AsRef<Path>,
        content: &[u8],
    ) -> Result<Vec<Diagnostic>, ParseError> {
        self.lint_with_mode(filename.as_ref(), content, ParseMode::Fragment)
    }

    /// Lint content known to be a whole page
    pub fn lint_document_content(
        &self,
        filename: impl AsRef<Path>,
        content: &[u8],
    ) -> Result<Vec<Diagnostic>, ParseError> {
        self.lint_with_mode(filename.as_ref(), content, ParseMode::Full)
    }

    /// Lint a file on disk, choosing the parse mode from its content
    pub fn lint_file(&self, path: &Path) -> Result<Vec<Diagnostic>, LintError> {
        let content = std::fs::read(path).map_err(|source| LintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_error = |source: ParseError| LintError::Parse {
            path: path.to_path_buf(),
            source,
        };

        let source = std::str::from_utf8(&content).map_err(|e| parse_error(e.into()))?;
        let mode = detect_mode(&self.preprocessor.process(source).text);
        self.lint_with_mode(path, &content, mode).map_err(parse_error)
    }

    /// Lint multiple files
    pub fn lint(&self, files: &[PathBuf]) -> LintResult {
        let start = Instant::now();

        let lint_one = |path: &PathBuf| match self.lint_file(path) {
            Ok(diagnostics) => LintResult::from_diagnostics(diagnostics),
            Err(e) => {
                log::debug!("{}", e);
                LintResult::from_failure(e)
            }
        };

        let results: Vec<LintResult> = if self.config.engine.parallel && files.len() > 1 {
            let jobs = if self.config.engine.jobs > 0 {
                self.config.engine.jobs
            } else {
                num_cpus::get()
            };
            match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
                Ok(pool) => pool.install(|| files.par_iter().map(lint_one).collect()),
                Err(e) => {
                    log::warn!("could not start thread pool, linting sequentially: {}", e);
                    files.iter().map(lint_one).collect()
                }
            }
        } else {
            files.iter().map(lint_one).collect()
        };

        let mut combined = LintResult::default();
        for result in results {
            combined.merge(result);
        }
        sort_diagnostics(&mut combined.diagnostics);

        combined.duration = start.elapsed();
        combined
    }

    fn lint_with_mode(
        &self,
        filename: &Path,
        content: &[u8],
        mode: ParseMode,
    ) -> Result<Vec<Diagnostic>, ParseError> {
        let source = std::str::from_utf8(content)?;
        let doc = match mode {
            ParseMode::Full => Document::parse(filename, content)?,
            ParseMode::Fragment => Document::parse_fragment(filename, content)?,
        };

        let mut diagnostics = Vec::new();
        for rule in self.registry.iter() {
            if !self.config.is_rule_enabled(rule.id()) {
                continue;
            }
            let before = diagnostics.len();
            diagnostics.extend(rule.check(&doc));
            // Raw checks see the original text, directives included
            diagnostics.extend(rule.check_raw(filename, source));
            log::debug!(
                "{}: {} reported {}",
                filename.display(),
                rule.id(),
                diagnostics.len() - before
            );
        }

        if self.config.rules.errors_only {
            diagnostics.retain(|d| d.severity == Severity::Error);
        }
        sort_diagnostics(&mut diagnostics);
        Ok(diagnostics)
    }
}

/// Order by file, line, column; rule order is kept for ties
fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| {
        (&a.location.file, a.location.line, a.location.column).cmp(&(
            &b.location.file,
            b.location.line,
            b.location.column,
        ))
    });
}

/// Full-document mode when the markup opens with a doctype or `<html>`
fn detect_mode(text: &str) -> ParseMode {
    let mut rest = text.trim_start();
    while let Some(comment) = rest.strip_prefix("<!--") {
        rest = match comment.find("-->") {
            Some(end) => comment[end + 3..].trim_start(),
            None => "",
        };
    }

    let head: String = rest.chars().take(9).collect::<String>().to_ascii_lowercase();
    if head.starts_with("<!doctype") || head.starts_with("<html") {
        ParseMode::Full
    } else {
        ParseMode::Fragment
    }
}
