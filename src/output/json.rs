//! JSON output formatter

use super::OutputFormatter;
use crate::diagnostic::Diagnostic;
use crate::engine::LintResult;
use serde::Serialize;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter {
    /// Pretty print with indentation
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn render<T: Serialize>(&self, value: &T) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|e| {
            log::error!("failed to serialize output: {}", e);
            String::new()
        })
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    results: Vec<JsonDiagnostic<'a>>,
    failures: Vec<JsonFailure>,
    summary: JsonSummary,
}

/// One result record
#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    rule: &'a str,
    message: &'a str,
    filename: String,
    line: usize,
    col: usize,
    severity: crate::diagnostic::Severity,
}

impl<'a> From<&'a Diagnostic> for JsonDiagnostic<'a> {
    fn from(d: &'a Diagnostic) -> Self {
        Self {
            rule: &d.rule_id,
            message: &d.message,
            filename: d.location.file.display().to_string(),
            line: d.location.line,
            col: d.location.column,
            severity: d.severity,
        }
    }
}

#[derive(Serialize)]
struct JsonFailure {
    filename: String,
    error: String,
}

#[derive(Serialize)]
struct JsonSummary {
    files_processed: usize,
    files_with_errors: usize,
    error_count: usize,
    warning_count: usize,
    duration_ms: u128,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &LintResult) -> String {
        let output = JsonOutput {
            results: result.diagnostics.iter().map(JsonDiagnostic::from).collect(),
            failures: result
                .failures
                .iter()
                .map(|f| JsonFailure {
                    filename: f.path().display().to_string(),
                    error: f.to_string(),
                })
                .collect(),
            summary: JsonSummary {
                files_processed: result.files_processed,
                files_with_errors: result.files_with_errors,
                error_count: result.error_count,
                warning_count: result.warning_count,
                duration_ms: result.duration.as_millis(),
            },
        };
        self.render(&output)
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        self.render(&JsonDiagnostic::from(diagnostic))
    }
}
