//! Human-readable text output formatter

use super::OutputFormatter;
use crate::diagnostic::{Diagnostic, Severity};
use crate::engine::LintResult;
use colored::*;

/// `file:line:col severity message [rule]`, one diagnostic per line
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self { colored: true }
    }
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn severity_str(&self, severity: Severity) -> ColoredString {
        let s = severity.to_string();
        if !self.colored {
            return s.normal();
        }
        match severity {
            Severity::Error => s.red().bold(),
            Severity::Warning => s.yellow().bold(),
        }
    }

    fn paint(&self, text: String, color: Color) -> String {
        if self.colored {
            text.color(color).to_string()
        } else {
            text
        }
    }

    fn summary(&self, result: &LintResult) -> String {
        let plural = |n: usize, word: &str| format!("{} {}{}", n, word, if n == 1 { "" } else { "s" });

        let mut counts = Vec::new();
        if result.error_count > 0 {
            counts.push(self.paint(plural(result.error_count, "error"), Color::Red));
        }
        if result.warning_count > 0 {
            counts.push(self.paint(plural(result.warning_count, "warning"), Color::Yellow));
        }
        if !result.failures.is_empty() {
            counts.push(self.paint(plural(result.failures.len(), "unreadable file"), Color::Red));
        }

        let mut line = plural(result.files_processed, "file");
        line.push_str(" checked");
        if counts.is_empty() {
            line.push_str(", no problems found");
        } else {
            line.push_str(": ");
            line.push_str(&counts.join(", "));
        }
        line
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();

        for diag in &result.diagnostics {
            output.push_str(&self.format_diagnostic(diag));
            output.push('\n');
        }
        if !result.diagnostics.is_empty() {
            output.push('\n');
        }

        output.push_str(&self.summary(result));
        output.push('\n');
        output
    }

    fn format_diagnostic(&self, diag: &Diagnostic) -> String {
        let location = format!(
            "{}:{}:{}",
            diag.location.file.display(),
            diag.location.line,
            diag.location.column
        );
        let location = if self.colored {
            location.bold().to_string()
        } else {
            location
        };

        format!(
            "{} {} {} {}",
            location,
            self.severity_str(diag.severity),
            diag.message,
            self.paint(format!("[{}]", diag.rule_id), Color::Cyan)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Location;
    use pretty_assertions::assert_eq;

    fn diag(severity: Severity, message: &str) -> Diagnostic {
        Diagnostic::new("valid-id", severity, message, Location::new("web/index.html", 3, 7))
    }

    #[test]
    fn test_format_diagnostic_plain() {
        let formatter = TextFormatter::new().without_color();
        assert_eq!(
            formatter.format_diagnostic(&diag(Severity::Error, "id attribute must not be empty")),
            "web/index.html:3:7 error id attribute must not be empty [valid-id]"
        );
    }

    #[test]
    fn test_format_result_with_summary() {
        let formatter = TextFormatter::new().without_color();
        let result = LintResult {
            diagnostics: vec![diag(Severity::Error, "a"), diag(Severity::Warning, "b")],
            files_processed: 2,
            error_count: 1,
            warning_count: 1,
            ..Default::default()
        };

        assert_eq!(
            formatter.format(&result),
            "web/index.html:3:7 error a [valid-id]\n\
             web/index.html:3:7 warning b [valid-id]\n\
             \n\
             2 files checked: 1 error, 1 warning\n"
        );
    }

    #[test]
    fn test_clean_summary() {
        let formatter = TextFormatter::new().without_color();
        let result = LintResult {
            files_processed: 1,
            ..Default::default()
        };
        assert_eq!(formatter.format(&result), "1 file checked, no problems found\n");
    }
}
