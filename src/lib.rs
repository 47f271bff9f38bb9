//! htmlint - HTML linter for Go templates
//!
//! Static checks for server-rendered HTML that may contain Go template
//! directives, with optional validation of htmx attribute grammars.
//!
//! # Architecture
//!
//! ```text
//! source -> Preprocessor -> Document -> RuleRegistry -> Diagnostics
//! ```
//!
//! The preprocessor neutralises `{{ ... }}` directives while keeping line
//! numbers, the document builder parses the result with html5ever into an
//! index arena, and every enabled rule checks the tree (and, for a few rules,
//! the original text).
//!
//! ```
//! use htmlint::{Config, Engine};
//!
//! let mut config = Config::new();
//! config.frameworks.htmx = true;
//!
//! let engine = Engine::new(config);
//! let results = engine
//!     .lint_content("nav.html", br#"<div hx-get="/items" hx-swap="sideways"></div>"#)
//!     .unwrap();
//! assert_eq!(results[0].message, "invalid hx-swap value 'sideways'");
//! ```

pub mod config;
pub mod diagnostic;
pub mod document;
pub mod engine;
pub mod files;
pub mod htmlspec;
pub mod ignore;
pub mod output;
pub mod rules;
pub mod template;

// Re-export main types
pub use config::{Config, ConfigError};
pub use diagnostic::{Diagnostic, Location, Severity};
pub use document::{Document, ParseError, ParseMode};
pub use engine::{Engine, LintError, LintResult};
pub use files::FileCollector;
pub use ignore::IgnoreMatcher;
pub use output::{JsonFormatter, OutputFormatter, TextFormatter};
pub use rules::{FrameworkSettings, HtmxVersion, Rule, RuleRegistry};
pub use template::Preprocessor;
