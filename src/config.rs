//! Configuration for the linter
//!
//! Reads configuration from:
//! - an explicit `--config` path
//! - `.htmlintrc.yaml` / `.htmlintrc.yml` / `.htmlintrc.json` in the working directory
//! - the same names in the home directory

use crate::rules::{FrameworkSettings, HtmxVersion};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Names searched for when no config path is given
pub const CONFIG_FILE_NAMES: &[&str] = &[".htmlintrc.yaml", ".htmlintrc.yml", ".htmlintrc.json"];

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lint files on a thread pool
    pub parallel: bool,

    /// Number of parallel jobs (0 = auto-detect)
    pub jobs: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            jobs: 0,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: ColorMode,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Color mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Forced colour setting; `None` leaves terminal detection to `colored`
    pub fn forced(self) -> Option<bool> {
        match self {
            ColorMode::Auto => None,
            ColorMode::Always => Some(true),
            ColorMode::Never => Some(false),
        }
    }
}

/// File handling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Globs used when a directory is given
    pub include: Vec<String>,

    /// Globs removed from the discovered set
    pub exclude: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            include: vec![
                "**/*.html".to_string(),
                "**/*.htm".to_string(),
                "**/*.tmpl".to_string(),
                "**/*.gohtml".to_string(),
            ],
            exclude: Vec::new(),
        }
    }
}

/// Rule configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Disabled rule identifiers
    pub disabled: Vec<String>,

    /// Drop warnings from the output
    pub errors_only: bool,
}

/// Framework support
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworksConfig {
    /// Validate htmx attributes
    pub htmx: bool,

    /// htmx major version: "2" or "4"
    pub htmx_version: String,
}

impl Default for FrameworksConfig {
    fn default() -> Self {
        Self {
            htmx: false,
            htmx_version: "2".to_string(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub output: OutputConfig,
    pub files: FilesConfig,
    pub rules: RulesConfig,
    pub frameworks: FrameworksConfig,

    /// Extra ignore patterns, same syntax as `.htmlintignore`
    pub ignore: Vec<String>,
}

impl Config {
    /// Create default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file, picking the format by extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config: Self = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "Unknown config file format: {}",
                    ext
                )))
            }
        };

        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::discover(Path::new("."), dirs::home_dir().as_deref())
    }

    /// First config file found in `dir`, then in `home`; defaults otherwise
    pub fn discover(dir: &Path, home: Option<&Path>) -> Result<Self, ConfigError> {
        match Self::find_file(dir, home) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Merge CLI arguments into configuration
    pub fn merge_cli(
        &mut self,
        format: Option<OutputFormat>,
        errors_only: bool,
        jobs: Option<usize>,
        disabled_rules: Vec<String>,
        htmx: bool,
        htmx_version: Option<String>,
    ) {
        if let Some(f) = format {
            self.output.format = f;
        }
        if errors_only {
            self.rules.errors_only = true;
        }
        if let Some(j) = jobs {
            self.engine.jobs = j;
        }
        self.rules.disabled.extend(disabled_rules);
        if htmx {
            self.frameworks.htmx = true;
        }
        if let Some(version) = htmx_version {
            // Asking for a version implies wanting htmx checks
            self.frameworks.htmx = true;
            self.frameworks.htmx_version = version;
        }
    }

    /// Add patterns from `--ignore`
    pub fn add_ignore_patterns(&mut self, patterns: Vec<String>) {
        self.ignore.extend(patterns);
    }

    /// Check if a rule is enabled
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        !self.rules.disabled.iter().any(|r| r == rule_id)
    }

    /// Settings handed to configurable rules
    pub fn framework_settings(&self) -> FrameworkSettings {
        FrameworkSettings {
            htmx_enabled: self.frameworks.htmx,
            htmx_version: HtmxVersion::parse(&self.frameworks.htmx_version),
        }
    }

    /// Path of the first config file that [`Config::discover`] would load
    pub fn find_file(dir: &Path, home: Option<&Path>) -> Option<PathBuf> {
        std::iter::once(dir)
            .chain(home)
            .flat_map(|base| CONFIG_FILE_NAMES.iter().map(move |name| base.join(name)))
            .find(|path| path.exists())
    }
}
