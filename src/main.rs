//! htmlint CLI
//!
//! Lints HTML files and Go template partials, optionally validating htmx
//! attributes.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use htmlint::config::{ColorMode, Config, OutputFormat};
use htmlint::engine::Engine;
use htmlint::files::FileCollector;
use htmlint::ignore::{self, IgnoreMatcher};
use htmlint::output;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "htmlint",
    version,
    about = "HTML linter for Go templates",
    long_about = "Static checks for HTML and Go template partials: structure, references, \
                  accessibility attributes and htmx attribute grammars."
)]
struct Cli {
    /// Files, directories or glob patterns to lint
    files: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Only report errors, not warnings
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Glob pattern to ignore (repeatable)
    #[arg(long, value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Disable rules (repeatable or comma-separated)
    #[arg(long, value_name = "RULE", value_delimiter = ',')]
    disable: Vec<String>,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Validate htmx attributes
    #[arg(long)]
    htmx: bool,

    /// htmx major version ("2" or "4"); implies --htmx
    #[arg(long, value_name = "VERSION")]
    htmx_version: Option<String>,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long)]
    jobs: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            std::process::exit(2);
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load_default().context("failed to load config")?,
    };

    config.merge_cli(
        cli.format.map(OutputFormat::from),
        cli.quiet,
        cli.jobs,
        cli.disable.clone(),
        cli.htmx,
        cli.htmx_version.clone(),
    );
    config.add_ignore_patterns(cli.ignore.clone());

    if cli.no_color {
        config.output.color = ColorMode::Never;
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<i32> {
    let config = load_config(&cli)?;

    // Auto keeps colored's own tty and NO_COLOR detection
    if let Some(force) = config.output.color.forced() {
        colored::control::set_override(force);
    }
    let colored = config.output.color != ColorMode::Never;

    let engine = Engine::new(config);

    if cli.list_rules {
        print_rules(&engine);
        return Ok(0);
    }

    if cli.files.is_empty() {
        bail!("no files or directories specified\nusage: htmlint [OPTIONS] <FILES or DIRS>...");
    }

    let mut patterns = ignore::load_ignore_patterns(Path::new("."))
        .context("failed to read ignore file")?;
    patterns.extend(engine.config().ignore.iter().cloned());
    let matcher = IgnoreMatcher::new(&patterns).context("invalid ignore pattern")?;

    let files = FileCollector::new(&engine.config().files, matcher)?
        .collect(&cli.files)?;
    if files.is_empty() {
        eprintln!("{}: no files found to lint", "warning".yellow().bold());
        return Ok(0);
    }

    let result = engine.lint(&files);

    for failure in &result.failures {
        eprintln!("{}: {}", "error".red().bold(), failure);
    }

    let formatter = output::formatter(engine.config().output.format, colored);
    print!("{}", formatter.format(&result));

    Ok(result.exit_code())
}

fn print_rules(engine: &Engine) {
    println!("{}", "Available rules:".bold());
    println!();
    for rule in engine.registry().iter() {
        let id = if engine.config().is_rule_enabled(rule.id()) {
            rule.id().green()
        } else {
            rule.id().dimmed()
        };
        println!("  {:<28} {}", id, rule.description());
    }
}
