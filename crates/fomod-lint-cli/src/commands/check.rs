//! Check command implementation.

use anyhow::{Context, Result};
use fomod_lint_core::declarative::custom_rules;
use fomod_lint_core::{Config, Package, Rule, RuleBox, Severity, ValidationError, Validator};
use fomod_lint_rules::{recommended_rules, rules_for_config, UnusedFiles};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config_resolver::{self, ConfigSource};
use crate::OutputFormat;

/// Rule switched on by `--unused`.
const UNUSED_FILES: &str = "unused-files";

/// Exit code when findings reach the `fail_on` severity.
const EXIT_FINDINGS: u8 = 1;

/// Options of the check command.
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes to run instead of the preset.
    pub rules: Option<String>,
    /// Enable `unused-files`.
    pub unused: bool,
    /// Overrides the configured `fail_on`.
    pub fail_on: Option<Severity>,
    /// Explicit config file.
    pub config: Option<PathBuf>,
}

/// Runs the check command.
pub fn run(path: &Path, options: &CheckOptions) -> Result<ExitCode> {
    let package = match Package::locate(path) {
        Ok(package) => package,
        Err(e) => return Ok(unusable(e.into())),
    };

    let source = config_resolver::resolve(package.root(), options.config.as_deref());
    let mut config = load_config(&source)?;

    if options.unused {
        config
            .rules
            .entry(UNUSED_FILES.to_string())
            .or_default()
            .enabled = Some(true);
    }
    let threshold = fail_threshold(options, &config);

    let rules = match &options.rules {
        Some(filter) => {
            let names: Vec<&str> = filter
                .split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .collect();
            select_rules(&names, &config)
        }
        None => rules_for_config(&config).context("Invalid configuration")?,
    };

    let validator = Validator::builder().rules(rules).config(config).build();

    tracing::info!(
        "Checking {} with {} rules",
        package.config_path().display(),
        validator.rule_count()
    );

    let report = match validator.validate(package.config_path()) {
        Ok(report) => report,
        Err(e) => return Ok(unusable(e)),
    };

    super::output::print(&report, options.format)?;

    Ok(if report.has_at_least(threshold) {
        ExitCode::from(EXIT_FINDINGS)
    } else {
        ExitCode::SUCCESS
    })
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Severity at which the run fails: `--fail-on`, then the config.
fn fail_threshold(options: &CheckOptions, config: &Config) -> Severity {
    options.fail_on.unwrap_or_else(|| config.fail_on())
}

/// Renders a package or configuration error and returns the matching exit code.
fn unusable(error: ValidationError) -> ExitCode {
    eprintln!("{:?}", miette::Report::new(error));
    ExitCode::from(2)
}

/// Picks rules by name or code, keeping catalog order.
///
/// Every built-in rule (including opt-in ones) and every custom rule of the
/// config can be selected. Unknown names are logged and ignored.
fn select_rules(names: &[&str], config: &Config) -> Vec<RuleBox> {
    let mut candidates = recommended_rules();
    candidates.push(Box::new(UnusedFiles::from_config(config)));
    candidates.extend(custom_rules(config));

    for name in names {
        if !candidates.iter().any(|rule| is_selected(rule.as_ref(), name)) {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    candidates
        .into_iter()
        .filter(|rule| names.iter().any(|name| is_selected(rule.as_ref(), name)))
        .collect()
}

fn is_selected(rule: &dyn Rule, name: &str) -> bool {
    rule.name() == name || rule.code().eq_ignore_ascii_case(name)
}
