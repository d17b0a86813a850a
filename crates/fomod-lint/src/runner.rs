//! Package validation with configuration discovery.
//!
//! Looks for `fomod-lint.toml` (or `.fomod-lint.toml`) in the package root,
//! builds the configured rule set and runs it.

use fomod_lint_core::{
    find_config, Config, ConfigError, Package, Report, ValidationError, Validator,
};
use fomod_lint_rules::rules_for_config;
use std::path::Path;
use tracing::debug;

/// Validates the package at `path` with the configuration found in its root,
/// or the defaults when there is none.
///
/// `path` may be the package root, its `fomod` folder or the configuration
/// file itself.
///
/// # Errors
///
/// Returns an error if the package cannot be found or parsed, or if its
/// configuration file is invalid.
pub fn validate(path: &Path) -> Result<Report, ValidationError> {
    let package = Package::locate(path)?;
    let config = match find_config(package.root()) {
        Some(config_path) => {
            debug!("Using package config {}", config_path.display());
            Config::from_file(&config_path)?
        }
        None => Config::default(),
    };
    validate_with_config(path, config)
}

/// Validates the package at `path` with an explicit configuration.
///
/// # Errors
///
/// Returns an error if the package cannot be found or parsed, or if the
/// configuration names an unknown preset.
pub fn validate_with_config(path: &Path, config: Config) -> Result<Report, ValidationError> {
    validator(config)?.validate(path)
}

/// Builds a validator with the rule set `config` asks for.
///
/// # Errors
///
/// Returns an error if the configuration names an unknown preset.
pub fn validator(config: Config) -> Result<Validator, ConfigError> {
    let rules = rules_for_config(&config)?;
    Ok(Validator::builder().rules(rules).config(config).build())
}
