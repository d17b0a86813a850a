//! Configuration types for fomod-lint.

use crate::declarative::CustomRuleDef;
use crate::types::Severity;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Config file names looked up in a package root, in priority order.
pub const CONFIG_CANDIDATES: &[&str] = &["fomod-lint.toml", ".fomod-lint.toml"];

/// Finds the configuration file shipped in a package root.
///
/// Directories named like a config file are skipped.
#[must_use]
pub fn find_config(package_root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| package_root.join(name))
        .find(|candidate| candidate.is_file())
}

/// Top-level configuration, usually loaded from `fomod-lint.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "strict", "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity threshold for a failing run (default: "critical").
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,

    /// Data-only rules declared in the config file.
    #[serde(default, rename = "custom-rules")]
    pub custom_rules: Vec<CustomRuleDef>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a custom rule is malformed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        for def in &config.custom_rules {
            def.validate()?;
        }
        Ok(config)
    }

    /// Checks if a rule is enabled. Rules are enabled unless configured otherwise.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Checks if a rule was explicitly switched on (for opt-in rules).
    #[must_use]
    pub fn is_rule_opted_in(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .and_then(|c| c.enabled)
            .unwrap_or(false)
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Gets the configuration block for a rule.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// Severity at which a run is considered failed.
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Critical)
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets an option value as a specific type.
    #[must_use]
    pub fn get_option<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.options
            .get(key)
            .and_then(|v| v.clone().try_into().ok())
    }

    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.options
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Well-formed but unusable configuration.
    #[error("Invalid config: {message}")]
    Invalid {
        /// What is wrong.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.rules.is_empty());
        assert!(config.custom_rules.is_empty());
        assert_eq!(config.fail_on(), Severity::Critical);
        assert!(config.is_rule_enabled("missing-source-files"));
        assert!(!config.is_rule_opted_in("unused-files"));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "strict"
fail_on = "advisory"

[rules.repeated-elements]
enabled = false

[rules.missing-images]
severity = "critical"

[rules.unused-files]
enabled = true
ignore = ["*.txt", "docs/**"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert_eq!(config.fail_on(), Severity::Advisory);
        assert!(!config.is_rule_enabled("repeated-elements"));
        assert!(config.is_rule_enabled("missing-images"));
        assert_eq!(
            config.rule_severity("missing-images"),
            Some(Severity::Critical)
        );
        assert!(config.is_rule_opted_in("unused-files"));

        let unused = config.rule("unused-files").unwrap();
        assert_eq!(unused.get_str_array("ignore"), vec!["*.txt", "docs/**"]);
        assert!(unused.get_str_array("missing").is_empty());
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("preset = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_find_config_prefers_visible_name() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(find_config(tmp.path()).is_none());

        let hidden = tmp.path().join(".fomod-lint.toml");
        std::fs::write(&hidden, "").unwrap();
        assert_eq!(find_config(tmp.path()), Some(hidden));

        let visible = tmp.path().join("fomod-lint.toml");
        std::fs::write(&visible, "").unwrap();
        assert_eq!(find_config(tmp.path()), Some(visible));
    }

    #[test]
    fn test_find_config_skips_directories() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("fomod-lint.toml")).unwrap();
        assert!(find_config(tmp.path()).is_none());
    }

    #[test]
    fn test_unknown_severity_is_parse_error() {
        let err = Config::parse("fail_on = \"error\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
