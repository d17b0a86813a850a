//! Rule presets for common configurations.

use crate::{
    EmptyInstaller, EmptySourceFields, MismatchedFlagLabels, MismatchedFlagValues, MissingImages,
    MissingSourceFiles, MissingSourceFolders, RepeatedElements, SourceFolderIsFile, UnusedFiles,
};
use fomod_lint_core::declarative::custom_rules;
use fomod_lint_core::{Config, ConfigError, RuleBox, Severity};
use tracing::debug;

/// Preset configurations for fomod-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Every standard rule except the opt-in ones.
    #[default]
    Recommended,
    /// All rules, including opt-in ones.
    Strict,
    /// Critical rules only, for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }

    /// Preset name as written in config files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::Minimal => "minimal",
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            "minimal" => Ok(Self::Minimal),
            other => Err(ConfigError::Invalid {
                message: format!(
                    "unknown preset '{other}' (expected recommended, strict or minimal)"
                ),
            }),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes every standard rule except the opt-in `unused-files`, in code
/// order:
/// - `repeated-elements` (FM001)
/// - `missing-source-folders` (FM002) and `missing-source-files` (FM003)
/// - `missing-images` (FM004)
/// - `empty-installer` (FM005)
/// - `mismatched-flag-labels` (FM006) and `mismatched-flag-values` (FM007)
/// - `empty-source-fields` (FM008)
/// - `source-folder-is-file` (FM010)
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![
        Box::new(RepeatedElements::new()),
        Box::new(MissingSourceFolders::new()),
        Box::new(MissingSourceFiles::new()),
        Box::new(MissingImages::new()),
        Box::new(EmptyInstaller::new()),
        Box::new(MismatchedFlagLabels::new()),
        Box::new(MismatchedFlagValues::new()),
        Box::new(EmptySourceFields::new()),
        Box::new(SourceFolderIsFile::new()),
    ]
}

/// Returns the strict set of rules: the recommended ones plus `unused-files`.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    all_rules()
}

/// Returns the minimal set of rules: those whose default severity is critical.
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    recommended_rules()
        .into_iter()
        .filter(|rule| rule.default_severity() == Severity::Critical)
        .collect()
}

/// Returns all available rules, in code order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    let mut rules = recommended_rules();
    rules.push(Box::new(UnusedFiles::new()));
    rules.sort_by(|a, b| a.code().cmp(b.code()));
    rules
}

/// Builds the rule set a configuration asks for.
///
/// Starts from the configured preset (recommended when unset), adds
/// `unused-files` when `[rules.unused-files]` switches it on, then appends
/// the config's custom rules. Rule options such as the `unused-files`
/// ignore patterns are taken from the config.
///
/// # Errors
///
/// Returns an error if the preset name is unknown.
pub fn rules_for_config(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    let preset = match config.preset.as_deref() {
        Some(name) => name.parse()?,
        None => Preset::default(),
    };
    debug!("Using preset {}", preset.as_str());

    let mut rules: Vec<RuleBox> = preset
        .rules()
        .into_iter()
        .filter(|rule| rule.name() != crate::unused_files::NAME)
        .collect();

    if preset == Preset::Strict || config.is_rule_opted_in(crate::unused_files::NAME) {
        rules.push(Box::new(UnusedFiles::from_config(config)));
    }

    rules.extend(custom_rules(config));
    Ok(rules)
}
