//! Core types for findings and reports.

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::PathBuf;

/// Severity level for findings.
///
/// Declared explicitly by every rule so callers can triage (for example,
/// block an install only on critical findings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Suspicious but harmless on its own.
    Advisory,
    /// Will make the installer misbehave.
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Advisory => write!(f, "advisory"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "advisory" => Ok(Self::Advisory),
            "critical" => Ok(Self::Critical),
            other => Err(format!(
                "unknown severity `{other}`. Valid values: critical, advisory"
            )),
        }
    }
}

/// One rule violation at one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Title of the rule that produced it.
    pub rule_title: String,
    /// Tag of the violating element.
    pub tag: String,
    /// Source line of the violating element.
    pub line: Option<usize>,
    /// Message with the tag substituted.
    pub message: String,
}

/// All findings for one (rule, tag) pair in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingGroup {
    /// Rule code (e.g., "FM002").
    pub code: String,
    /// Rule name (e.g., "missing-source-folders").
    pub rule: String,
    /// Human label for the group.
    pub title: String,
    /// Effective severity.
    pub severity: Severity,
    /// Tag shared by every violating element in the group.
    pub tag: String,
    /// Message template with the tag substituted.
    pub message: String,
    /// Source lines in traversal order; never sorted or deduplicated.
    pub lines: Vec<usize>,
    /// Extra detail lines contributed by the rule.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl FindingGroup {
    /// Expands the group back into individual findings.
    ///
    /// Elements without a source line are not represented here, since the
    /// group only keeps line numbers.
    pub fn findings(&self) -> impl Iterator<Item = Finding> + '_ {
        self.lines.iter().map(|&line| Finding {
            rule_title: self.title.clone(),
            tag: self.tag.clone(),
            line: Some(line),
            message: self.message.clone(),
        })
    }

    /// Comma-separated line list (e.g., "4, 19").
    #[must_use]
    pub fn lines_display(&self) -> String {
        self.lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for FindingGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "Lines: {}", self.lines_display())?;
        writeln!(f, "{}", self.message)?;
        for note in &self.notes {
            writeln!(f, "  - {note}")?;
        }
        Ok(())
    }
}

/// A rule that could not be evaluated against an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFailure {
    /// Rule code.
    pub code: String,
    /// Rule name.
    pub rule: String,
    /// Tag of the element being evaluated.
    pub tag: String,
    /// Source line of that element.
    pub line: Option<usize>,
    /// What went wrong.
    pub message: String,
}

/// Title used when rendering rule failures.
pub const RULE_FAILURE_TITLE: &str = "Rule Failed To Evaluate";

/// Result of validating one installer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Configuration file the report is about, when loaded from disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Non-empty groups in rule-definition order.
    pub groups: Vec<FindingGroup>,
    /// Rules that failed to evaluate on some element.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<RuleFailure>,
}

impl Report {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the configuration path.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns true if nothing was found and every rule evaluated.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.groups.is_empty() && self.failures.is_empty()
    }

    /// Returns true if any group meets or exceeds the given severity.
    #[must_use]
    pub fn has_at_least(&self, severity: Severity) -> bool {
        self.groups.iter().any(|g| g.severity >= severity)
    }

    /// Returns true if any group is critical.
    #[must_use]
    pub fn has_critical(&self) -> bool {
        self.has_at_least(Severity::Critical)
    }

    /// Returns groups with exactly the given severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&FindingGroup> {
        self.groups
            .iter()
            .filter(|g| g.severity == severity)
            .collect()
    }

    /// Counts groups by severity as `(critical, advisory)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        let critical = self
            .groups
            .iter()
            .filter(|g| g.severity == Severity::Critical)
            .count();
        (critical, self.groups.len() - critical)
    }

    /// Iterates all individual findings in report order.
    pub fn findings(&self) -> impl Iterator<Item = Finding> + '_ {
        self.groups.iter().flat_map(FindingGroup::findings)
    }

    /// Renders the report in the plain, byte-stable text convention.
    ///
    /// Each group is its title, a `Lines:` line and its message, with one
    /// blank line between groups. Rule failures follow in the same shape.
    #[must_use]
    pub fn render_plain(&self) -> String {
        let mut blocks: Vec<String> = self.groups.iter().map(ToString::to_string).collect();

        for failure in &self.failures {
            let mut block = String::new();
            let _ = writeln!(block, "{RULE_FAILURE_TITLE}");
            let _ = writeln!(
                block,
                "Lines: {}",
                failure.line.map(|l| l.to_string()).unwrap_or_default()
            );
            let _ = writeln!(
                block,
                "The rule {} ({}) could not be evaluated on the tag {}: {}",
                failure.rule, failure.code, failure.tag, failure.message
            );
            blocks.push(block);
        }

        blocks.join("\n")
    }
}
