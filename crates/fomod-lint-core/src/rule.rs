//! Rule trait for defining lint rules.

use crate::context::RuleContext;
use crate::types::Severity;

/// Placeholder substituted with the matched tag in message templates.
pub const TAG_PLACEHOLDER: &str = "{}";

/// An error raised while evaluating a rule against one element.
///
/// Rule errors never abort a run; the evaluator records them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RuleError {
    message: String,
}

impl RuleError {
    /// Creates a new rule error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for RuleError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// A lint rule over the installer's element tree.
///
/// A rule is data (tags, title, message template, severity) plus one
/// predicate. Rules carry no per-run state, and may only reach the
/// filesystem through the probe in the [`RuleContext`]. Rules report
/// problems through [`RuleError`]; a panic is caught by the evaluator and
/// recorded as a failure too.
///
/// # Example
///
/// ```ignore
/// use fomod_lint_core::{Rule, RuleContext, RuleError, Severity};
///
/// pub struct UnnamedPlugins;
///
/// impl Rule for UnnamedPlugins {
///     fn name(&self) -> &str { "unnamed-plugins" }
///     fn code(&self) -> &str { "CU001" }
///     fn title(&self) -> &str { "Unnamed Plugins" }
///     fn matched_tags(&self) -> Vec<&str> { vec!["plugin"] }
///     fn message_template(&self) -> &str { "The tag {} has no name." }
///     fn default_severity(&self) -> Severity { Severity::Advisory }
///
///     fn is_violation(&self, ctx: &RuleContext<'_>) -> Result<bool, RuleError> {
///         Ok(ctx.element.non_blank_attribute("name").is_none())
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "missing-source-files").
    fn name(&self) -> &str;

    /// Returns the rule code (e.g., "FM003").
    fn code(&self) -> &str;

    /// Returns the human label for a group of findings.
    fn title(&self) -> &str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &str {
        ""
    }

    /// Returns the tags this rule scans for. Never empty.
    fn matched_tags(&self) -> Vec<&str>;

    /// Returns the message template, containing one `{}` for the tag.
    fn message_template(&self) -> &str;

    /// Returns the default severity for findings from this rule.
    fn default_severity(&self) -> Severity;

    /// Decides whether the context's element violates this rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule cannot be evaluated for this element.
    fn is_violation(&self, ctx: &RuleContext<'_>) -> Result<bool, RuleError>;

    /// Extra detail lines for a violating element.
    fn notes(&self, _ctx: &RuleContext<'_>) -> Vec<String> {
        Vec::new()
    }

    /// Evaluates the element: `Some(notes)` for a violation, `None` otherwise.
    ///
    /// This is what the evaluator calls. The default asks
    /// [`Rule::is_violation`], then [`Rule::notes`] for violations. Rules
    /// that derive both from one computation override this instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule cannot be evaluated for this element.
    fn check(&self, ctx: &RuleContext<'_>) -> Result<Option<Vec<String>>, RuleError> {
        Ok(if self.is_violation(ctx)? {
            Some(self.notes(ctx))
        } else {
            None
        })
    }

    /// Renders the message for a matched tag.
    fn message_for(&self, tag: &str) -> String {
        render_template(self.message_template(), tag)
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Substitutes `tag` into a message template.
#[must_use]
pub fn render_template(template: &str, tag: &str) -> String {
    template.replacen(TAG_PLACEHOLDER, tag, 1)
}
