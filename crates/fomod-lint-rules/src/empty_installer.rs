//! Rule to flag installers that install nothing.
//!
//! An installer needs at least one of `moduleDependencies`,
//! `requiredInstallFiles`, `installSteps` or `conditionalFileInstalls`
//! directly under the root; otherwise mod managers accept it and do nothing.

use crate::tags::{ACTION_BLOCKS, CONFIG};
use fomod_lint_core::{Rule, RuleContext, RuleError, Severity};

/// Rule code for empty-installer.
pub const CODE: &str = "FM005";

/// Rule name for empty-installer.
pub const NAME: &str = "empty-installer";

/// Flags a root `config` element without any action block.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyInstaller;

impl EmptyInstaller {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for EmptyInstaller {
    fn name(&self) -> &str {
        NAME
    }

    fn code(&self) -> &str {
        CODE
    }

    fn title(&self) -> &str {
        "Empty Installer"
    }

    fn description(&self) -> &str {
        "Flags installers without dependencies, files, steps or conditional installs"
    }

    fn matched_tags(&self) -> Vec<&str> {
        vec![CONFIG]
    }

    fn message_template(&self) -> &str {
        "The tag {} has no dependencies, required files, install steps or conditional installs. \
         This installer does nothing."
    }

    fn default_severity(&self) -> Severity {
        Severity::Critical
    }

    fn is_violation(&self, ctx: &RuleContext<'_>) -> Result<bool, RuleError> {
        Ok(ctx.is_root() && !ctx.element.has_child_in(ACTION_BLOCKS))
    }
}
