//! Rule to flag `folder` and `file` elements without a usable source.

use crate::tags::{ATTR_SOURCE, FILE, FOLDER};
use fomod_lint_core::{Rule, RuleContext, RuleError, Severity};

/// Rule code for empty-source-fields.
pub const CODE: &str = "FM008";

/// Rule name for empty-source-fields.
pub const NAME: &str = "empty-source-fields";

/// Flags copy instructions whose `source` is absent or blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySourceFields;

impl EmptySourceFields {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for EmptySourceFields {
    fn name(&self) -> &str {
        NAME
    }

    fn code(&self) -> &str {
        CODE
    }

    fn title(&self) -> &str {
        "Empty Source Fields"
    }

    fn description(&self) -> &str {
        "Flags folder and file elements with an absent or blank source"
    }

    fn matched_tags(&self) -> Vec<&str> {
        vec![FOLDER, FILE]
    }

    fn message_template(&self) -> &str {
        "The source field(s) under the tag {} are empty. \
         Depending on the installer this may install the whole package or nothing at all."
    }

    fn default_severity(&self) -> Severity {
        Severity::Critical
    }

    fn is_violation(&self, ctx: &RuleContext<'_>) -> Result<bool, RuleError> {
        Ok(ctx.element.non_blank_attribute(ATTR_SOURCE).is_none())
    }
}
