//! Rule to flag image references that don't exist in the package.

use crate::tags::{ATTR_PATH, IMAGE, MODULE_IMAGE};
use fomod_lint_core::{Rule, RuleContext, RuleError, Severity};

/// Rule code for missing-images.
pub const CODE: &str = "FM004";

/// Rule name for missing-images.
pub const NAME: &str = "missing-images";

/// Flags `moduleImage` and `image` paths that don't point at a file.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingImages;

impl MissingImages {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MissingImages {
    fn name(&self) -> &str {
        NAME
    }

    fn code(&self) -> &str {
        CODE
    }

    fn title(&self) -> &str {
        "Missing Images"
    }

    fn description(&self) -> &str {
        "Flags image paths that don't exist in the package"
    }

    fn matched_tags(&self) -> Vec<&str> {
        vec![MODULE_IMAGE, IMAGE]
    }

    fn message_template(&self) -> &str {
        "The image(s) under the tag {} weren't found inside the package. \
         The installers will show no image instead."
    }

    fn default_severity(&self) -> Severity {
        Severity::Advisory
    }

    fn is_violation(&self, ctx: &RuleContext<'_>) -> Result<bool, RuleError> {
        Ok(ctx
            .element
            .non_blank_attribute(ATTR_PATH)
            .is_some_and(|path| !ctx.probe.exists_as_file(path)))
    }
}
