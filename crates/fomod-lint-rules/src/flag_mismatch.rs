//! Rules to cross-check `flagDependency` usages against `flag` definitions.
//!
//! A dependency on a flag nobody sets, or on a value nobody assigns, can
//! never be satisfied, so whatever it guards is unreachable.
//!
//! Both rules only look at dependencies with a non-blank `value`; a
//! dependency with a blank value is satisfied by an unset flag. Flag text is
//! compared after trimming. A dependency on an unknown label also has no
//! flag with the required value, so it is reported by both rules.

use crate::tags::{ATTR_FLAG, ATTR_NAME, ATTR_VALUE, FLAG, FLAG_DEPENDENCY};
use fomod_lint_core::{Element, Rule, RuleContext, RuleError, Severity};

/// Rule code for mismatched-flag-labels.
pub const LABELS_CODE: &str = "FM006";

/// Rule name for mismatched-flag-labels.
pub const LABELS_NAME: &str = "mismatched-flag-labels";

/// Rule code for mismatched-flag-values.
pub const VALUES_CODE: &str = "FM007";

/// Rule name for mismatched-flag-values.
pub const VALUES_NAME: &str = "mismatched-flag-values";

/// Label and required value of a dependency, if it requires a value at all.
fn requirement(element: &Element) -> Option<(&str, &str)> {
    let value = element.non_blank_attribute(ATTR_VALUE)?;
    Some((element.attribute(ATTR_FLAG).unwrap_or_default(), value.trim()))
}

/// Every `flag` definition in the tree with the given name.
fn definitions<'a>(root: &'a Element, label: &'a str) -> impl Iterator<Item = &'a Element> {
    root.find_all(&[FLAG])
        .filter(move |flag| flag.attribute(ATTR_NAME) == Some(label))
}

/// Flags dependencies on flags that are never defined.
#[derive(Debug, Clone, Copy, Default)]
pub struct MismatchedFlagLabels;

impl MismatchedFlagLabels {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MismatchedFlagLabels {
    fn name(&self) -> &str {
        LABELS_NAME
    }

    fn code(&self) -> &str {
        LABELS_CODE
    }

    fn title(&self) -> &str {
        "Mismatched Flag Labels"
    }

    fn description(&self) -> &str {
        "Flags flag dependencies whose flag name is never set"
    }

    fn matched_tags(&self) -> Vec<&str> {
        vec![FLAG_DEPENDENCY]
    }

    fn message_template(&self) -> &str {
        "The flag(s) required under the tag {} are never set by any plugin. \
         These conditions can never be met."
    }

    fn default_severity(&self) -> Severity {
        Severity::Critical
    }

    fn is_violation(&self, ctx: &RuleContext<'_>) -> Result<bool, RuleError> {
        Ok(match requirement(ctx.element) {
            Some((label, _)) => definitions(ctx.root, label).next().is_none(),
            None => false,
        })
    }
}

/// Flags dependencies on values their flag is never set to.
#[derive(Debug, Clone, Copy, Default)]
pub struct MismatchedFlagValues;

impl MismatchedFlagValues {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MismatchedFlagValues {
    fn name(&self) -> &str {
        VALUES_NAME
    }

    fn code(&self) -> &str {
        VALUES_CODE
    }

    fn title(&self) -> &str {
        "Mismatched Flag Values"
    }

    fn description(&self) -> &str {
        "Flags flag dependencies whose value is never assigned to the flag"
    }

    fn matched_tags(&self) -> Vec<&str> {
        vec![FLAG_DEPENDENCY]
    }

    fn message_template(&self) -> &str {
        "The flag value(s) required under the tag {} are never assigned by any plugin. \
         These conditions can never be met."
    }

    fn default_severity(&self) -> Severity {
        Severity::Critical
    }

    fn is_violation(&self, ctx: &RuleContext<'_>) -> Result<bool, RuleError> {
        let Some((label, value)) = requirement(ctx.element) else {
            return Ok(false);
        };

        Ok(!definitions(ctx.root, label).any(|flag| flag.trimmed_text() == value))
    }
}
