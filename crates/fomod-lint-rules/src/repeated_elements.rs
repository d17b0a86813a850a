//! Rule to flag top-level elements that appear more than once.
//!
//! # Rationale
//!
//! The schema allows a single `moduleName`, `moduleImage` and one of each
//! top-level block. Mod managers silently pick one occurrence and ignore
//! the rest, so duplicates usually mean lost content.
//!
//! Every occurrence of a repeated tag is flagged, not just the second one,
//! so all of them show up in the report.

use crate::tags::SINGLETONS;
use fomod_lint_core::{Rule, RuleContext, RuleError, Severity};

/// Rule code for repeated-elements.
pub const CODE: &str = "FM001";

/// Rule name for repeated-elements.
pub const NAME: &str = "repeated-elements";

/// Flags tags that should appear at most once.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepeatedElements;

impl RepeatedElements {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for RepeatedElements {
    fn name(&self) -> &str {
        NAME
    }

    fn code(&self) -> &str {
        CODE
    }

    fn title(&self) -> &str {
        "Repeated Elements"
    }

    fn description(&self) -> &str {
        "Flags top-level tags that appear more than once"
    }

    fn matched_tags(&self) -> Vec<&str> {
        SINGLETONS.to_vec()
    }

    fn message_template(&self) -> &str {
        "The tag {} has several occurrences, this may produce unexpected results."
    }

    fn default_severity(&self) -> Severity {
        Severity::Advisory
    }

    fn is_violation(&self, ctx: &RuleContext<'_>) -> Result<bool, RuleError> {
        Ok(ctx.same_tag_count() >= 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::check;
    use fomod_lint_core::{Element, MemoryProbe};

    #[test]
    fn single_occurrences_pass() {
        let root = Element::new("config")
            .line(1)
            .child(Element::new("moduleName").line(2))
            .child(Element::new("moduleImage").line(3))
            .child(Element::new("installSteps").line(4));
        assert!(check(RepeatedElements, &root, &MemoryProbe::new()).is_empty());
    }

    #[test]
    fn flags_every_occurrence() {
        let root = Element::new("config")
            .line(1)
            .child(Element::new("moduleName").line(4))
            .child(Element::new("installSteps").line(5))
            .child(Element::new("moduleName").line(19));

        let groups = check(RepeatedElements, &root, &MemoryProbe::new());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title, "Repeated Elements");
        assert_eq!(groups[0].lines, vec![4, 19]);
        assert_eq!(
            groups[0].message,
            "The tag moduleName has several occurrences, this may produce unexpected results."
        );
    }

    #[test]
    fn counts_nested_occurrences() {
        let root = Element::new("config")
            .child(Element::new("moduleImage").line(3))
            .child(Element::new("installSteps").child(Element::new("moduleImage").line(8)))
            .child(Element::new("moduleImage").line(12));

        let groups = check(RepeatedElements, &root, &MemoryProbe::new());
        assert_eq!(groups[0].lines, vec![3, 8, 12]);
    }

    #[test]
    fn groups_each_repeated_tag_separately() {
        let root = Element::new("config")
            .child(Element::new("moduleName").line(2))
            .child(Element::new("installSteps").line(3))
            .child(Element::new("moduleName").line(4))
            .child(Element::new("installSteps").line(5));

        let groups = check(RepeatedElements, &root, &MemoryProbe::new());
        let tags: Vec<_> = groups.iter().map(|g| g.tag.as_str()).collect();
        assert_eq!(tags, vec!["moduleName", "installSteps"]);
    }
}
