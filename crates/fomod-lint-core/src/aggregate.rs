//! Grouping of rule violations into report groups.

use crate::element::Element;
use crate::rule::Rule;
use crate::types::{FindingGroup, Severity};

/// A violating element with the notes its rule attached to it.
#[derive(Debug, Clone)]
pub struct Violation<'a> {
    /// The violating element.
    pub element: &'a Element,
    /// Detail lines from [`Rule::notes`].
    pub notes: Vec<String>,
}

impl<'a> Violation<'a> {
    /// Creates a violation without notes.
    #[must_use]
    pub fn new(element: &'a Element) -> Self {
        Self {
            element,
            notes: Vec::new(),
        }
    }
}

/// Groups one rule's violations by tag.
///
/// Returns no groups for no violations. Otherwise there is one group per
/// distinct tag, in the order tags are first encountered; each group keeps
/// the line numbers of its elements in traversal order.
#[must_use]
pub fn aggregate(
    rule: &dyn Rule,
    severity: Severity,
    violations: &[Violation<'_>],
) -> Vec<FindingGroup> {
    let mut groups: Vec<FindingGroup> = Vec::new();

    for violation in violations {
        let tag = violation.element.tag.as_str();
        let index = match groups.iter().position(|g| g.tag == tag) {
            Some(index) => index,
            None => {
                groups.push(FindingGroup {
                    code: rule.code().to_string(),
                    rule: rule.name().to_string(),
                    title: rule.title().to_string(),
                    severity,
                    tag: tag.to_string(),
                    message: rule.message_for(tag),
                    lines: Vec::new(),
                    notes: Vec::new(),
                });
                groups.len() - 1
            }
        };

        let group = &mut groups[index];
        if let Some(line) = violation.element.line {
            group.lines.push(line);
        }
        group.notes.extend(violation.notes.iter().cloned());
    }

    groups
}
