//! Context types for rule execution.

use crate::element::Element;
use crate::probe::FilesystemProbe;

/// Inputs handed to a rule's predicate for one element.
///
/// `matched` holds every element that matched the rule's tags, so a
/// predicate can compare an element against its peers, and `root` allows
/// rescanning the whole tree for unrelated tags (flag definitions, for
/// instance).
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    /// Element under evaluation.
    pub element: &'a Element,
    /// All elements matching the rule's tags, in traversal order.
    pub matched: &'a [&'a Element],
    /// Root of the configuration tree.
    pub root: &'a Element,
    /// Filesystem access relative to the package root.
    pub probe: &'a dyn FilesystemProbe,
}

impl<'a> RuleContext<'a> {
    /// Creates a new rule context.
    #[must_use]
    pub fn new(
        element: &'a Element,
        matched: &'a [&'a Element],
        root: &'a Element,
        probe: &'a dyn FilesystemProbe,
    ) -> Self {
        Self {
            element,
            matched,
            root,
            probe,
        }
    }

    /// Counts matched elements sharing the current element's tag.
    #[must_use]
    pub fn same_tag_count(&self) -> usize {
        self.matched
            .iter()
            .filter(|e| e.tag == self.element.tag)
            .count()
    }

    /// Returns true if the current element is the tree root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        std::ptr::eq(self.element, self.root)
    }
}

impl std::fmt::Debug for RuleContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleContext")
            .field("tag", &self.element.tag)
            .field("line", &self.element.line)
            .field("matched", &self.matched.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::MemoryProbe;

    #[test]
    fn same_tag_count_ignores_other_tags() {
        let root = Element::new("config")
            .child(Element::new("moduleName"))
            .child(Element::new("moduleName"))
            .child(Element::new("moduleImage"));
        let matched: Vec<&Element> = root.children.iter().collect();
        let probe = MemoryProbe::new();

        let ctx = RuleContext::new(matched[0], &matched, &root, &probe);
        assert_eq!(ctx.same_tag_count(), 2);

        let ctx = RuleContext::new(matched[2], &matched, &root, &probe);
        assert_eq!(ctx.same_tag_count(), 1);
    }

    #[test]
    fn is_root_uses_identity() {
        let root = Element::new("config").child(Element::new("config"));
        let probe = MemoryProbe::new();

        assert!(RuleContext::new(&root, &[], &root, &probe).is_root());
        assert!(!RuleContext::new(&root.children[0], &[], &root, &probe).is_root());
    }
}
