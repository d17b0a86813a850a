//! Owned, line-annotated element tree for installer configurations.

use std::collections::BTreeMap;

/// A node of a parsed installer configuration.
///
/// Elements are produced once by the package loader (or synthesized in tests
/// through the builder methods) and never mutated by rules.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Local tag name (e.g. `folder`, `flagDependency`).
    pub tag: String,
    /// Attributes keyed by local name.
    pub attributes: BTreeMap<String, String>,
    /// First text child, if any.
    pub text: Option<String>,
    /// Child elements in document order.
    pub children: Vec<Element>,
    /// 1-indexed source line, absent for synthesized elements.
    pub line: Option<usize>,
}

impl Element {
    /// Creates an element with the given tag and nothing else.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Sets an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the source line.
    #[must_use]
    pub fn line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Appends a child element.
    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Looks up an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Looks up an attribute, treating blank values as absent.
    #[must_use]
    pub fn non_blank_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).filter(|v| !v.trim().is_empty())
    }

    /// Returns the text content with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed_text(&self) -> &str {
        self.text.as_deref().map_or("", str::trim)
    }

    /// Iterates this element and all of its descendants, depth-first, pre-order.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Iterates descendants (including `self`) whose tag is one of `tags`.
    pub fn find_all<'s: 't, 't>(
        &'s self,
        tags: &'t [&'t str],
    ) -> impl Iterator<Item = &'s Element> + 't {
        self.descendants()
            .filter(move |e| tags.contains(&e.tag.as_str()))
    }

    /// Returns `true` if any direct child has one of the given tags.
    #[must_use]
    pub fn has_child_in(&self, tags: &[&str]) -> bool {
        self.children.iter().any(|c| tags.contains(&c.tag.as_str()))
    }
}

/// Depth-first, pre-order iterator over an element subtree.
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
