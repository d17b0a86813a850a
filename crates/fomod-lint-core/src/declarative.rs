//! Data-only rules declared in the configuration file.
//!
//! ```toml
//! [[custom-rules]]
//! name = "missing-destination"
//! code = "CU001"
//! title = "Missing Destinations"
//! tags = ["file", "folder"]
//! check = { kind = "missing-attribute", attribute = "destination" }
//! message = "The tag {} has no destination attribute."
//! severity = "advisory"
//! ```

use crate::config::{Config, ConfigError};
use crate::context::RuleContext;
use crate::rule::{Rule, RuleBox, RuleError, TAG_PLACEHOLDER};
use crate::types::Severity;

use serde::{Deserialize, Serialize};

/// Predicate strategies available to declared rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CustomCheck {
    /// The attribute is absent or blank.
    MissingAttribute {
        /// Attribute name.
        attribute: String,
    },
    /// The element has no non-blank text.
    EmptyText,
    /// The tag occurs more than once among the matched elements.
    Repeated,
}

/// A rule definition from `[[custom-rules]]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomRuleDef {
    /// Kebab-case name, usable in `[rules.<name>]`.
    pub name: String,
    /// Rule code shown in reports.
    #[serde(default = "default_code")]
    pub code: String,
    /// Group title.
    pub title: String,
    /// Tags the rule scans for.
    pub tags: Vec<String>,
    /// Predicate strategy.
    pub check: CustomCheck,
    /// Message template with one `{}` for the tag.
    pub message: String,
    /// Severity of findings.
    #[serde(default = "default_severity")]
    pub severity: Severity,
    /// Optional description for `list-rules`.
    #[serde(default)]
    pub description: String,
}

fn default_code() -> String {
    "CU000".to_string()
}

fn default_severity() -> Severity {
    Severity::Advisory
}

impl CustomRuleDef {
    /// Checks the definition for problems that would make it meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the tag list is empty or the
    /// message does not contain exactly one `{}`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tags.iter().all(|t| t.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                message: format!("custom rule `{}` has no tags", self.name),
            });
        }
        let placeholders = self.message.matches(TAG_PLACEHOLDER).count();
        if placeholders != 1 {
            return Err(ConfigError::Invalid {
                message: format!(
                    "custom rule `{}` message must contain exactly one `{{}}`, found {placeholders}",
                    self.name
                ),
            });
        }
        Ok(())
    }
}

/// A rule built from a [`CustomRuleDef`].
#[derive(Debug, Clone)]
pub struct DeclaredRule {
    def: CustomRuleDef,
}

impl DeclaredRule {
    /// Wraps a validated definition.
    #[must_use]
    pub fn new(def: CustomRuleDef) -> Self {
        Self { def }
    }
}

impl Rule for DeclaredRule {
    fn name(&self) -> &str {
        &self.def.name
    }

    fn code(&self) -> &str {
        &self.def.code
    }

    fn title(&self) -> &str {
        &self.def.title
    }

    fn description(&self) -> &str {
        &self.def.description
    }

    fn matched_tags(&self) -> Vec<&str> {
        self.def.tags.iter().map(String::as_str).collect()
    }

    fn message_template(&self) -> &str {
        &self.def.message
    }

    fn default_severity(&self) -> Severity {
        self.def.severity
    }

    fn is_violation(&self, ctx: &RuleContext<'_>) -> Result<bool, RuleError> {
        Ok(match &self.def.check {
            CustomCheck::MissingAttribute { attribute } => {
                ctx.element.non_blank_attribute(attribute).is_none()
            }
            CustomCheck::EmptyText => ctx.element.trimmed_text().is_empty(),
            CustomCheck::Repeated => ctx.same_tag_count() >= 2,
        })
    }
}

/// Builds the custom rules declared in a configuration.
#[must_use]
pub fn custom_rules(config: &Config) -> Vec<RuleBox> {
    config
        .custom_rules
        .iter()
        .cloned()
        .map(|def| Box::new(DeclaredRule::new(def)) as RuleBox)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::probe::MemoryProbe;

    const CONFIG: &str = r#"
[[custom-rules]]
name = "missing-destination"
code = "CU001"
title = "Missing Destinations"
tags = ["file", "folder"]
check = { kind = "missing-attribute", attribute = "destination" }
message = "The tag {} has no destination attribute."

[[custom-rules]]
name = "unnamed-modules"
title = "Unnamed Modules"
tags = ["moduleName"]
check = { kind = "empty-text" }
message = "The tag {} is empty."
severity = "critical"
"#;

    #[test]
    fn parses_custom_rules() {
        let config = Config::parse(CONFIG).unwrap();
        let rules = custom_rules(&config);
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].code(), "CU001");
        assert_eq!(rules[0].matched_tags(), vec!["file", "folder"]);
        assert_eq!(rules[0].default_severity(), Severity::Advisory);
        assert_eq!(rules[1].code(), "CU000");
        assert_eq!(rules[1].default_severity(), Severity::Critical);
    }

    #[test]
    fn rejects_message_without_placeholder() {
        let toml = r#"
[[custom-rules]]
name = "bad"
title = "Bad"
tags = ["file"]
check = { kind = "repeated" }
message = "no placeholder"
"#;
        let err = Config::parse(toml).unwrap_err();
        assert!(err.to_string().contains("exactly one"));
    }

    #[test]
    fn rejects_empty_tags() {
        let toml = r#"
[[custom-rules]]
name = "bad"
title = "Bad"
tags = []
check = { kind = "repeated" }
message = "{}"
"#;
        let err = Config::parse(toml).unwrap_err();
        assert!(err.to_string().contains("no tags"));
    }

    #[test]
    fn missing_attribute_check() {
        let config = Config::parse(CONFIG).unwrap();
        let rules = custom_rules(&config);
        let probe = MemoryProbe::new();

        let ok = Element::new("file").attr("destination", "Data");
        let blank = Element::new("file").attr("destination", " ");
        let ctx = RuleContext::new(&ok, &[], &ok, &probe);
        assert!(!rules[0].is_violation(&ctx).unwrap());
        let ctx = RuleContext::new(&blank, &[], &blank, &probe);
        assert!(rules[0].is_violation(&ctx).unwrap());
    }

    #[test]
    fn empty_text_and_repeated_checks() {
        let root = Element::new("config")
            .child(Element::new("moduleName").text("  "))
            .child(Element::new("moduleName").text("Mod"));
        let matched: Vec<&Element> = root.children.iter().collect();
        let probe = MemoryProbe::new();

        let empty_text = DeclaredRule::new(Config::parse(CONFIG).unwrap().custom_rules[1].clone());
        let ctx = RuleContext::new(matched[0], &matched, &root, &probe);
        assert!(empty_text.is_violation(&ctx).unwrap());
        let ctx = RuleContext::new(matched[1], &matched, &root, &probe);
        assert!(!empty_text.is_violation(&ctx).unwrap());

        let mut def = Config::parse(CONFIG).unwrap().custom_rules[1].clone();
        def.check = CustomCheck::Repeated;
        let repeated = DeclaredRule::new(def);
        assert!(repeated.is_violation(&ctx).unwrap());
    }
}
