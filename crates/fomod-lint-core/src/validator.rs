//! Rule evaluation over a configuration tree.

use crate::aggregate::{aggregate, Violation};
use crate::config::{Config, ConfigError};
use crate::context::RuleContext;
use crate::element::Element;
use crate::package::{Package, PackageError};
use crate::probe::{DiskProbe, FilesystemProbe};
use crate::rule::{Rule, RuleBox, RuleError};
use crate::types::{Report, RuleFailure};

use miette::Diagnostic;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that stop a validation run before any rule runs.
#[derive(Debug, Error, Diagnostic)]
pub enum ValidationError {
    /// The package cannot be located or parsed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Package(#[from] PackageError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    #[diagnostic(code(fomod_lint::config))]
    Config(#[from] ConfigError),
}

/// Builder for configuring a [`Validator`].
#[derive(Default)]
pub struct ValidatorBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
}

impl ValidatorBuilder {
    /// Creates a new builder with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the validator.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the validator.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules, keeping their order.
    #[must_use]
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = RuleBox>,
    {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the validator.
    #[must_use]
    pub fn build(self) -> Validator {
        Validator {
            rules: self.rules,
            config: self.config.unwrap_or_default(),
        }
    }
}

/// Runs an ordered set of rules against installer configurations.
///
/// Use [`Validator::builder()`] to construct an instance.
pub struct Validator {
    rules: Vec<RuleBox>,
    config: Config,
}

impl Validator {
    /// Creates a new builder for configuring a validator.
    #[must_use]
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the registered rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Locates and parses the package at `path`, then evaluates it against
    /// the real filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the package cannot be found or its configuration
    /// is malformed. Rule findings are never errors.
    pub fn validate(&self, path: &Path) -> Result<Report, ValidationError> {
        let package = Package::locate(path)?;
        let root = package.load()?;
        let probe = DiskProbe::new(package.root());

        Ok(self
            .evaluate(&root, &probe)
            .with_source(package.config_path()))
    }

    /// Evaluates every enabled rule against a parsed tree.
    ///
    /// Groups appear in rule registration order. A rule that fails on an
    /// element is recorded in [`Report::failures`] and does not stop the run.
    #[must_use]
    pub fn evaluate(&self, root: &Element, probe: &dyn FilesystemProbe) -> Report {
        info!("Evaluating {} rules", self.rules.len());

        let mut report = Report::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let (violations, failures) = Self::evaluate_rule(rule.as_ref(), root, probe);
            report.failures.extend(failures);

            let severity = self
                .config
                .rule_severity(rule.name())
                .unwrap_or_else(|| rule.default_severity());
            report
                .groups
                .extend(aggregate(rule.as_ref(), severity, &violations));
        }

        info!(
            "Evaluation complete: {} groups, {} rule failures",
            report.groups.len(),
            report.failures.len()
        );

        report
    }

    /// Runs one rule over its matched elements.
    fn evaluate_rule<'a>(
        rule: &dyn Rule,
        root: &'a Element,
        probe: &dyn FilesystemProbe,
    ) -> (Vec<Violation<'a>>, Vec<RuleFailure>) {
        let tags = rule.matched_tags();
        let matched: Vec<&Element> = root.find_all(&tags).collect();

        debug!("Rule {} matched {} elements", rule.name(), matched.len());

        let mut violations = Vec::new();
        let mut failures = Vec::new();

        for &element in &matched {
            let ctx = RuleContext::new(element, &matched, root, probe);
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.check(&ctx)))
                .unwrap_or_else(|payload| Err(panicked(payload.as_ref())));

            match outcome {
                Ok(Some(notes)) => violations.push(Violation { element, notes }),
                Ok(None) => {}
                Err(e) => {
                    warn!(
                        "Rule {} failed on <{}> at line {:?}: {}",
                        rule.name(),
                        element.tag,
                        element.line,
                        e
                    );
                    failures.push(RuleFailure {
                        code: rule.code().to_string(),
                        rule: rule.name().to_string(),
                        tag: element.tag.clone(),
                        line: element.line,
                        message: e.to_string(),
                    });
                }
            }
        }

        (violations, failures)
    }
}

/// Turns a caught panic into a rule error.
fn panicked(payload: &(dyn Any + Send)) -> RuleError {
    let detail = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown cause");
    RuleError::new(format!("rule panicked: {detail}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::MemoryProbe;
    use crate::types::Severity;

    struct Flagged {
        name: &'static str,
        tags: Vec<&'static str>,
        fail_on_line: Option<usize>,
        panic_on_line: Option<usize>,
    }

    impl Rule for Flagged {
        fn name(&self) -> &str {
            self.name
        }
        fn code(&self) -> &str {
            "T001"
        }
        fn title(&self) -> &str {
            "Flagged"
        }
        fn matched_tags(&self) -> Vec<&str> {
            self.tags.clone()
        }
        fn message_template(&self) -> &str {
            "Tag {} flagged."
        }
        fn default_severity(&self) -> Severity {
            Severity::Advisory
        }
        fn is_violation(&self, ctx: &RuleContext<'_>) -> Result<bool, RuleError> {
            if ctx.element.line == self.fail_on_line {
                return Err(RuleError::new("cannot evaluate"));
            }
            if ctx.element.line == self.panic_on_line {
                panic!("index out of range");
            }
            Ok(ctx.element.attribute("bad").is_some())
        }
    }

    fn rule(name: &'static str, tags: Vec<&'static str>) -> Flagged {
        Flagged {
            name,
            tags,
            fail_on_line: None,
            panic_on_line: None,
        }
    }

    fn tree() -> Element {
        Element::new("config")
            .line(1)
            .child(Element::new("file").attr("bad", "").line(2))
            .child(Element::new("folder").line(3))
            .child(Element::new("file").attr("bad", "").line(4))
    }

    #[test]
    fn rule_without_matches_yields_nothing() {
        let validator = Validator::builder().rule(rule("a", vec!["image"])).build();
        let report = validator.evaluate(&tree(), &MemoryProbe::new());
        assert!(report.is_clean());
    }

    #[test]
    fn groups_follow_rule_order() {
        let validator = Validator::builder()
            .rule(rule("second", vec!["file"]))
            .rule(rule("first", vec!["file"]))
            .build();
        let report = validator.evaluate(&tree(), &MemoryProbe::new());
        let names: Vec<_> = report.groups.iter().map(|g| g.rule.as_str()).collect();
        assert_eq!(names, vec!["second", "first"]);
        assert_eq!(report.groups[0].lines, vec![2, 4]);
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let config = Config::parse("[rules.a]\nenabled = false\n").unwrap();
        let validator = Validator::builder()
            .rule(rule("a", vec!["file"]))
            .config(config)
            .build();
        assert!(validator.evaluate(&tree(), &MemoryProbe::new()).is_clean());
    }

    #[test]
    fn severity_override_applies() {
        let config = Config::parse("[rules.a]\nseverity = \"critical\"\n").unwrap();
        let validator = Validator::builder()
            .rule(rule("a", vec!["file"]))
            .config(config)
            .build();
        let report = validator.evaluate(&tree(), &MemoryProbe::new());
        assert_eq!(report.groups[0].severity, Severity::Critical);
    }

    #[test]
    fn failures_do_not_stop_other_elements_or_rules() {
        let failing = Flagged {
            name: "failing",
            tags: vec!["file"],
            fail_on_line: Some(2),
            panic_on_line: None,
        };
        let validator = Validator::builder()
            .rule(failing)
            .rule(rule("healthy", vec!["file"]))
            .build();

        let report = validator.evaluate(&tree(), &MemoryProbe::new());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].line, Some(2));
        assert_eq!(report.groups.len(), 2);
        assert_eq!(report.groups[0].lines, vec![4]);
        assert_eq!(report.groups[1].lines, vec![2, 4]);
    }

    #[test]
    fn panicking_rule_is_recorded_as_failure() {
        let panicking = Flagged {
            name: "panicking",
            tags: vec!["file"],
            fail_on_line: None,
            panic_on_line: Some(4),
        };
        let validator = Validator::builder()
            .rule(panicking)
            .rule(rule("healthy", vec!["file"]))
            .build();

        let report = validator.evaluate(&tree(), &MemoryProbe::new());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].rule, "panicking");
        assert_eq!(report.failures[0].line, Some(4));
        assert_eq!(report.failures[0].message, "rule panicked: index out of range");
        assert_eq!(report.groups[0].lines, vec![2]);
        assert_eq!(report.groups[1].lines, vec![2, 4]);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let validator = Validator::builder()
            .rule(rule("a", vec!["file", "folder"]))
            .build();
        let first = validator.evaluate(&tree(), &MemoryProbe::new());
        let second = validator.evaluate(&tree(), &MemoryProbe::new());
        assert_eq!(first, second);
        assert_eq!(first.render_plain(), second.render_plain());
    }

    #[test]
    fn validate_missing_package_is_error() {
        let validator = Validator::builder().build();
        let err = validator.validate(Path::new("/no/such/package")).unwrap_err();
        assert!(matches!(err, ValidationError::Package(PackageError::NotFound { .. })));
    }
}
