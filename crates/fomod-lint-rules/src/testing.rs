//! Test helpers shared by the rule modules.

use fomod_lint_core::{Element, FilesystemProbe, FindingGroup, Report, Rule, Validator};

/// Runs a single rule and returns its groups.
pub fn check<R: Rule + 'static>(
    rule: R,
    root: &Element,
    probe: &dyn FilesystemProbe,
) -> Vec<FindingGroup> {
    run(rule, root, probe).groups
}

/// Runs a single rule and returns the whole report.
pub fn run<R: Rule + 'static>(rule: R, root: &Element, probe: &dyn FilesystemProbe) -> Report {
    Validator::builder().rule(rule).build().evaluate(root, probe)
}
