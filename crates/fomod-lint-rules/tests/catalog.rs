//! Runs the whole standard catalog over one installer.

use fomod_lint_core::{Element, MemoryProbe, Report, Severity, Validator};
use fomod_lint_rules::{recommended_rules, strict_rules};

fn installer() -> Element {
    Element::new("config")
        .line(2)
        .child(Element::new("moduleName").text("Mod").line(3))
        .child(Element::new("moduleName").text("Mod").line(4))
        .child(
            Element::new("requiredInstallFiles")
                .line(5)
                .child(Element::new("folder").attr("source", "Data").line(6))
                .child(Element::new("file").attr("source", "missing.esp").line(7))
                .child(Element::new("file").line(8)),
        )
        .child(
            Element::new("installSteps")
                .line(9)
                .child(Element::new("flag").attr("name", "A").text("On").line(10))
                .child(
                    Element::new("flagDependency")
                        .attr("flag", "A")
                        .attr("value", "Off")
                        .line(11),
                )
                .child(
                    Element::new("flagDependency")
                        .attr("flag", "B")
                        .attr("value", "On")
                        .line(12),
                )
                .child(Element::new("image").attr("path", "img.png").line(13)),
        )
}

fn probe() -> MemoryProbe {
    MemoryProbe::new()
        .with_file("fomod/ModuleConfig.xml")
        .with_file("Data/textures/a.dds")
        .with_file("notes.txt")
}

fn evaluate(rules: Vec<fomod_lint_core::RuleBox>) -> Report {
    Validator::builder()
        .rules(rules)
        .build()
        .evaluate(&installer(), &probe())
}

#[test]
fn recommended_catalog_report() {
    let report = evaluate(recommended_rules());

    assert!(report.failures.is_empty());
    assert_eq!(report.count_by_severity(), (4, 2));
    insta::assert_snapshot!(report.render_plain(), @r"
    Repeated Elements
    Lines: 3, 4
    The tag moduleName has several occurrences, this may produce unexpected results.

    Missing Source Files
    Lines: 7
    The source file(s) under the tag file weren't found inside the package. The installers ignore this so be sure to fix it.

    Missing Images
    Lines: 13
    The image(s) under the tag image weren't found inside the package. The installers will show no image instead.

    Mismatched Flag Labels
    Lines: 12
    The flag(s) required under the tag flagDependency are never set by any plugin. These conditions can never be met.

    Mismatched Flag Values
    Lines: 11, 12
    The flag value(s) required under the tag flagDependency are never assigned by any plugin. These conditions can never be met.

    Empty Source Fields
    Lines: 8
    The source field(s) under the tag file are empty. Depending on the installer this may install the whole package or nothing at all.
    ");
}

#[test]
fn strict_catalog_adds_unused_files() {
    let report = evaluate(strict_rules());
    let last = report.groups.last().expect("unused files group");

    assert_eq!(last.code, "FM009");
    assert_eq!(last.severity, Severity::Advisory);
    assert_eq!(last.notes, vec!["notes.txt"]);
}

#[test]
fn repeated_runs_are_identical() {
    assert_eq!(evaluate(strict_rules()), evaluate(strict_rules()));
}
