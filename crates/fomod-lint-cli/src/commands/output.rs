//! Shared output formatting for lint reports.

use anyhow::Result;
use fomod_lint_core::{Report, Severity};
use std::fmt::Write;

use crate::OutputFormat;

/// Print a report in the specified format.
pub fn print(report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(report)),
        OutputFormat::Plain => print!("{}", report.render_plain()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Compact => print!("{}", render_compact(report)),
    }
    Ok(())
}

fn source_display(report: &Report) -> String {
    report
        .source
        .as_ref()
        .map_or_else(|| "<memory>".to_string(), |p| p.display().to_string())
}

fn render_text(report: &Report) -> String {
    let source = source_display(report);
    let (critical, advisory) = report.count_by_severity();
    let mut out = String::new();

    let _ = writeln!(out, "\x1b[1m{source}\x1b[0m\n");

    for group in &report.groups {
        let severity_indicator = match group.severity {
            Severity::Critical => "\x1b[31mcritical\x1b[0m",
            Severity::Advisory => "\x1b[33madvisory\x1b[0m",
        };

        let _ = writeln!(out, "{} {} at lines {}", group.code, group.title, group.lines_display());
        let _ = writeln!(out, "  {}: {}", severity_indicator, group.message);
        for note in &group.notes {
            let _ = writeln!(out, "  - {note}");
        }
        let _ = writeln!(out);
    }

    for failure in &report.failures {
        let line = failure.line.map(|l| format!(" at line {l}")).unwrap_or_default();
        let _ = writeln!(
            out,
            "{} {}{}\n  \x1b[35mrule failed\x1b[0m: {}\n",
            failure.code, failure.rule, line, failure.message
        );
    }

    let summary_color = if critical > 0 {
        "\x1b[31m"
    } else if advisory > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    let _ = writeln!(
        out,
        "{summary_color}Found {critical} critical and {advisory} advisory finding group(s)\x1b[0m"
    );
    if !report.failures.is_empty() {
        let _ = writeln!(out, "{} rule(s) failed to evaluate", report.failures.len());
    }
    out
}

fn render_compact(report: &Report) -> String {
    let source = source_display(report);
    let mut out = String::new();

    for group in &report.groups {
        for line in &group.lines {
            let _ = writeln!(
                out,
                "{source}:{line}: {} [{}] {}",
                group.severity, group.code, group.message
            );
        }
    }
    for failure in &report.failures {
        let _ = writeln!(
            out,
            "{source}:{}: error [{}] {}",
            failure.line.unwrap_or_default(),
            failure.code,
            failure.message
        );
    }
    out
}
