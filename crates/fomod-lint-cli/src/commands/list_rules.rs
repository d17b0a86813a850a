//! List rules command implementation.

use fomod_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<25} {:<10} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(90));

    for rule in all_rules() {
        println!(
            "{:<8} {:<25} {:<10} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    println!("\nPresets:");
    println!("  recommended  - All rules except unused-files (default)");
    println!("  strict       - All rules, including unused-files");
    println!("  minimal      - Critical rules only (for gradual adoption)");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  fomod-lint check --rules missing-source-files,empty-installer");
    println!("  fomod-lint check --rules FM002,FM003,FM008");
    println!("\nCustom rules can be declared with [[custom-rules]] in fomod-lint.toml.");
}
