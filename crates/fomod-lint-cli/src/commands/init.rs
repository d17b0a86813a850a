//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# fomod-lint configuration
# Place this file in the package root, next to the fomod folder.

# Rule preset: "recommended" (default), "strict" or "minimal"
preset = "recommended"

# Lowest severity that makes `fomod-lint check` exit with 1: "critical" or "advisory"
fail_on = "critical"

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.repeated-elements]
enabled = true
# severity = "critical"  # Override default severity

[rules.missing-images]
enabled = true

# Lists package files that nothing installs (off by default)
# [rules.unused-files]
# enabled = true
# ignore = ["*.txt", "screenshots/**"]

# Data-only rules
# [[custom-rules]]
# name = "missing-destination"
# code = "CU001"
# title = "Missing Destinations"
# tags = ["file", "folder"]
# check = { kind = "missing-attribute", attribute = "destination" }
# message = "The tag {} has no destination attribute."
# severity = "advisory"
"#;

/// Config file written by `init`.
const CONFIG_NAME: &str = "fomod-lint.toml";

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_NAME), force)?;

    println!("Created {CONFIG_NAME}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to configure rules");
    println!("  2. Run: fomod-lint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fomod_lint_core::Config;
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert!(config.custom_rules.is_empty());
        assert!(!config.is_rule_opted_in("unused-files"));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_NAME);
        std::fs::write(&path, "preset = \"strict\"\n").unwrap();

        assert!(write_config(&path, false).is_err());
        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
