//! Rule to list package files that no copy instruction installs.
//!
//! # Rationale
//!
//! Files shipped in the package but never referenced usually mean a typo in
//! a `source` path or a leftover from an older release.
//!
//! The rule is opt-in: packages often carry readmes and screenshots on
//! purpose. Those can be excluded with glob patterns:
//!
//! ```toml
//! [rules.unused-files]
//! enabled = true
//! ignore = ["*.txt", "screenshots/**"]
//! ```
//!
//! The `fomod` folder is never reported. Paths are compared
//! case-insensitively, matching how mod managers resolve them.

use crate::tags::{ATTR_SOURCE, CONFIG, FILE, FOLDER};
use fomod_lint_core::{
    normalize, Config, Element, Rule, RuleContext, RuleError, Severity, FOMOD_DIR,
};
use glob::Pattern;
use tracing::warn;

/// Rule code for unused-files.
pub const CODE: &str = "FM009";

/// Rule name for unused-files.
pub const NAME: &str = "unused-files";

/// Lists package files not covered by any `file` or `folder` source.
#[derive(Debug, Clone, Default)]
pub struct UnusedFiles {
    ignore: Vec<Pattern>,
}

impl UnusedFiles {
    /// Creates the rule without ignore patterns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds glob patterns for files that may stay unreferenced.
    ///
    /// Invalid patterns are logged and skipped.
    #[must_use]
    pub fn ignore<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            match Pattern::new(&pattern.to_lowercase()) {
                Ok(p) => self.ignore.push(p),
                Err(e) => warn!("Ignoring invalid unused-files pattern {pattern:?}: {e}"),
            }
        }
        self
    }

    /// Creates the rule with the `ignore` patterns from `[rules.unused-files]`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let patterns = config
            .rule(NAME)
            .map(|c| c.get_str_array("ignore"))
            .unwrap_or_default();
        Self::new().ignore(patterns)
    }

    /// Package files that are neither installed, ignored, nor installer data.
    fn unused(&self, ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        let sources = Sources::collect(ctx.root);
        let fomod_prefix = format!("{FOMOD_DIR}/");

        let files = ctx.probe.list_files()?;
        Ok(files
            .into_iter()
            .filter(|file| {
                let lower = normalize(file).to_lowercase();
                !lower.starts_with(&fomod_prefix)
                    && !sources.covers(&lower)
                    && !self.ignore.iter().any(|p| p.matches(&lower))
            })
            .collect())
    }
}

/// Lower-cased `file` and `folder` sources of one configuration.
struct Sources {
    files: Vec<String>,
    folders: Vec<String>,
}

impl Sources {
    fn collect(root: &Element) -> Self {
        let mut files = Vec::new();
        let mut folders = Vec::new();

        for element in root.find_all(&[FILE, FOLDER]) {
            // a blank folder source installs the whole package
            let source = element.attribute(ATTR_SOURCE).unwrap_or_default();
            let source = normalize(source).to_lowercase();
            if element.tag == FOLDER {
                folders.push(source);
            } else if !source.is_empty() {
                files.push(source);
            }
        }

        Self { files, folders }
    }

    fn covers(&self, file: &str) -> bool {
        self.files.iter().any(|f| f == file)
            || self.folders.iter().any(|dir| {
                dir.is_empty()
                    || file
                        .strip_prefix(dir.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            })
    }
}

impl Rule for UnusedFiles {
    fn name(&self) -> &str {
        NAME
    }

    fn code(&self) -> &str {
        CODE
    }

    fn title(&self) -> &str {
        "Unused Files"
    }

    fn description(&self) -> &str {
        "Lists package files that are never installed (opt-in)"
    }

    fn matched_tags(&self) -> Vec<&str> {
        vec![CONFIG]
    }

    fn message_template(&self) -> &str {
        "The files below are never installed by the tag {} or any of its children."
    }

    fn default_severity(&self) -> Severity {
        Severity::Advisory
    }

    fn is_violation(&self, ctx: &RuleContext<'_>) -> Result<bool, RuleError> {
        Ok(self.check(ctx)?.is_some())
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Option<Vec<String>>, RuleError> {
        if !ctx.is_root() {
            return Ok(None);
        }
        let unused = self.unused(ctx)?;
        Ok((!unused.is_empty()).then_some(unused))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::run;
    use fomod_lint_core::{FilesystemProbe, MemoryProbe, RULE_FAILURE_TITLE};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn tree() -> Element {
        Element::new("config").line(2).child(
            Element::new("requiredInstallFiles")
                .line(3)
                .child(Element::new("folder").attr("source", r"Data\Textures").line(4))
                .child(Element::new("file").attr("source", "Plugin.ESP").line(5)),
        )
    }

    fn probe() -> MemoryProbe {
        MemoryProbe::new()
            .with_file("fomod/ModuleConfig.xml")
            .with_file("fomod/info.xml")
            .with_file("Data/Textures/sky.dds")
            .with_file("Data/Meshes/rock.nif")
            .with_file("plugin.esp")
            .with_file("readme.txt")
    }

    #[test]
    fn lists_unreferenced_files_as_notes() {
        let report = run(UnusedFiles::new(), &tree(), &probe());
        assert_eq!(report.groups.len(), 1);

        let group = &report.groups[0];
        assert_eq!(group.title, "Unused Files");
        assert_eq!(group.lines, vec![2]);
        assert_eq!(group.notes, vec!["Data/Meshes/rock.nif", "readme.txt"]);
    }

    #[test]
    fn ignore_patterns_exclude_files() {
        let rule = UnusedFiles::new().ignore(["*.TXT", "data/meshes/**", "[bad"]);
        assert!(run(rule, &tree(), &probe()).is_clean());
    }

    #[test]
    fn blank_folder_source_covers_everything() {
        let root = Element::new("config")
            .line(1)
            .child(Element::new("folder").attr("source", "").line(2));
        assert!(run(UnusedFiles::new(), &root, &probe()).is_clean());
    }

    #[test]
    fn folder_prefix_must_end_at_a_separator() {
        let root = Element::new("config")
            .line(1)
            .child(Element::new("folder").attr("source", "Data").line(2));
        let probe = MemoryProbe::new().with_file("Database/x.txt");
        assert_eq!(run(UnusedFiles::new(), &root, &probe).groups[0].notes, vec!["Database/x.txt"]);
    }

    #[test]
    fn listing_failure_is_a_rule_failure() {
        let report = run(UnusedFiles::new(), &tree(), &MemoryProbe::new().failing_listing());
        assert!(report.groups.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].rule, NAME);
        assert!(report.render_plain().starts_with(RULE_FAILURE_TITLE));
    }

    /// Counts package walks.
    struct CountingProbe {
        inner: MemoryProbe,
        listings: AtomicUsize,
    }

    impl FilesystemProbe for CountingProbe {
        fn exists_as_file(&self, rel: &str) -> bool {
            self.inner.exists_as_file(rel)
        }
        fn exists_as_dir(&self, rel: &str) -> bool {
            self.inner.exists_as_dir(rel)
        }
        fn list_files(&self) -> std::io::Result<Vec<String>> {
            self.listings.fetch_add(1, Ordering::SeqCst);
            self.inner.list_files()
        }
    }

    #[test]
    fn package_is_walked_once_per_run() {
        let probe = CountingProbe {
            inner: probe(),
            listings: AtomicUsize::new(0),
        };
        let report = run(UnusedFiles::new(), &tree(), &probe);
        assert_eq!(report.groups[0].notes.len(), 2);
        assert_eq!(probe.listings.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reads_ignore_patterns_from_config() {
        let config = Config::parse(
            r#"
[rules.unused-files]
enabled = true
ignore = ["readme.txt", "data/meshes/*"]
"#,
        )
        .unwrap();
        assert!(run(UnusedFiles::from_config(&config), &tree(), &probe()).is_clean());
    }
}
