//! Rules to flag `folder` and `file` sources that don't exist in the package.
//!
//! # Rationale
//!
//! Mod managers skip copy instructions whose source is missing without
//! telling the user, so the mod installs incomplete.
//!
//! Blank sources are left to `empty-source-fields` and folder sources that
//! point at a file to `source-folder-is-file`, so a single problem is never
//! reported by two rules.

use crate::tags::{ATTR_SOURCE, FILE, FOLDER};
use fomod_lint_core::{Rule, RuleContext, RuleError, Severity};

/// Rule code for missing-source-folders.
pub const FOLDERS_CODE: &str = "FM002";

/// Rule name for missing-source-folders.
pub const FOLDERS_NAME: &str = "missing-source-folders";

/// Rule code for missing-source-files.
pub const FILES_CODE: &str = "FM003";

/// Rule name for missing-source-files.
pub const FILES_NAME: &str = "missing-source-files";

/// Rule code for source-folder-is-file.
pub const FOLDER_IS_FILE_CODE: &str = "FM010";

/// Rule name for source-folder-is-file.
pub const FOLDER_IS_FILE_NAME: &str = "source-folder-is-file";

/// Flags `folder` elements whose source directory is missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingSourceFolders;

impl MissingSourceFolders {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MissingSourceFolders {
    fn name(&self) -> &str {
        FOLDERS_NAME
    }

    fn code(&self) -> &str {
        FOLDERS_CODE
    }

    fn title(&self) -> &str {
        "Missing Source Folders"
    }

    fn description(&self) -> &str {
        "Flags folder sources that don't exist as directories in the package"
    }

    fn matched_tags(&self) -> Vec<&str> {
        vec![FOLDER]
    }

    fn message_template(&self) -> &str {
        "The source folder(s) under the tag {} weren't found inside the package. \
         The installers ignore this so be sure to fix it."
    }

    fn default_severity(&self) -> Severity {
        Severity::Critical
    }

    fn is_violation(&self, ctx: &RuleContext<'_>) -> Result<bool, RuleError> {
        Ok(ctx
            .element
            .non_blank_attribute(ATTR_SOURCE)
            .is_some_and(|source| {
                !ctx.probe.exists_as_dir(source) && !ctx.probe.exists_as_file(source)
            }))
    }
}

/// Flags `file` elements whose source file is missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingSourceFiles;

impl MissingSourceFiles {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MissingSourceFiles {
    fn name(&self) -> &str {
        FILES_NAME
    }

    fn code(&self) -> &str {
        FILES_CODE
    }

    fn title(&self) -> &str {
        "Missing Source Files"
    }

    fn description(&self) -> &str {
        "Flags file sources that don't exist as files in the package"
    }

    fn matched_tags(&self) -> Vec<&str> {
        vec![FILE]
    }

    fn message_template(&self) -> &str {
        "The source file(s) under the tag {} weren't found inside the package. \
         The installers ignore this so be sure to fix it."
    }

    fn default_severity(&self) -> Severity {
        Severity::Critical
    }

    fn is_violation(&self, ctx: &RuleContext<'_>) -> Result<bool, RuleError> {
        Ok(ctx
            .element
            .non_blank_attribute(ATTR_SOURCE)
            .is_some_and(|source| !ctx.probe.exists_as_file(source)))
    }
}

/// Flags `folder` elements whose source is a file.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceFolderIsFile;

impl SourceFolderIsFile {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for SourceFolderIsFile {
    fn name(&self) -> &str {
        FOLDER_IS_FILE_NAME
    }

    fn code(&self) -> &str {
        FOLDER_IS_FILE_CODE
    }

    fn title(&self) -> &str {
        "Source Folder is a File"
    }

    fn description(&self) -> &str {
        "Flags folder sources that are files in the package"
    }

    fn matched_tags(&self) -> Vec<&str> {
        vec![FOLDER]
    }

    fn message_template(&self) -> &str {
        "The source folder(s) under the tag {} are actually files. \
         Use a file tag to install them."
    }

    fn default_severity(&self) -> Severity {
        Severity::Critical
    }

    fn is_violation(&self, ctx: &RuleContext<'_>) -> Result<bool, RuleError> {
        Ok(ctx
            .element
            .non_blank_attribute(ATTR_SOURCE)
            .is_some_and(|source| ctx.probe.exists_as_file(source)))
    }
}
