//! # fomod-lint-rules
//!
//! Built-in lint rules for fomod-lint.
//!
//! Each rule is a small type implementing [`Rule`]: the tags it looks at, a
//! title, a message template and a predicate. Rules that need the package
//! contents ask the [`FilesystemProbe`] handed to them, so every rule can be
//! tested against an in-memory tree and probe.
//!
//! ## Available Rules
//!
//! | Code | Name | Severity | Description |
//! |------|------|----------|-------------|
//! | FM001 | `repeated-elements` | advisory | Top-level tags that appear more than once |
//! | FM002 | `missing-source-folders` | critical | `folder` sources that aren't directories |
//! | FM003 | `missing-source-files` | critical | `file` sources that aren't files |
//! | FM004 | `missing-images` | advisory | `moduleImage`/`image` paths that aren't files |
//! | FM005 | `empty-installer` | critical | Installers with nothing to do |
//! | FM006 | `mismatched-flag-labels` | critical | Dependencies on flags that are never set |
//! | FM007 | `mismatched-flag-values` | critical | Dependencies on values never assigned |
//! | FM008 | `empty-source-fields` | critical | `folder`/`file` with an absent or blank source |
//! | FM009 | `unused-files` | advisory | Package files never installed (opt-in) |
//! | FM010 | `source-folder-is-file` | critical | `folder` sources that are files |
//!
//! ## Usage
//!
//! ```ignore
//! use fomod_lint_core::Validator;
//! use fomod_lint_rules::{MissingSourceFiles, RepeatedElements};
//!
//! let validator = Validator::builder()
//!     .rule(RepeatedElements::new())
//!     .rule(MissingSourceFiles::new())
//!     .build();
//! let report = validator.validate("path/to/package".as_ref())?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod empty_installer;
mod empty_source_fields;
mod flag_mismatch;
mod missing_images;
mod missing_sources;
mod presets;
mod repeated_elements;
pub mod tags;
mod unused_files;

#[cfg(test)]
mod testing;

pub use empty_installer::EmptyInstaller;
pub use empty_source_fields::EmptySourceFields;
pub use flag_mismatch::{MismatchedFlagLabels, MismatchedFlagValues};
pub use missing_images::MissingImages;
pub use missing_sources::{MissingSourceFiles, MissingSourceFolders, SourceFolderIsFile};
pub use presets::{
    all_rules, minimal_rules, recommended_rules, rules_for_config, strict_rules, Preset,
};
pub use repeated_elements::RepeatedElements;
pub use unused_files::UnusedFiles;

/// Re-export core types for convenience.
pub use fomod_lint_core::{FilesystemProbe, Rule, Severity};
