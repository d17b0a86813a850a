//! # fomod-lint
//!
//! Semantic linter for FOMOD mod installers.
//!
//! A FOMOD installer is a `fomod/ModuleConfig.xml` file shipped inside a mod
//! package. Schema validation catches malformed XML; this crate catches the
//! installers that are well-formed but broken: sources that don't exist,
//! flags that are never set, installers that install nothing.
//!
//! This is the main facade crate that re-exports core functionality and rules.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! let report = fomod_lint::validate("path/to/MyMod".as_ref())?;
//! print!("{}", report.render_plain());
//! ```
//!
//! Configuration is read from `fomod-lint.toml` in the package root when
//! present. See [`Config`] for the format.
//!
//! ## Custom Rule Sets
//!
//! ```rust,ignore
//! use fomod_lint::rules::{EmptyInstaller, MissingSourceFiles};
//! use fomod_lint::Validator;
//!
//! let validator = Validator::builder()
//!     .rule(EmptyInstaller::new())
//!     .rule(MissingSourceFiles::new())
//!     .build();
//! let report = validator.validate("path/to/MyMod".as_ref())?;
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use fomod_lint_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use fomod_lint_rules::*;
}

mod runner;

pub use runner::{validate, validate_with_config, validator};
