//! # fomod-lint-core
//!
//! Core framework for linting FOMOD mod-installer packages.
//!
//! This crate provides the foundational traits and types for checking an
//! installer configuration (`fomod/ModuleConfig.xml`) against the package it
//! ships with. It includes:
//!
//! - [`Element`], the owned, line-annotated configuration tree
//! - [`Package`] for locating and parsing a package
//! - [`FilesystemProbe`] for package-relative existence checks
//! - [`Rule`] trait for tag-scoped lint rules
//! - [`Validator`] for orchestrating rule evaluation
//! - [`Report`] and [`FindingGroup`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use fomod_lint_core::Validator;
//!
//! let validator = Validator::builder()
//!     .rule(MyRule)
//!     .build();
//!
//! let report = validator.validate(Path::new("./MyMod"))?;
//! print!("{}", report.render_plain());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aggregate;
mod config;
mod context;
mod element;
mod package;
mod probe;
mod rule;
mod types;
mod validator;

/// Data-only rules declared in configuration files.
pub mod declarative;

pub use aggregate::{aggregate, Violation};
pub use config::{find_config, Config, ConfigError, RuleConfig, CONFIG_CANDIDATES};
pub use context::RuleContext;
pub use element::{Descendants, Element};
pub use package::{parse_config, Package, PackageError, CONFIG_FILE, FOMOD_DIR, ROOT_TAG};
pub use probe::{normalize, DiskProbe, FilesystemProbe, MemoryProbe};
pub use rule::{render_template, Rule, RuleBox, RuleError, TAG_PLACEHOLDER};
pub use types::{Finding, FindingGroup, Report, RuleFailure, Severity, RULE_FAILURE_TITLE};
pub use validator::{ValidationError, Validator, ValidatorBuilder};
