//! Configuration file lookup for the CLI.
//!
//! The first match wins:
//!
//! 1. `--config` flag (or `FOMOD_LINT_CONFIG`)
//! 2. `{package root}/fomod-lint.toml` or `.fomod-lint.toml`
//! 3. `config.toml` in the user directory (`$FOMOD_LINT_CONFIG_DIR` or `~/.fomod-lint/`)
//! 4. built-in defaults

use fomod_lint_core::find_config;
use std::path::{Path, PathBuf};

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line; not checked for existence.
    Explicit(PathBuf),
    /// Shipped alongside the package.
    Package(PathBuf),
    /// The user's config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the config file, unless defaults apply.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Package(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` for the user-directory config.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// File name inside the user config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Environment variable overriding the user config directory.
const CONFIG_DIR_VAR: &str = "FOMOD_LINT_CONFIG_DIR";

/// Finds the configuration for a package.
#[must_use]
pub fn resolve(package_root: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(package_root, explicit, global_config_dir().as_deref())
}

/// Lookup with the user directory passed in, so tests need no env vars.
fn resolve_in(
    package_root: &Path,
    explicit: Option<&Path>,
    global_dir: Option<&Path>,
) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Some(path) = find_config(package_root) {
        tracing::debug!("Found package config: {}", path.display());
        return ConfigSource::Package(path);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(path) if path.is_file() => {
            tracing::debug!("Found global config: {}", path.display());
            ConfigSource::Global(path)
        }
        _ => ConfigSource::Default,
    }
}

/// The user config directory: `$FOMOD_LINT_CONFIG_DIR`, else `~/.fomod-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_DIR_VAR) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|h| h.join(".fomod-lint")),
    }
}
