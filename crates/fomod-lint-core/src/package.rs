//! Package discovery and configuration loading.
//!
//! A package is a directory containing a `fomod` folder, which in turn holds
//! `ModuleConfig.xml`. Both names are matched case-insensitively, since
//! packages are usually authored on case-insensitive filesystems.

use crate::element::Element;

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Canonical name of the installer folder.
pub const FOMOD_DIR: &str = "fomod";

/// Canonical name of the installer configuration file.
pub const CONFIG_FILE: &str = "ModuleConfig.xml";

/// Tag of the configuration's root element.
pub const ROOT_TAG: &str = "config";

/// Errors that prevent a package from being validated at all.
#[derive(Debug, Error, Diagnostic)]
pub enum PackageError {
    /// The package path, its `fomod` folder or its config file is missing.
    #[error("{expected} not found in {}", path.display())]
    #[diagnostic(
        code(fomod_lint::package::not_found),
        help("point the validator at the package root, the folder that contains `fomod/ModuleConfig.xml`")
    )]
    NotFound {
        /// Path that was searched.
        path: PathBuf,
        /// What was expected there.
        expected: &'static str,
    },

    /// The configuration cannot be turned into an element tree.
    #[error("{} is malformed (line {line}): {message}", path.display())]
    #[diagnostic(
        code(fomod_lint::package::malformed),
        help("the file is not a well-formed installer configuration; fix the markup before checking for semantic problems")
    )]
    Malformed {
        /// Path to the configuration file.
        path: PathBuf,
        /// Line the parser stopped at.
        line: usize,
        /// Parser message.
        message: String,
    },

    /// IO error while inspecting the package.
    #[error("failed to read {}: {source}", path.display())]
    #[diagnostic(code(fomod_lint::package::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

impl PackageError {
    /// Returns `true` for syntax problems, the only case where a markup fix can help.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

/// A located installer package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    root: PathBuf,
    fomod_dir: PathBuf,
    config_path: PathBuf,
}

impl Package {
    /// Locates a package from its root, its `fomod` folder, or the config file itself.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::NotFound`] if the path, the `fomod` folder or the
    /// configuration file does not exist.
    pub fn locate(path: &Path) -> Result<Self, PackageError> {
        if !path.exists() {
            return Err(PackageError::NotFound {
                path: path.to_path_buf(),
                expected: "package",
            });
        }

        if path.is_file() {
            let fomod_dir = parent_or_self(path);
            let root = parent_or_self(&fomod_dir);
            return Ok(Self {
                root,
                fomod_dir,
                config_path: path.to_path_buf(),
            });
        }

        let (root, fomod_dir) = match find_entry(path, FOMOD_DIR, Path::is_dir)? {
            Some(dir) => (path.to_path_buf(), dir),
            None if is_named(path, FOMOD_DIR) => (parent_or_self(path), path.to_path_buf()),
            None => {
                return Err(PackageError::NotFound {
                    path: path.to_path_buf(),
                    expected: "fomod folder",
                })
            }
        };

        let config_path =
            find_entry(&fomod_dir, CONFIG_FILE, Path::is_file)?.ok_or_else(|| {
                PackageError::NotFound {
                    path: fomod_dir.clone(),
                    expected: "ModuleConfig.xml",
                }
            })?;

        debug!("Located package config at {}", config_path.display());

        Ok(Self {
            root,
            fomod_dir,
            config_path,
        })
    }

    /// Directory all `source` and `path` attributes are relative to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `fomod` folder.
    #[must_use]
    pub fn fomod_dir(&self) -> &Path {
        &self.fomod_dir
    }

    /// The configuration file.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads and parses the configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::Io`] if the file cannot be read and
    /// [`PackageError::Malformed`] if it is not a well-formed configuration.
    pub fn load(&self) -> Result<Element, PackageError> {
        let bytes = std::fs::read(&self.config_path).map_err(|e| PackageError::Io {
            path: self.config_path.clone(),
            source: e,
        })?;
        let text = decode(&bytes).ok_or_else(|| PackageError::Malformed {
            path: self.config_path.clone(),
            line: 1,
            message: "file is neither UTF-8 nor UTF-16 text".to_string(),
        })?;
        parse_config(&text, &self.config_path)
    }
}

/// Parses configuration text into an element tree.
///
/// # Errors
///
/// Returns [`PackageError::Malformed`] if the text is not well-formed XML or
/// its root element is not `config`.
pub fn parse_config(text: &str, path: &Path) -> Result<Element, PackageError> {
    let doc = roxmltree::Document::parse(text).map_err(|e| PackageError::Malformed {
        path: path.to_path_buf(),
        line: e.pos().row as usize,
        message: e.to_string(),
    })?;

    let root = doc.root_element();
    if root.tag_name().name() != ROOT_TAG {
        return Err(PackageError::Malformed {
            path: path.to_path_buf(),
            line: doc.text_pos_at(root.range().start).row as usize,
            message: format!(
                "root element is `{}`, expected `{ROOT_TAG}`",
                root.tag_name().name()
            ),
        });
    }

    Ok(convert(&doc, root))
}

fn convert(doc: &roxmltree::Document<'_>, node: roxmltree::Node<'_, '_>) -> Element {
    Element {
        tag: node.tag_name().name().to_string(),
        attributes: node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect(),
        text: node.text().map(String::from),
        children: node
            .children()
            .filter(roxmltree::Node::is_element)
            .map(|child| convert(doc, child))
            .collect(),
        line: Some(doc.text_pos_at(node.range().start).row as usize),
    }
}

/// Decodes UTF-8 (with or without BOM) and BOM-marked UTF-16 text.
fn decode(bytes: &[u8]) -> Option<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec()).ok(),
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        _ => String::from_utf8(bytes.to_vec()).ok(),
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}

/// Finds a directory entry by case-insensitive name; the first in sorted order wins.
fn find_entry(
    dir: &Path,
    name: &str,
    kind: fn(&Path) -> bool,
) -> Result<Option<PathBuf>, PackageError> {
    let entries = std::fs::read_dir(dir).map_err(|e| PackageError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| is_named(p, name) && kind(p))
        .collect();
    candidates.sort();

    Ok(candidates.into_iter().next())
}

fn is_named(path: &Path, name: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.eq_ignore_ascii_case(name))
}

fn parent_or_self(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| path.to_path_buf(), Path::to_path_buf)
}
