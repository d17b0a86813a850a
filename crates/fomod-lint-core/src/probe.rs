//! Filesystem probes used by rules that reference package-relative paths.
//!
//! Rules never touch the filesystem directly; they ask a [`FilesystemProbe`]
//! instead, which keeps them testable against an in-memory [`MemoryProbe`].

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Existence checks relative to a package root.
///
/// Paths use `/` or `\` as separators. Any failure to inspect a path
/// (permission denied, broken link) is reported as "does not exist".
pub trait FilesystemProbe: Send + Sync {
    /// Returns `true` if `rel` is an existing regular file.
    fn exists_as_file(&self, rel: &str) -> bool;

    /// Returns `true` if `rel` is an existing directory.
    fn exists_as_dir(&self, rel: &str) -> bool;

    /// Returns `true` if `rel` exists as either a file or a directory.
    fn exists(&self, rel: &str) -> bool {
        self.exists_as_file(rel) || self.exists_as_dir(rel)
    }

    /// Lists every regular file in the package, as normalized relative paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the package cannot be walked.
    fn list_files(&self) -> std::io::Result<Vec<String>>;
}

/// Normalizes a package-relative path: `\` becomes `/`, empty and `.`
/// segments are dropped, and leading or trailing separators are removed.
#[must_use]
pub fn normalize(rel: &str) -> String {
    rel.replace('\\', "/")
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone)]
pub struct DiskProbe {
    root: PathBuf,
}

impl DiskProbe {
    /// Creates a probe rooted at the package root.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the package root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, rel: &str) -> PathBuf {
        let mut path = self.root.clone();
        for seg in normalize(rel).split('/').filter(|s| !s.is_empty()) {
            path.push(seg);
        }
        path
    }
}

impl FilesystemProbe for DiskProbe {
    fn exists_as_file(&self, rel: &str) -> bool {
        std::fs::metadata(self.resolve(rel)).is_ok_and(|m| m.is_file())
    }

    fn exists_as_dir(&self, rel: &str) -> bool {
        std::fs::metadata(self.resolve(rel)).is_ok_and(|m| m.is_dir())
    }

    fn list_files(&self) -> std::io::Result<Vec<String>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(&self.root) {
                files.push(normalize(&rel.to_string_lossy()));
            }
        }
        Ok(files)
    }
}

/// In-memory probe for tests and embedding.
///
/// Directories are implied by the files they contain and can also be
/// declared explicitly (to model empty folders).
#[derive(Debug, Clone, Default)]
pub struct MemoryProbe {
    files: BTreeSet<String>,
    dirs: BTreeSet<String>,
    fail_listing: bool,
}

impl MemoryProbe {
    /// Creates an empty probe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, implying all of its parent directories.
    #[must_use]
    pub fn with_file(mut self, rel: &str) -> Self {
        let rel = normalize(rel);
        let mut parent = rel.as_str();
        while let Some((dir, _)) = parent.rsplit_once('/') {
            self.dirs.insert(dir.to_string());
            parent = dir;
        }
        self.files.insert(rel);
        self
    }

    /// Adds a directory.
    #[must_use]
    pub fn with_dir(mut self, rel: &str) -> Self {
        self.dirs.insert(normalize(rel));
        self
    }

    /// Makes [`FilesystemProbe::list_files`] fail, to exercise error paths.
    #[must_use]
    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }
}

impl FilesystemProbe for MemoryProbe {
    fn exists_as_file(&self, rel: &str) -> bool {
        self.files.contains(&normalize(rel))
    }

    fn exists_as_dir(&self, rel: &str) -> bool {
        let rel = normalize(rel);
        rel.is_empty() || self.dirs.contains(&rel)
    }

    fn list_files(&self) -> std::io::Result<Vec<String>> {
        if self.fail_listing {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "listing disabled",
            ));
        }
        Ok(self.files.iter().cloned().collect())
    }
}
