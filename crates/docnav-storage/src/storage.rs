//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for abstracting file-system access,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # Path Convention
//!
//! All path parameters in Storage methods are **relative paths** using `/`
//! as the separator, resolved against the storage root:
//! - `""` - the documentation source directory itself
//! - `"index.md"` - a file at the root
//! - `"setup"` - a directory
//! - `"setup/install.md"` - a nested file
//!
//! Storage implementations handle the mapping to their internal format.

use std::fmt;
use std::path::PathBuf;

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// File or directory does not exist.
    NotFound,
    /// Path is absolute or escapes the documentation root.
    InvalidPath,
    /// Any other I/O failure (permissions, encoding, ...).
    Io,
}

/// Storage error carrying the offending path and the backend that raised it.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path the operation was attempted on.
    pub path: Option<PathBuf>,
    /// Backend identifier (`"Fs"`, `"Mock"`).
    pub backend: Option<&'static str>,
    source: Option<std::io::Error>,
}

impl StorageError {
    fn new(kind: StorageErrorKind, path: Option<PathBuf>) -> Self {
        Self {
            kind,
            path,
            backend: None,
            source: None,
        }
    }

    /// Nothing exists at `path`.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound, Some(path.into()))
    }

    /// `path` may not be resolved against the storage root.
    #[must_use]
    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::InvalidPath, Some(path.into()))
    }

    /// Wrap an I/O error; `NotFound` keeps its kind, everything else is [`StorageErrorKind::Io`].
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            _ => StorageErrorKind::Io,
        };
        Self {
            source: Some(err),
            ..Self::new(kind, path)
        }
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }
        match self.kind {
            StorageErrorKind::NotFound => f.write_str("not found")?,
            StorageErrorKind::InvalidPath => f.write_str("path escapes the documentation root")?,
            StorageErrorKind::Io => f.write_str("read failed")?,
        }
        if let Some(path) = &self.path {
            write!(f, ": {}", path.display())?;
        }
        if let Some(source) = &self.source {
            write!(f, " ({source})")?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// File-system abstraction used while parsing tables of contents and
/// building navigation.
///
/// All methods are blocking; construction of a navigation tree is a single
/// synchronous pass.
pub trait Storage: Send + Sync {
    /// Check whether a regular file exists at the relative path.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn file_exists(&self, path: &str) -> bool;

    /// Check whether a directory exists at the relative path.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn dir_exists(&self, path: &str) -> bool;

    /// Read the full text of a file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file doesn't exist or can't be read.
    fn read(&self, path: &str) -> Result<String, StorageError>;

    /// List the names of the regular files directly inside `dir`.
    ///
    /// Names are returned without the directory prefix, sorted by byte
    /// order. Hidden entries (leading `.`) are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory doesn't exist or can't be listed.
    fn list_files(&self, dir: &str) -> Result<Vec<String>, StorageError>;
}

/// Join two relative `/`-separated paths, ignoring empty components.
#[must_use]
pub fn join_path(parent: &str, child: &str) -> String {
    let parent = parent.trim_matches('/');
    let child = child.trim_matches('/');
    match (parent.is_empty(), child.is_empty()) {
        (true, _) => child.to_owned(),
        (false, true) => parent.to_owned(),
        (false, false) => format!("{parent}/{child}"),
    }
}

/// Directory part of a relative `/`-separated path (`""` at the root).
#[must_use]
pub fn parent_path(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(dir, _)| dir)
}
