//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};

use crate::storage::{Storage, StorageError, parent_path};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores files in memory. Directories are implied by the files added
/// beneath them and can also be added explicitly with [`with_dir`](Self::with_dir).
///
/// # Example
///
/// ```ignore
/// use docnav_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("index.md", "# Home")
///     .with_file("setup/install.md", "# Install");
///
/// assert!(storage.dir_exists("setup"));
/// let content = storage.read("setup/install.md").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: BTreeMap<String, String>,
    dirs: BTreeSet<String>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content. Every ancestor directory is
    /// registered as well.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        let path: String = path.into();
        self.register_ancestors(&path);
        self.files.insert(path, content.into());
        self
    }

    /// Add an empty directory (and its ancestors).
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<String>) -> Self {
        let path: String = path.into();
        self.register_ancestors(&path);
        self.dirs.insert(path);
        self
    }

    fn register_ancestors(&mut self, path: &str) {
        let mut dir = parent_path(path);
        loop {
            self.dirs.insert(dir.to_owned());
            if dir.is_empty() {
                break;
            }
            dir = parent_path(dir);
        }
    }
}

impl Storage for MockStorage {
    fn file_exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn dir_exists(&self, path: &str) -> bool {
        self.dirs.contains(path)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn list_files(&self, dir: &str) -> Result<Vec<String>, StorageError> {
        if !self.dirs.contains(dir) {
            return Err(StorageError::not_found(dir).with_backend(BACKEND));
        }

        Ok(self
            .files
            .keys()
            .filter(|path| parent_path(path) == dir)
            .map(|path| path.rsplit('/').next().unwrap_or(path).to_owned())
            .filter(|name| !name.starts_with('.'))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::StorageErrorKind;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_mock_storage_is_send_sync() {
        assert_send_sync::<MockStorage>();
    }

    #[test]
    fn test_new_empty() {
        let storage = MockStorage::new();

        assert!(!storage.file_exists("index.md"));
        assert!(!storage.dir_exists(""));
    }

    #[test]
    fn test_with_file_registers_ancestors() {
        let storage = MockStorage::new().with_file("a/b/c.md", "# C");

        assert!(storage.file_exists("a/b/c.md"));
        assert!(storage.dir_exists("a/b"));
        assert!(storage.dir_exists("a"));
        assert!(storage.dir_exists(""));
        assert!(!storage.dir_exists("a/b/c.md"));
    }

    #[test]
    fn test_with_dir() {
        let storage = MockStorage::new().with_dir("empty/nested");

        assert!(storage.dir_exists("empty/nested"));
        assert!(storage.dir_exists("empty"));
        assert_eq!(storage.list_files("empty/nested").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_read() {
        let storage = MockStorage::new().with_file("guide.md", "# Guide");

        assert_eq!(storage.read("guide.md").unwrap(), "# Guide");
    }

    #[test]
    fn test_read_missing() {
        let storage = MockStorage::new();

        let err = storage.read("missing.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Mock"));
    }

    #[test]
    fn test_list_files_only_direct_children() {
        let storage = MockStorage::new()
            .with_file("setup/install.md", "")
            .with_file("setup/index.md", "")
            .with_file("setup/.draft.md", "")
            .with_file("setup/deep/nested.md", "");

        let files = storage.list_files("setup").unwrap();

        assert_eq!(files, vec!["index.md".to_owned(), "install.md".to_owned()]);
    }

    #[test]
    fn test_list_files_missing_dir() {
        let storage = MockStorage::new();

        assert!(storage.list_files("missing").is_err());
    }
}
