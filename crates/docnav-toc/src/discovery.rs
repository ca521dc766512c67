//! Member discovery for implicit folders.
//!
//! A folder declared without `children` lists every markdown file directly
//! inside it: `index.md` first, then the remaining files alphabetically.
//! Names starting with `_` or `.` are partials and never become pages.

use glob::Pattern;

use docnav_storage::{Storage, StorageError};

/// Default pattern for files picked up by implicit folders.
pub(crate) const MARKDOWN_PATTERN: &str = "*.md";

/// Name of the page representing a folder.
const INDEX_FILE: &str = "index.md";

/// Compile the default discovery patterns.
///
/// # Panics
///
/// Panics if the internal glob pattern fails to compile.
/// This should never happen as the pattern is a compile-time constant.
pub(crate) fn default_patterns() -> Vec<Pattern> {
    vec![Pattern::new(MARKDOWN_PATTERN).expect("invalid glob pattern")]
}

/// True for names excluded from discovery (`_partial.md`, `.hidden.md`).
fn is_partial(name: &str) -> bool {
    name.starts_with(['_', '.'])
}

/// List file names in `dir` matching any of `patterns`, index page first.
pub(crate) fn discover_members(
    storage: &dyn Storage,
    dir: &str,
    patterns: &[Pattern],
) -> Result<Vec<String>, StorageError> {
    let mut names: Vec<String> = storage
        .list_files(dir)?
        .into_iter()
        .filter(|name| !is_partial(name) && patterns.iter().any(|p| p.matches(name)))
        .collect();

    names.sort_by_cached_key(|name| {
        let is_index = name.eq_ignore_ascii_case(INDEX_FILE);
        (!is_index, name.to_lowercase())
    });

    tracing::trace!(dir, count = names.len(), "Discovered implicit folder members");
    Ok(names)
}

#[cfg(test)]
mod tests {
    use docnav_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_index_first_then_alphabetical() {
        let storage = MockStorage::new()
            .with_file("setup/upgrade.md", "")
            .with_file("setup/Configure.md", "")
            .with_file("setup/index.md", "")
            .with_file("setup/install.md", "");

        let names = discover_members(&storage, "setup", &default_patterns()).unwrap();

        assert_eq!(
            names,
            vec!["index.md", "Configure.md", "install.md", "upgrade.md"]
        );
    }

    #[test]
    fn test_non_markdown_files_ignored() {
        let storage = MockStorage::new()
            .with_file("assets/logo.png", "")
            .with_file("assets/toc.yml", "")
            .with_file("assets/readme.md", "");

        let names = discover_members(&storage, "assets", &default_patterns()).unwrap();

        assert_eq!(names, vec!["readme.md"]);
    }

    #[test]
    fn test_partials_are_skipped() {
        let storage = MockStorage::new()
            .with_file("reference/index.md", "")
            .with_file("reference/_snippet.md", "")
            .with_file("reference/api.md", "");

        let names = discover_members(&storage, "reference", &default_patterns()).unwrap();

        assert_eq!(names, vec!["index.md", "api.md"]);
        assert!(is_partial(".draft.md"));
    }

    #[test]
    fn test_missing_directory_is_error() {
        let storage = MockStorage::new();

        assert!(discover_members(&storage, "missing", &default_patterns()).is_err());
    }
}
