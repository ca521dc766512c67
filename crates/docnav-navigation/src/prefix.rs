//! Path prefix composition and URL resolution.
//!
//! Roots (the documentation set and nested tables of contents) own a
//! [`PathPrefix`]. Every other item resolves its URL against the prefix of
//! its nearest root.

use std::fmt;

/// URL prefix owned by a navigation root (e.g., `/docs/guide`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathPrefix(String);

impl PathPrefix {
    /// Prefix of a top-level root, `/` when `value` is empty.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(compose_prefix("", value))
    }

    /// Prefix of a nested root below `self`.
    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        Self(compose_prefix(&self.0, segment))
    }

    /// The prefix as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve a root-relative file path to a URL under this prefix.
    #[must_use]
    pub fn resolve_url(&self, relative_path: &str) -> String {
        resolve_url(&self.0, relative_path)
    }
}

impl fmt::Display for PathPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compose a root prefix from its parent's prefix and its own relative segment.
///
/// Trailing slashes of `parent` are trimmed before appending. The result is
/// `/` when both are empty.
///
/// # Examples
///
/// ```
/// use docnav_navigation::compose_prefix;
///
/// assert_eq!(compose_prefix("/docs/", "guide"), "/docs/guide");
/// assert_eq!(compose_prefix("/", ""), "/");
/// ```
#[must_use]
pub fn compose_prefix(parent: &str, segment: &str) -> String {
    let base = parent.trim_end_matches('/');
    let segment = segment.trim_matches('/');

    match (base.is_empty(), segment.is_empty()) {
        (true, true) => "/".to_owned(),
        (false, true) => base.to_owned(),
        _ => format!("{base}/{segment}"),
    }
}

/// True if the file name of `path` is `index.md`, ignoring ASCII case.
pub(crate) fn is_index_file(path: &str) -> bool {
    let name = path.rsplit_once('/').map_or(path, |(_, name)| name);
    name.eq_ignore_ascii_case("index.md")
}

/// Resolve a markdown path relative to a root into a directory-style URL.
///
/// The `.md` extension is stripped and a trailing `index` segment (in any
/// case) is elided, so `setup/index.md` and `setup.md` both live at `<prefix>/setup/`.
///
/// # Examples
///
/// ```
/// use docnav_navigation::resolve_url;
///
/// assert_eq!(resolve_url("/docs", "setup/install.md"), "/docs/setup/install/");
/// assert_eq!(resolve_url("/docs", "setup/index.md"), "/docs/setup/");
/// assert_eq!(resolve_url("/", "index.md"), "/");
/// ```
#[must_use]
pub fn resolve_url(prefix: &str, relative_path: &str) -> String {
    let path = relative_path.trim_start_matches('/');
    let stem = path.strip_suffix(".md").unwrap_or(path);
    let stem = match stem.rsplit_once('/') {
        Some((dir, name)) if name.eq_ignore_ascii_case("index") => dir,
        None if stem.eq_ignore_ascii_case("index") => "",
        _ => stem,
    };

    let base = prefix.trim_end_matches('/');
    if stem.is_empty() {
        format!("{base}/")
    } else {
        format!("{base}/{stem}/")
    }
}
