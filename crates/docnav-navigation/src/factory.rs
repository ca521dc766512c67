//! Content models bound to navigation leaves.

use regex::Regex;

use docnav_storage::Storage;

/// Page metadata bound to a file leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentationFile {
    /// Page title.
    pub title: String,
    /// Cross-repository identity (`repo://relative/path.md`).
    pub identity: String,
    /// Path relative to the documentation-set root.
    pub path: String,
}

/// Creates content models for file references.
///
/// Invoked once per file reference while building. Returning `None` drops the
/// reference and the builder emits an error diagnostic.
pub trait DocumentationFileFactory {
    /// Create the content model for the docset-relative `path`.
    fn try_create(&self, path: &str) -> Option<DocumentationFile>;
}

impl<F> DocumentationFileFactory for F
where
    F: Fn(&str) -> Option<DocumentationFile>,
{
    fn try_create(&self, path: &str) -> Option<DocumentationFile> {
        self(path)
    }
}

/// Factory reading markdown files through [`Storage`].
///
/// The title is taken from the front matter `title:` field, then the first
/// `# ` heading, then the file name.
pub struct MarkdownFileFactory<'a> {
    storage: &'a dyn Storage,
    repository: String,
    h1_regex: Regex,
    title_regex: Regex,
}

impl<'a> MarkdownFileFactory<'a> {
    /// Create a factory assigning identities under `repository`.
    ///
    /// # Panics
    ///
    /// Panics if the internal title regexes fail to compile.
    /// This should never happen as the patterns are compile-time constants.
    #[must_use]
    pub fn new(storage: &'a dyn Storage, repository: impl Into<String>) -> Self {
        Self {
            storage,
            repository: repository.into(),
            h1_regex: Regex::new(r"(?m)^#\s+(.+)$").expect("invalid heading regex"),
            title_regex: Regex::new(r#"(?m)^title:\s*["']?(.+?)["']?\s*$"#)
                .expect("invalid front matter regex"),
        }
    }

    /// Repository name used as the identity scheme.
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    fn extract_title(&self, content: &str) -> Option<String> {
        if let Some(front_matter) = front_matter(content)
            && let Some(caps) = self.title_regex.captures(front_matter)
        {
            return Some(caps[1].trim().to_owned());
        }

        let body = content
            .strip_prefix("---")
            .and_then(|rest| rest.split_once("\n---"))
            .map_or(content, |(_, body)| body);
        let caps = self.h1_regex.captures(body)?;
        Some(caps[1].trim().to_owned())
    }
}

impl DocumentationFileFactory for MarkdownFileFactory<'_> {
    fn try_create(&self, path: &str) -> Option<DocumentationFile> {
        if !path.ends_with(".md") {
            tracing::debug!(path, "Skipping non-markdown file");
            return None;
        }

        let content = match self.storage.read(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path, error = %e, "Failed to read documentation file");
                return None;
            }
        };

        let title = self
            .extract_title(&content)
            .unwrap_or_else(|| title_from_path(path));

        Some(DocumentationFile {
            title,
            identity: format!("{}://{path}", self.repository),
            path: path.to_owned(),
        })
    }
}

/// YAML front matter between leading `---` fences.
fn front_matter(content: &str) -> Option<&str> {
    let rest = content.strip_prefix("---")?;
    let rest = rest.strip_prefix('\r').unwrap_or(rest).strip_prefix('\n')?;
    let (front_matter, _) = rest.split_once("\n---")?;
    Some(front_matter)
}

/// Title derived from the file name (`getting-started.md` -> `Getting Started`).
fn title_from_path(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    let stem = name.strip_suffix(".md").unwrap_or(name);

    let mut title = String::with_capacity(stem.len());
    for word in stem.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !title.is_empty() {
            title.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            title.extend(first.to_uppercase());
            title.push_str(chars.as_str());
        }
    }
    title
}
