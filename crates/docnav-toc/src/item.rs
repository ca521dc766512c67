//! Typed table of contents entries.
//!
//! All paths are relative, `/`-separated and already resolved against the
//! documentation-set root by the parser.

/// Author-declared table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TocItem {
    /// A single markdown file, optionally with children (a virtual file).
    File(FileRef),
    /// A directory grouping files.
    Folder(FolderRef),
    /// A link into another repository's documentation.
    CrossLink(CrossLinkRef),
    /// A nested table of contents with its own `toc.yml`.
    Toc(TocRef),
}

impl TocItem {
    /// Path relative to the documentation-set root, or the URI for cross links.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::File(file) => &file.path,
            Self::Folder(folder) => &folder.path,
            Self::CrossLink(link) => &link.uri,
            Self::Toc(toc) => &toc.path,
        }
    }

    /// Author-provided title override.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::File(file) => file.title.as_deref(),
            Self::Folder(folder) => folder.title.as_deref(),
            Self::CrossLink(link) => link.title.as_deref(),
            Self::Toc(_) => None,
        }
    }

    /// True if the entry is excluded from sequential navigation.
    #[must_use]
    pub fn hidden(&self) -> bool {
        match self {
            Self::File(file) => file.hidden,
            Self::CrossLink(link) => link.hidden,
            Self::Folder(_) | Self::Toc(_) => false,
        }
    }

    /// Declared children in order.
    #[must_use]
    pub fn children(&self) -> &[TocItem] {
        match self {
            Self::File(file) => &file.children,
            Self::Folder(folder) => &folder.children,
            Self::Toc(toc) => &toc.children,
            Self::CrossLink(_) => &[],
        }
    }
}

/// Reference to a markdown file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRef {
    /// Path relative to the documentation-set root (e.g., `setup/install.md`).
    pub path: String,
    /// Path relative to the directory of the declaring `docset.yml`/`toc.yml`.
    pub path_relative_to_container: String,
    /// Navigation title override.
    pub title: Option<String>,
    /// Excluded from previous/next navigation.
    pub hidden: bool,
    /// Children; non-empty makes this a virtual file node.
    pub children: Vec<TocItem>,
    /// YAML file that declared this entry.
    pub context: String,
}

/// Reference to a folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderRef {
    /// Path relative to the documentation-set root.
    pub path: String,
    /// Path relative to the directory of the declaring `docset.yml`/`toc.yml`.
    pub path_relative_to_container: String,
    /// Navigation title override.
    pub title: Option<String>,
    /// True when no `children` were declared and members were discovered.
    pub implicit: bool,
    /// Children in order.
    pub children: Vec<TocItem>,
    /// YAML file that declared this entry.
    pub context: String,
}

/// Link to a page in another repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrossLinkRef {
    /// Target URI (e.g., `kibana://index.md`).
    pub uri: String,
    /// Navigation title; the URI is used when absent.
    pub title: Option<String>,
    /// Excluded from previous/next navigation.
    pub hidden: bool,
    /// YAML file that declared this entry.
    pub context: String,
}

/// Reference to a nested table of contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocRef {
    /// Directory relative to the documentation-set root.
    pub path: String,
    /// Directory relative to the declaring container.
    pub path_relative_to_container: String,
    /// Further nested tables of contents declared inline.
    pub children: Vec<TocItem>,
    /// YAML file that declared this entry.
    pub context: String,
}

/// Parsed `docset.yml`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentationSetFile {
    /// Project name.
    pub project: Option<String>,
    /// Top-level table of contents.
    pub toc: Vec<TocItem>,
}
