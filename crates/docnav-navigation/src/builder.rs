//! Navigation tree builder.
//!
//! Turns a parsed [`DocumentationSetFile`] into a [`Navigation`].
//!
//! # Forward References
//!
//! A node's children need the node's id before the node can be finished.
//! Each node first reserves an arena slot holding a [`Slot::Placeholder`]
//! carrying what its children need (depth, id and, for roots, the resolved
//! path prefix). Children are built against that id, then the finished node
//! overwrites the placeholder in the same slot. A node whose children all
//! failed to build is truncated away together with everything allocated
//! after it, so no placeholder survives into the finished arena.

use std::collections::BTreeMap;

use docnav_storage::Storage;
use docnav_toc::{
    CrossLinkRef, DOCSET_FILENAME, DiagnosticsSink, DocumentationSetFile, FileRef, FolderRef,
    TocItem, TocParser, TocRef,
};

use crate::factory::{DocumentationFile, DocumentationFileFactory};
use crate::item::{ItemKind, LeafItem, NavigationId, NavigationItem, NodeItem, NodeRole};
use crate::navigation::{Navigation, NavigationError};
use crate::prefix::{PathPrefix, resolve_url};

/// Options controlling URL and identity assignment.
#[derive(Clone, Debug)]
pub struct BuildOptions {
    /// Repository name, the scheme of every identity (`repo://path.md`).
    pub repository: String,
    /// URL prefix of the documentation set.
    pub path_prefix: String,
    /// Nested TOC identifier (`repo://path`) to the absolute prefix it is mounted at.
    pub mounts: BTreeMap<String, String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            repository: "docs".to_owned(),
            path_prefix: "/".to_owned(),
            mounts: BTreeMap::new(),
        }
    }
}

/// Arena slot: reserved for an unfinished node, or holding a finished item.
#[derive(Debug)]
enum Slot {
    Placeholder(Placeholder),
    Item(NavigationItem),
}

/// Stand-in for a node whose children are still being built.
#[derive(Debug)]
struct Placeholder {
    id: NavigationId,
    depth: usize,
    /// Resolved prefix, present when the node will be a root.
    prefix: Option<PathPrefix>,
    /// Docset-relative path of the file, folder or TOC being built.
    path: String,
}

impl Slot {
    /// The finished item.
    ///
    /// # Panics
    ///
    /// Panics if the slot still holds a placeholder.
    fn item(&self) -> &NavigationItem {
        match self {
            Self::Item(item) => item,
            Self::Placeholder(placeholder) => panic!(
                "navigation item {} ('{}') read before it was finished",
                placeholder.id.index(),
                placeholder.path
            ),
        }
    }

    fn into_item(self) -> NavigationItem {
        match self {
            Self::Item(item) => item,
            Self::Placeholder(placeholder) => panic!(
                "placeholder for '{}' leaked into the finished navigation",
                placeholder.path
            ),
        }
    }

    fn prefix(&self) -> Option<&PathPrefix> {
        match self {
            Self::Placeholder(placeholder) => placeholder.prefix.as_ref(),
            Self::Item(item) => item.as_node().and_then(NodeItem::path_prefix),
        }
    }
}

/// Position in the tree that children are built at.
#[derive(Clone, Copy)]
struct Frame<'f> {
    parent: NavigationId,
    depth: usize,
    root: NavigationId,
    prefix_source: NavigationId,
    /// Directory of the prefix source, URLs resolve relative to it.
    source_dir: &'f str,
}

/// Fields shared by every item created at a frame.
struct Common {
    url: String,
    navigation_title: String,
    hidden: bool,
    identity: Option<String>,
    /// YAML file that declared the item.
    context: String,
}

/// Builds a [`Navigation`] from a documentation set.
///
/// # Example
///
/// ```ignore
/// use docnav_navigation::{BuildOptions, MarkdownFileFactory, NavigationBuilder};
/// use docnav_toc::DiagnosticsCollector;
///
/// let factory = MarkdownFileFactory::new(&storage, "docs");
/// let mut diagnostics = DiagnosticsCollector::new();
/// let navigation = NavigationBuilder::new(&storage, &factory, BuildOptions::default())
///     .build(&mut diagnostics)?;
/// ```
pub struct NavigationBuilder<'a> {
    parser: TocParser<'a>,
    factory: &'a dyn DocumentationFileFactory,
    options: BuildOptions,
    slots: Vec<Slot>,
}

impl<'a> NavigationBuilder<'a> {
    /// Create a builder reading TOC files from `storage`.
    #[must_use]
    pub fn new(
        storage: &'a dyn Storage,
        factory: &'a dyn DocumentationFileFactory,
        options: BuildOptions,
    ) -> Self {
        Self {
            parser: TocParser::new(storage),
            factory,
            options,
            slots: Vec::new(),
        }
    }

    /// Load `docset.yml` and build the navigation.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::Empty`] if no item could be built.
    pub fn build(self, sink: &mut dyn DiagnosticsSink) -> Result<Navigation, NavigationError> {
        let docset = self.parser.load_docset(sink);
        self.build_docset(&docset, sink)
    }

    /// Build the navigation for an already parsed documentation set.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::Empty`] if no item could be built.
    pub fn build_docset(
        mut self,
        docset: &DocumentationSetFile,
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<Navigation, NavigationError> {
        let prefix = PathPrefix::new(&self.options.path_prefix);
        let root = self.reserve(0, Some(prefix), String::new());
        let frame = Frame {
            parent: root,
            depth: 1,
            root,
            prefix_source: root,
            source_dir: "",
        };

        let children = self.build_items(&docset.toc, frame, sink);
        let Some(index) = self.pick_index(&children) else {
            sink.emit_error(
                DOCSET_FILENAME,
                "Documentation set has no navigation items".to_owned(),
            );
            return Err(NavigationError::Empty);
        };

        let index_item = self.item(index);
        let common = Common {
            url: index_item.url.clone(),
            navigation_title: docset
                .project
                .clone()
                .unwrap_or_else(|| index_item.navigation_title.clone()),
            hidden: false,
            identity: index_item.identity.clone(),
            context: DOCSET_FILENAME.to_owned(),
        };
        let prefix = self.take_prefix(root);
        let identifier = format!("{}://", self.options.repository);
        self.finish_node(
            root,
            None,
            root,
            root,
            common,
            NodeItem {
                children,
                index,
                role: NodeRole::DocumentationSet { identifier },
                prefix,
            },
        );

        let items: Vec<NavigationItem> = self.slots.into_iter().map(Slot::into_item).collect();
        tracing::info!(
            repository = %self.options.repository,
            items = items.len(),
            "Built navigation"
        );
        Ok(Navigation::new(items, root, sink))
    }

    fn build_items(
        &mut self,
        items: &[TocItem],
        frame: Frame<'_>,
        sink: &mut dyn DiagnosticsSink,
    ) -> Vec<NavigationId> {
        items
            .iter()
            .filter_map(|item| self.build_item(item, frame, sink))
            .collect()
    }

    fn build_item(
        &mut self,
        item: &TocItem,
        frame: Frame<'_>,
        sink: &mut dyn DiagnosticsSink,
    ) -> Option<NavigationId> {
        match item {
            TocItem::File(file) if file.children.is_empty() => self.build_file(file, frame, sink),
            TocItem::File(file) => self.build_virtual_file(file, frame, sink),
            TocItem::Folder(folder) => self.build_folder(folder, frame, sink),
            TocItem::CrossLink(link) => Some(self.build_cross_link(link, frame)),
            TocItem::Toc(toc) => self.build_toc(toc, frame, sink),
        }
    }

    fn build_file(
        &mut self,
        file: &FileRef,
        frame: Frame<'_>,
        sink: &mut dyn DiagnosticsSink,
    ) -> Option<NavigationId> {
        let model = self.create_model(file, sink)?;
        let id = self.next_id();
        let common = self.file_common(file, &model, frame);
        let leaf = ItemKind::Leaf(LeafItem::File {
            model,
            path: file.path.clone(),
        });
        self.slots.push(Slot::Item(new_item(id, frame, common, leaf)));
        Some(id)
    }

    fn build_virtual_file(
        &mut self,
        file: &FileRef,
        frame: Frame<'_>,
        sink: &mut dyn DiagnosticsSink,
    ) -> Option<NavigationId> {
        let model = self.create_model(file, sink)?;
        let id = self.reserve(frame.depth, None, file.path.clone());

        let children = self.build_items(&file.children, frame.child(id), sink);
        let common = self.file_common(file, &model, frame);

        if children.is_empty() {
            // A virtual file without children is still a page
            let leaf = ItemKind::Leaf(LeafItem::File {
                model,
                path: file.path.clone(),
            });
            self.slots[id.0] = Slot::Item(new_item(id, frame, common, leaf));
            return Some(id);
        }

        self.finish_node(
            id,
            Some(frame.parent),
            frame.root,
            frame.prefix_source,
            common,
            NodeItem {
                children,
                index: id,
                role: NodeRole::VirtualFile {
                    model,
                    path: file.path.clone(),
                },
                prefix: None,
            },
        );
        Some(id)
    }

    fn build_folder(
        &mut self,
        folder: &FolderRef,
        frame: Frame<'_>,
        sink: &mut dyn DiagnosticsSink,
    ) -> Option<NavigationId> {
        let id = self.reserve(frame.depth, None, folder.path.clone());

        let children = self.build_items(&folder.children, frame.child(id), sink);
        let Some(index) = self.pick_index(&children) else {
            self.truncate(id);
            sink.emit_error(
                &folder.context,
                format!("Folder '{}' has no navigation items", folder.path),
            );
            return None;
        };

        let common = self.node_common(index, folder.title.as_deref(), &folder.context);
        self.finish_node(
            id,
            Some(frame.parent),
            frame.root,
            frame.prefix_source,
            common,
            NodeItem {
                children,
                index,
                role: NodeRole::Folder {
                    path: folder.path.clone(),
                },
                prefix: None,
            },
        );
        Some(id)
    }

    fn build_cross_link(&mut self, link: &CrossLinkRef, frame: Frame<'_>) -> NavigationId {
        let id = self.next_id();
        let title = link.title.clone().unwrap_or_else(|| link.uri.clone());
        let common = Common {
            url: link.uri.clone(),
            navigation_title: title.clone(),
            hidden: link.hidden,
            identity: None,
            context: link.context.clone(),
        };
        let leaf = ItemKind::Leaf(LeafItem::CrossLink {
            uri: link.uri.clone(),
            title,
        });
        self.slots.push(Slot::Item(new_item(id, frame, common, leaf)));
        id
    }

    fn build_toc(
        &mut self,
        toc: &TocRef,
        frame: Frame<'_>,
        sink: &mut dyn DiagnosticsSink,
    ) -> Option<NavigationId> {
        let identifier = format!("{}://{}", self.options.repository, toc.path);
        let prefix = if let Some(mount) = self.options.mounts.get(&identifier) {
            tracing::debug!(toc = %identifier, prefix = %mount, "Mounting table of contents");
            PathPrefix::new(mount)
        } else {
            self.prefix_of(frame.prefix_source)
                .join(&toc.path_relative_to_container)
        };

        let id = self.reserve(frame.depth, Some(prefix), toc.path.clone());
        let Some(items) = self.parser.load_toc(toc, sink) else {
            self.truncate(id);
            return None;
        };

        let toc_frame = Frame {
            parent: id,
            depth: frame.depth + 1,
            root: frame.root,
            prefix_source: id,
            source_dir: &toc.path,
        };
        let mut children = self.build_items(&items, toc_frame, sink);
        children.extend(self.build_items(&toc.children, toc_frame, sink));

        let Some(index) = self.pick_index(&children) else {
            self.truncate(id);
            sink.emit_error(
                &toc.context,
                format!("Table of contents '{}' has no navigation items", toc.path),
            );
            return None;
        };

        tracing::debug!(toc = %identifier, items = children.len(), "Built table of contents");
        let common = self.node_common(index, None, &toc.context);
        let prefix = self.take_prefix(id);
        self.finish_node(
            id,
            Some(frame.parent),
            frame.root,
            id,
            common,
            NodeItem {
                children,
                index,
                role: NodeRole::TableOfContents {
                    path: toc.path.clone(),
                    identifier,
                },
                prefix,
            },
        );
        Some(id)
    }

    fn create_model(
        &self,
        file: &FileRef,
        sink: &mut dyn DiagnosticsSink,
    ) -> Option<DocumentationFile> {
        let model = self.factory.try_create(&file.path);
        if model.is_none() {
            sink.emit_error(
                &file.context,
                format!("Unable to create documentation file for '{}'", file.path),
            );
        }
        model
    }

    fn file_common(&self, file: &FileRef, model: &DocumentationFile, frame: Frame<'_>) -> Common {
        Common {
            url: self.resolve(frame, &file.path),
            navigation_title: file.title.clone().unwrap_or_else(|| model.title.clone()),
            hidden: file.hidden,
            identity: Some(model.identity.clone()),
            context: file.context.clone(),
        }
    }

    /// Node fields taken over from its index page.
    fn node_common(&self, index: NavigationId, title: Option<&str>, context: &str) -> Common {
        let index = self.item(index);
        Common {
            url: index.url.clone(),
            navigation_title: title.map_or_else(|| index.navigation_title.clone(), str::to_owned),
            hidden: false,
            identity: index.identity.clone(),
            context: context.to_owned(),
        }
    }

    /// URL of a docset-relative file path, resolved against the frame's root.
    fn resolve(&self, frame: Frame<'_>, path: &str) -> String {
        let relative = if frame.source_dir.is_empty() {
            path
        } else {
            path.strip_prefix(frame.source_dir)
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(path)
        };
        resolve_url(self.prefix_of(frame.prefix_source).as_str(), relative)
    }

    /// Index page among `children`: the first `index.md`, else the first child.
    fn pick_index(&self, children: &[NavigationId]) -> Option<NavigationId> {
        children
            .iter()
            .copied()
            .find(|&id| self.item(id).is_index_page())
            .or_else(|| children.first().copied())
    }

    fn next_id(&self) -> NavigationId {
        NavigationId(self.slots.len())
    }

    fn reserve(&mut self, depth: usize, prefix: Option<PathPrefix>, path: String) -> NavigationId {
        let id = self.next_id();
        self.slots.push(Slot::Placeholder(Placeholder {
            id,
            depth,
            prefix,
            path,
        }));
        id
    }

    /// Drop the slot `id` and everything allocated after it.
    fn truncate(&mut self, id: NavigationId) {
        self.slots.truncate(id.0);
    }

    fn item(&self, id: NavigationId) -> &NavigationItem {
        self.slots[id.0].item()
    }

    /// Prefix owned by the root in slot `source`.
    ///
    /// # Panics
    ///
    /// Panics if the slot is not a root.
    fn prefix_of(&self, source: NavigationId) -> &PathPrefix {
        self.slots[source.0].prefix().unwrap_or_else(|| {
            panic!(
                "navigation item {} does not own a path prefix",
                source.index()
            )
        })
    }

    fn take_prefix(&mut self, id: NavigationId) -> Option<PathPrefix> {
        match &mut self.slots[id.0] {
            Slot::Placeholder(placeholder) => placeholder.prefix.take(),
            Slot::Item(_) => None,
        }
    }

    /// Replace the placeholder in slot `id` with the finished node.
    fn finish_node(
        &mut self,
        id: NavigationId,
        parent: Option<NavigationId>,
        root: NavigationId,
        prefix_source: NavigationId,
        common: Common,
        node: NodeItem,
    ) {
        let Slot::Placeholder(placeholder) = &self.slots[id.0] else {
            panic!("navigation item {} finished twice", id.index());
        };
        let depth = placeholder.depth;

        self.slots[id.0] = Slot::Item(NavigationItem {
            id,
            url: common.url,
            navigation_title: common.navigation_title,
            hidden: common.hidden,
            navigation_index: 0,
            depth,
            identity: common.identity,
            context: common.context,
            parent,
            navigation_root: root,
            path_prefix_source: prefix_source,
            kind: ItemKind::Node(node),
        });
    }
}

/// Finished item created directly at `frame`, without a placeholder.
fn new_item(id: NavigationId, frame: Frame<'_>, common: Common, kind: ItemKind) -> NavigationItem {
    NavigationItem {
        id,
        url: common.url,
        navigation_title: common.navigation_title,
        hidden: common.hidden,
        navigation_index: 0,
        depth: frame.depth,
        identity: common.identity,
        context: common.context,
        parent: Some(frame.parent),
        navigation_root: frame.root,
        path_prefix_source: frame.prefix_source,
        kind,
    }
}

impl Frame<'_> {
    /// Frame for the children of the non-root node `id`.
    fn child(self, id: NavigationId) -> Self {
        Self {
            parent: id,
            depth: self.depth + 1,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use docnav_storage::MockStorage;
    use docnav_toc::{DiagnosticsCollector, Severity};
    use pretty_assertions::assert_eq;

    use super::*;

    fn factory(path: &str) -> Option<DocumentationFile> {
        Some(DocumentationFile {
            title: path.to_owned(),
            identity: format!("docs://{path}"),
            path: path.to_owned(),
        })
    }

    fn build(
        storage: &MockStorage,
        yaml: &str,
    ) -> (Result<Navigation, NavigationError>, DiagnosticsCollector) {
        build_with(storage, yaml, BuildOptions::default())
    }

    fn build_with(
        storage: &MockStorage,
        yaml: &str,
        options: BuildOptions,
    ) -> (Result<Navigation, NavigationError>, DiagnosticsCollector) {
        let mut diagnostics = DiagnosticsCollector::new();
        let docset = TocParser::new(storage).parse_docset(yaml, &mut diagnostics);
        let result = NavigationBuilder::new(storage, &factory, options)
            .build_docset(&docset, &mut diagnostics);
        (result, diagnostics)
    }

    #[test]
    #[should_panic(expected = "read before it was finished")]
    fn test_reading_placeholder_panics() {
        let slot = Slot::Placeholder(Placeholder {
            id: NavigationId(3),
            depth: 1,
            prefix: None,
            path: "setup".to_owned(),
        });

        let _ = slot.item();
    }

    #[test]
    fn test_placeholder_carries_root_prefix() {
        let slot = Slot::Placeholder(Placeholder {
            id: NavigationId(0),
            depth: 0,
            prefix: Some(PathPrefix::new("/docs")),
            path: String::new(),
        });

        assert_eq!(slot.prefix().map(PathPrefix::as_str), Some("/docs"));
    }

    #[test]
    fn test_children_point_at_finished_parent() {
        let storage = MockStorage::new()
            .with_file("index.md", "")
            .with_file("setup/index.md", "")
            .with_file("setup/install.md", "");
        let yaml = "toc:\n  - file: index.md\n  - folder: setup\n";

        let (navigation, _) = build(&storage, yaml);
        let navigation = navigation.unwrap();

        let setup = navigation.lookup("docs://setup/index.md").unwrap();
        assert!(setup.as_node().is_some());
        for child in navigation.children(setup.id()) {
            assert_eq!(child.parent(), Some(setup.id()));
            assert_eq!(child.depth(), setup.depth() + 1);
        }
    }

    #[test]
    fn test_empty_folder_is_truncated() {
        let storage = MockStorage::new()
            .with_file("index.md", "")
            .with_dir("empty")
            .with_file("after.md", "");
        let yaml = "toc:\n  - file: index.md\n  - folder: empty\n  - file: after.md\n";

        let (navigation, diagnostics) = build(&storage, yaml);
        let navigation = navigation.unwrap();

        assert_eq!(navigation.len(), 3);
        let urls: Vec<&str> = navigation
            .children(navigation.root().id())
            .map(NavigationItem::url)
            .collect();
        assert_eq!(urls, vec!["/", "/after/"]);
        assert_eq!(
            diagnostics.iter().map(|d| d.message.as_str()).collect::<Vec<_>>(),
            vec!["Folder 'empty' has no navigation items"]
        );
    }

    #[test]
    fn test_nested_empty_folder_truncates_descendants() {
        let storage = MockStorage::new()
            .with_file("index.md", "")
            .with_dir("outer/inner");
        let yaml = "toc:\n  - file: index.md\n  - folder: outer\n    children:\n      - folder: inner\n";

        let (navigation, diagnostics) = build(&storage, yaml);
        let navigation = navigation.unwrap();

        assert_eq!(navigation.len(), 2);
        assert_eq!(diagnostics.errors(), 2);
    }

    #[test]
    fn test_virtual_file_without_children_becomes_leaf() {
        let storage = MockStorage::new()
            .with_file("guide.md", "")
            .with_file("draft.md", "");
        let yaml = "toc:\n  - file: guide.md\n    children:\n      - file: draft.md\n";
        let without_drafts = |path: &str| (path != "draft.md").then(|| factory(path)).flatten();
        let mut diagnostics = DiagnosticsCollector::new();
        let docset = TocParser::new(&storage).parse_docset(yaml, &mut diagnostics);

        let navigation = NavigationBuilder::new(&storage, &without_drafts, BuildOptions::default())
            .build_docset(&docset, &mut diagnostics)
            .unwrap();

        let guide = navigation.current("docs://guide.md");
        assert!(guide.as_leaf().is_some());
        assert_eq!(guide.url(), "/guide/");
        assert_eq!(diagnostics.errors(), 1);
    }

    #[test]
    fn test_virtual_file_is_own_index() {
        let storage = MockStorage::new()
            .with_file("guide.md", "")
            .with_file("guide/one.md", "");
        let yaml = "toc:\n  - file: guide.md\n    children:\n      - file: guide/one.md\n";

        let (navigation, _) = build(&storage, yaml);
        let navigation = navigation.unwrap();

        let guide = navigation.current("docs://guide.md");
        let node = guide.as_node().unwrap();
        assert_eq!(node.index(), guide.id());
        assert!(matches!(node.role(), NodeRole::VirtualFile { .. }));
        assert_eq!(guide.url(), "/guide/");
        assert_eq!(navigation.current("docs://guide/one.md").url(), "/guide/one/");
    }

    #[test]
    fn test_factory_failure_drops_file() {
        let storage = MockStorage::new()
            .with_file("index.md", "")
            .with_file("skip.md", "");
        let yaml = "toc:\n  - file: index.md\n  - file: skip.md\n";
        let without_skipped = |path: &str| (path != "skip.md").then(|| factory(path)).flatten();
        let mut diagnostics = DiagnosticsCollector::new();
        let docset = TocParser::new(&storage).parse_docset(yaml, &mut diagnostics);

        let navigation = NavigationBuilder::new(&storage, &without_skipped, BuildOptions::default())
            .build_docset(&docset, &mut diagnostics)
            .unwrap();

        assert_eq!(navigation.len(), 2);
        assert!(navigation.lookup("docs://skip.md").is_none());
        assert_eq!(
            diagnostics.iter().next().map(|d| d.message.as_str()),
            Some("Unable to create documentation file for 'skip.md'")
        );
    }

    #[test]
    fn test_empty_documentation_set() {
        let storage = MockStorage::new();

        let (result, diagnostics) = build(&storage, "toc:\n  - file: missing.md\n");

        assert!(matches!(result, Err(NavigationError::Empty)));
        assert_eq!(diagnostics.count(Severity::Error), 2);
    }

    #[test]
    fn test_missing_toc_file_is_dropped() {
        let storage = MockStorage::new()
            .with_file("index.md", "")
            .with_dir("dev");
        let yaml = "toc:\n  - file: index.md\n  - toc: dev\n";

        let (navigation, diagnostics) = build(&storage, yaml);

        assert_eq!(navigation.unwrap().len(), 2);
        assert_eq!(diagnostics.errors(), 1);
    }

    #[test]
    fn test_project_names_root() {
        let storage = MockStorage::new().with_file("index.md", "");

        let (navigation, _) = build(&storage, "project: Elastic Docs\ntoc:\n  - file: index.md\n");
        let navigation = navigation.unwrap();

        assert_eq!(navigation.root().navigation_title(), "Elastic Docs");
        assert!(matches!(
            navigation.root().as_node().unwrap().role(),
            NodeRole::DocumentationSet { identifier } if identifier == "docs://"
        ));
    }

    #[test]
    fn test_mounted_toc_prefix() {
        let storage = MockStorage::new()
            .with_file("index.md", "")
            .with_file("dev/toc.yml", "toc:\n  - file: index.md\n  - file: tools.md\n")
            .with_file("dev/index.md", "")
            .with_file("dev/tools.md", "");
        let options = BuildOptions {
            path_prefix: "/docs".to_owned(),
            mounts: BTreeMap::from([("docs://dev".to_owned(), "/contribute".to_owned())]),
            ..BuildOptions::default()
        };

        let (navigation, diagnostics) =
            build_with(&storage, "toc:\n  - file: index.md\n  - toc: dev\n", options);
        let navigation = navigation.unwrap();

        assert!(diagnostics.is_empty());
        assert_eq!(navigation.current("docs://index.md").url(), "/docs/");
        assert_eq!(navigation.current("docs://dev/index.md").url(), "/contribute/");
        assert_eq!(navigation.current("docs://dev/tools.md").url(), "/contribute/tools/");
    }
}
