//! Navigation item model.
//!
//! Items live in a flat arena owned by [`Navigation`](crate::Navigation) and
//! reference each other by [`NavigationId`]. `parent`, `navigation_root` and
//! `path_prefix_source` are lookup-only ids; children are listed by id under
//! their parent.

use crate::factory::DocumentationFile;
use crate::prefix::{PathPrefix, is_index_file};

/// Dense index of an item in the navigation arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NavigationId(pub(crate) usize);

impl NavigationId {
    /// Position in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A finished navigation item.
#[derive(Clone, Debug)]
pub struct NavigationItem {
    pub(crate) id: NavigationId,
    pub(crate) url: String,
    pub(crate) navigation_title: String,
    pub(crate) hidden: bool,
    pub(crate) navigation_index: usize,
    pub(crate) depth: usize,
    pub(crate) identity: Option<String>,
    pub(crate) context: String,
    pub(crate) parent: Option<NavigationId>,
    pub(crate) navigation_root: NavigationId,
    pub(crate) path_prefix_source: NavigationId,
    pub(crate) kind: ItemKind,
}

impl NavigationItem {
    /// Arena id of this item.
    #[must_use]
    pub fn id(&self) -> NavigationId {
        self.id
    }

    /// Directory-style URL (ends in `/`), or the URI for cross links.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Title shown in navigation.
    #[must_use]
    pub fn navigation_title(&self) -> &str {
        &self.navigation_title
    }

    /// Excluded from previous/next navigation and the navigation tree.
    #[must_use]
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    /// 1-based position in document order.
    #[must_use]
    pub fn navigation_index(&self) -> usize {
        self.navigation_index
    }

    /// Distance from the documentation-set root (the root has depth 0).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Cross-repository identity (`repo://path.md`).
    ///
    /// Nodes share the identity of their index page. Cross links have none.
    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// YAML file that declared this item (`docset.yml` for the root).
    #[must_use]
    pub fn declared_in(&self) -> &str {
        &self.context
    }

    /// Parent node, `None` for the documentation-set root.
    #[must_use]
    pub fn parent(&self) -> Option<NavigationId> {
        self.parent
    }

    /// The documentation-set root.
    #[must_use]
    pub fn navigation_root(&self) -> NavigationId {
        self.navigation_root
    }

    /// Nearest root owning a path prefix (this item itself for roots).
    #[must_use]
    pub fn path_prefix_source(&self) -> NavigationId {
        self.path_prefix_source
    }

    /// Leaf or node payload.
    #[must_use]
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Node payload, `None` for leaves.
    #[must_use]
    pub fn as_node(&self) -> Option<&NodeItem> {
        match &self.kind {
            ItemKind::Node(node) => Some(node),
            ItemKind::Leaf(_) => None,
        }
    }

    /// Leaf payload, `None` for nodes.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&LeafItem> {
        match &self.kind {
            ItemKind::Leaf(leaf) => Some(leaf),
            ItemKind::Node(_) => None,
        }
    }

    /// Content model of a file leaf or virtual file node.
    #[must_use]
    pub fn model(&self) -> Option<&DocumentationFile> {
        match &self.kind {
            ItemKind::Leaf(LeafItem::File { model, .. })
            | ItemKind::Node(NodeItem {
                role: NodeRole::VirtualFile { model, .. },
                ..
            }) => Some(model),
            _ => None,
        }
    }

    /// True for the documentation-set root and nested tables of contents.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.as_node().is_some_and(|node| node.prefix.is_some())
    }

    /// True for a file leaf named `index.md` in any case.
    pub(crate) fn is_index_page(&self) -> bool {
        matches!(
            &self.kind,
            ItemKind::Leaf(LeafItem::File { path, .. }) if is_index_file(path)
        )
    }
}

/// Leaf or node.
#[derive(Clone, Debug)]
pub enum ItemKind {
    /// Item without children.
    Leaf(LeafItem),
    /// Item with children and an index page.
    Node(NodeItem),
}

/// Leaf payload.
#[derive(Clone, Debug)]
pub enum LeafItem {
    /// A markdown page.
    File {
        /// Bound content model.
        model: DocumentationFile,
        /// Path relative to the documentation-set root.
        path: String,
    },
    /// A link into another repository.
    CrossLink {
        /// Target URI (`repo://path.md`).
        uri: String,
        /// Link title.
        title: String,
    },
}

/// Node payload.
#[derive(Clone, Debug)]
pub struct NodeItem {
    pub(crate) children: Vec<NavigationId>,
    pub(crate) index: NavigationId,
    pub(crate) role: NodeRole,
    pub(crate) prefix: Option<PathPrefix>,
}

impl NodeItem {
    /// Children in declaration order.
    #[must_use]
    pub fn children(&self) -> &[NavigationId] {
        &self.children
    }

    /// The page representing this node. Shares the node's URL.
    ///
    /// A virtual file node is its own index.
    #[must_use]
    pub fn index(&self) -> NavigationId {
        self.index
    }

    /// What this node was built from.
    #[must_use]
    pub fn role(&self) -> &NodeRole {
        &self.role
    }

    /// Own path prefix, present for roots only.
    #[must_use]
    pub fn path_prefix(&self) -> Option<&PathPrefix> {
        self.prefix.as_ref()
    }
}

/// Origin of a node.
#[derive(Clone, Debug)]
pub enum NodeRole {
    /// A file declaring children.
    VirtualFile {
        /// Bound content model.
        model: DocumentationFile,
        /// Path relative to the documentation-set root.
        path: String,
    },
    /// A folder.
    Folder {
        /// Path relative to the documentation-set root.
        path: String,
    },
    /// A nested table of contents (a root).
    TableOfContents {
        /// Directory relative to the documentation-set root.
        path: String,
        /// Mount key, `repo://path`.
        identifier: String,
    },
    /// The documentation set (the root of the tree).
    DocumentationSet {
        /// `repo://`.
        identifier: String,
    },
}
