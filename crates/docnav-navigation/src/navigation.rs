//! Finished navigation and positional traversal.
//!
//! [`Navigation`] owns the item arena. Construction runs the positional
//! indexer: one pre-order walk assigning `navigation_index` (1-based,
//! contiguous) and building the `by_order` and `by_identity` tables.
//!
//! # Canonical Items
//!
//! A folder or table of contents shares the identity of its index page. The
//! node comes first in pre-order, so identity lookups and previous/next
//! results report the node rather than the page it is represented by.

use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::hash_map::Entry;

use serde::Serialize;

use docnav_toc::DiagnosticsSink;

use crate::item::{ItemKind, NavigationId, NavigationItem};

/// Navigation build error.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// No item of the documentation set could be built.
    #[error("Documentation set has no navigation items")]
    Empty,
}

/// Navigation item with children for UI tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Link target URL.
    pub url: String,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    /// Display title.
    pub title: String,
    /// Link target URL.
    pub url: String,
}

/// Immutable, indexed navigation tree.
///
/// Safe to share between threads; every accessor takes `&self`.
#[derive(Debug)]
pub struct Navigation {
    items: Vec<NavigationItem>,
    root: NavigationId,
    by_order: Vec<NavigationId>,
    by_identity: HashMap<String, NavigationId>,
}

impl Navigation {
    /// Index a finished arena rooted at `root`.
    ///
    /// Duplicate identities are reported to `sink` as warnings; the first
    /// occurrence in document order wins.
    pub(crate) fn new(
        mut items: Vec<NavigationItem>,
        root: NavigationId,
        sink: &mut dyn DiagnosticsSink,
    ) -> Self {
        let mut by_order = Vec::with_capacity(items.len());
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            by_order.push(id);
            let item = &mut items[id.0];
            item.navigation_index = by_order.len();
            if let ItemKind::Node(node) = &item.kind {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        debug_assert_eq!(by_order.len(), items.len(), "unreachable navigation items");

        let mut navigation = Self {
            items,
            root,
            by_order,
            by_identity: HashMap::new(),
        };
        navigation.by_identity = navigation.index_identities(sink);
        navigation
    }

    fn index_identities(&self, sink: &mut dyn DiagnosticsSink) -> HashMap<String, NavigationId> {
        let mut by_identity = HashMap::with_capacity(self.items.len());

        for &id in &self.by_order {
            let Some(identity) = self.items[id.0].identity() else {
                continue;
            };
            match by_identity.entry(identity.to_owned()) {
                Entry::Vacant(entry) => {
                    entry.insert(id);
                }
                Entry::Occupied(entry) => {
                    let first = *entry.get();
                    if self.heads(first, id) {
                        continue;
                    }
                    let (first, duplicate) = (self.get(first), self.get(id));
                    tracing::warn!(
                        identity,
                        first = first.url(),
                        duplicate = duplicate.url(),
                        "Duplicate navigation identity"
                    );
                    sink.emit_warning(
                        &duplicate.context,
                        format!(
                            "'{identity}' is included more than once, navigating to '{}' instead of '{}'",
                            first.url(),
                            duplicate.url()
                        ),
                    );
                }
            }
        }

        by_identity
    }

    /// True if `target` is reached from `node` by following index pages.
    fn heads(&self, node: NavigationId, target: NavigationId) -> bool {
        let mut current = node;
        loop {
            if current == target {
                return true;
            }
            match self.get(current).as_node() {
                Some(node) if node.index != current => current = node.index,
                _ => return false,
            }
        }
    }

    /// The documentation-set root.
    #[must_use]
    pub fn root(&self) -> &NavigationItem {
        self.get(self.root)
    }

    /// Item by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this navigation.
    #[must_use]
    pub fn get(&self, id: NavigationId) -> &NavigationItem {
        &self.items[id.0]
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a built navigation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in document order.
    pub fn iter(&self) -> impl Iterator<Item = &NavigationItem> {
        self.by_order.iter().map(|&id| self.get(id))
    }

    /// Item ids in document order; position `n` holds `navigation_index` `n + 1`.
    #[must_use]
    pub fn by_order(&self) -> &[NavigationId] {
        &self.by_order
    }

    /// Children of `id` in declaration order, empty for leaves.
    pub fn children(&self, id: NavigationId) -> impl Iterator<Item = &NavigationItem> {
        self.get(id)
            .as_node()
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&child| self.get(child))
    }

    /// Index page of `id` (a leaf is its own index).
    #[must_use]
    pub fn index(&self, id: NavigationId) -> &NavigationItem {
        let item = self.get(id);
        item.as_node().map_or(item, |node| self.get(node.index))
    }

    /// Parent of `id`, `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NavigationId) -> Option<&NavigationItem> {
        self.get(id).parent.map(|parent| self.get(parent))
    }

    /// Nearest root of `id`: the enclosing table of contents or the
    /// documentation set. A root is its own table of contents.
    #[must_use]
    pub fn table_of_contents(&self, id: NavigationId) -> &NavigationItem {
        self.get(self.get(id).path_prefix_source)
    }

    /// URL prefix `id` resolves against.
    #[must_use]
    pub fn path_prefix(&self, id: NavigationId) -> &str {
        self.table_of_contents(id)
            .as_node()
            .and_then(|node| node.prefix.as_ref())
            .map_or("/", |prefix| prefix.as_str())
    }

    /// Canonical item for `identity`, `None` if it was never indexed.
    #[must_use]
    pub fn lookup(&self, identity: &str) -> Option<&NavigationItem> {
        self.by_identity.get(identity).map(|&id| self.get(id))
    }

    /// Canonical item for `identity`.
    ///
    /// # Panics
    ///
    /// Panics if `identity` was never indexed. Every page built into the
    /// navigation is indexed, so this signals a caller bug.
    #[must_use]
    pub fn current(&self, identity: &str) -> &NavigationItem {
        self.lookup(identity)
            .unwrap_or_else(|| panic!("navigation item '{identity}' is not indexed"))
    }

    /// Previous visible item before `identity` in document order.
    ///
    /// # Panics
    ///
    /// Panics if `identity` was never indexed.
    #[must_use]
    pub fn previous(&self, identity: &str) -> Option<&NavigationItem> {
        self.previous_of(self.current(identity).id)
    }

    /// Next visible item after `identity` in document order.
    ///
    /// # Panics
    ///
    /// Panics if `identity` was never indexed.
    #[must_use]
    pub fn next(&self, identity: &str) -> Option<&NavigationItem> {
        self.next_of(self.current(identity).id)
    }

    /// Ancestors of `identity`, nearest first, de-duplicated by URL.
    ///
    /// # Panics
    ///
    /// Panics if `identity` was never indexed.
    #[must_use]
    pub fn parents(&self, identity: &str) -> Vec<&NavigationItem> {
        self.parents_of(self.current(identity).id)
    }

    /// Previous visible item before `id`.
    ///
    /// Hidden items and items sharing the URL of `id` are skipped.
    #[must_use]
    pub fn previous_of(&self, id: NavigationId) -> Option<&NavigationItem> {
        let current = self.get(id);
        let position = current.navigation_index - 1;
        self.step(current, self.by_order[..position].iter().rev())
    }

    /// Next visible item after `id`.
    ///
    /// Hidden items and items sharing the URL of `id` are skipped.
    #[must_use]
    pub fn next_of(&self, id: NavigationId) -> Option<&NavigationItem> {
        let current = self.get(id);
        let position = current.navigation_index - 1;
        self.step(current, self.by_order[position + 1..].iter())
    }

    fn step<'n>(
        &'n self,
        current: &NavigationItem,
        candidates: impl Iterator<Item = &'n NavigationId>,
    ) -> Option<&'n NavigationItem> {
        candidates
            .map(|&id| self.get(id))
            .filter(|item| !item.hidden && item.url != current.url)
            .filter_map(|item| self.canonical(item))
            .find(|item| item.id != current.id && item.url != current.url)
    }

    /// The item registered for the identity of `item`.
    ///
    /// That is `item` itself or the node it is the index page of. A repeated
    /// identity declared after its first occurrence has no canonical item.
    fn canonical<'n>(&'n self, item: &'n NavigationItem) -> Option<&'n NavigationItem> {
        let Some(&registered) = item
            .identity()
            .and_then(|identity| self.by_identity.get(identity))
        else {
            return Some(item);
        };
        self.heads(registered, item.id).then(|| self.get(registered))
    }

    /// Ancestors of `id`, nearest first.
    ///
    /// An ancestor sharing a URL with `id` or a nearer ancestor (a node and
    /// its index page) is listed once.
    #[must_use]
    pub fn parents_of(&self, id: NavigationId) -> Vec<&NavigationItem> {
        let item = self.get(id);
        let mut seen = HashSet::from([item.url.as_str()]);
        let mut parents = Vec::with_capacity(item.depth);

        let mut current = item.parent;
        while let Some(parent_id) = current {
            let parent = self.get(parent_id);
            if seen.insert(parent.url.as_str()) {
                parents.push(parent);
            }
            current = parent.parent;
        }

        parents
    }

    /// Breadcrumb trail for `identity`, root first, excluding the page itself.
    ///
    /// # Panics
    ///
    /// Panics if `identity` was never indexed.
    #[must_use]
    pub fn breadcrumbs(&self, identity: &str) -> Vec<Breadcrumb> {
        self.parents(identity)
            .into_iter()
            .rev()
            .map(|item| Breadcrumb {
                title: item.navigation_title.clone(),
                url: item.url.clone(),
            })
            .collect()
    }

    /// Visible navigation tree below the root.
    ///
    /// Hidden items are omitted, and so is a node's index page since the
    /// node already links to it.
    #[must_use]
    pub fn nav_tree(&self) -> Vec<NavItem> {
        self.nav_children(self.root)
    }

    fn nav_children(&self, id: NavigationId) -> Vec<NavItem> {
        let url = &self.get(id).url;
        self.children(id)
            .filter(|child| !child.hidden && child.url != *url)
            .map(|child| NavItem {
                title: child.navigation_title.clone(),
                url: child.url.clone(),
                children: self.nav_children(child.id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use docnav_storage::MockStorage;
    use docnav_toc::{DiagnosticsCollector, Severity, TocParser};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::builder::{BuildOptions, NavigationBuilder};
    use crate::factory::MarkdownFileFactory;

    static_assertions::assert_impl_all!(super::Navigation: Send, Sync);

    fn build(storage: &MockStorage, yaml: &str) -> (Navigation, DiagnosticsCollector) {
        let factory = MarkdownFileFactory::new(storage, "docs");
        let mut diagnostics = DiagnosticsCollector::new();
        let docset = TocParser::new(storage).parse_docset(yaml, &mut diagnostics);
        let navigation = NavigationBuilder::new(storage, &factory, BuildOptions::default())
            .build_docset(&docset, &mut diagnostics)
            .unwrap();
        (navigation, diagnostics)
    }

    fn sample() -> Navigation {
        let storage = MockStorage::new()
            .with_file("index.md", "# Home")
            .with_file("intro.md", "# Introduction")
            .with_file("secret.md", "# Secret")
            .with_file("setup/index.md", "# Setup")
            .with_file("setup/install.md", "# Install")
            .with_file("setup/upgrade.md", "# Upgrade")
            .with_file("faq.md", "# FAQ");
        let yaml = "toc:
  - file: index.md
  - file: intro.md
  - hidden: secret.md
  - folder: setup
    children:
      - file: index.md
      - file: install.md
      - file: upgrade.md
  - file: faq.md
  - crosslink: kibana://index.md
    title: Kibana
";
        build(&storage, yaml).0
    }

    fn urls<'n>(items: impl IntoIterator<Item = &'n NavigationItem>) -> Vec<&'n str> {
        items.into_iter().map(NavigationItem::url).collect()
    }

    #[test]
    fn test_indices_are_contiguous_pre_order() {
        let navigation = sample();

        let indices: Vec<usize> = navigation.iter().map(NavigationItem::navigation_index).collect();
        assert_eq!(indices, (1..=navigation.len()).collect::<Vec<_>>());
        assert_eq!(
            urls(navigation.iter()),
            vec![
                "/",
                "/",
                "/intro/",
                "/secret/",
                "/setup/",
                "/setup/",
                "/setup/install/",
                "/setup/upgrade/",
                "/faq/",
                "kibana://index.md",
            ]
        );
    }

    #[test]
    fn test_node_shares_index_url() {
        let navigation = sample();

        for item in navigation.iter() {
            assert_eq!(item.url(), navigation.index(item.id()).url());
        }
    }

    #[test]
    fn test_current_returns_canonical_node() {
        let navigation = sample();

        let setup = navigation.current("docs://setup/index.md");

        assert!(setup.as_node().is_some());
        assert_eq!(setup.navigation_title(), "Setup");
        assert_eq!(navigation.current("docs://index.md").id(), navigation.root().id());
    }

    #[test]
    fn test_lookup_unknown_identity() {
        let navigation = sample();

        assert!(navigation.lookup("docs://missing.md").is_none());
        assert!(navigation.lookup("kibana://index.md").is_none());
    }

    #[test]
    #[should_panic(expected = "is not indexed")]
    fn test_current_unknown_identity_panics() {
        let navigation = sample();

        let _ = navigation.current("docs://missing.md");
    }

    #[test]
    fn test_next_and_previous_skip_hidden_and_same_url() {
        let navigation = sample();

        assert_eq!(navigation.next("docs://index.md").map(NavigationItem::url), Some("/intro/"));
        assert_eq!(navigation.next("docs://intro.md").map(NavigationItem::url), Some("/setup/"));
        assert_eq!(
            navigation.next("docs://setup/index.md").map(NavigationItem::url),
            Some("/setup/install/")
        );
        assert_eq!(
            navigation.previous("docs://setup/install.md").map(NavigationItem::url),
            Some("/setup/")
        );
        assert_eq!(
            navigation.previous("docs://setup/index.md").map(NavigationItem::url),
            Some("/intro/")
        );
    }

    #[test]
    fn test_previous_of_index_page_reports_node() {
        let navigation = sample();

        let install = navigation.current("docs://setup/install.md");
        let previous = navigation.previous_of(install.id()).unwrap();

        assert!(previous.as_node().is_some());
        assert_eq!(previous.id(), navigation.current("docs://setup/index.md").id());
    }

    #[test]
    fn test_boundaries() {
        let navigation = sample();

        assert!(navigation.previous("docs://index.md").is_none());
        assert_eq!(
            navigation.next("docs://faq.md").map(NavigationItem::url),
            Some("kibana://index.md")
        );
        let last = navigation.by_order().last().copied().unwrap();
        assert!(navigation.next_of(last).is_none());
    }

    #[test]
    fn test_hidden_item_still_navigates() {
        let navigation = sample();

        let secret = navigation.current("docs://secret.md");

        assert!(secret.hidden());
        assert_eq!(navigation.previous_of(secret.id()).map(NavigationItem::url), Some("/intro/"));
        assert_eq!(navigation.next_of(secret.id()).map(NavigationItem::url), Some("/setup/"));
    }

    #[test]
    fn test_parents_nearest_first() {
        let navigation = sample();

        let parents = navigation.parents("docs://setup/install.md");

        assert_eq!(urls(parents), vec!["/setup/", "/"]);
    }

    #[test]
    fn test_parents_of_index_page_skip_own_node() {
        let navigation = sample();
        let setup = navigation.current("docs://setup/index.md");
        let index_page = navigation.index(setup.id());

        assert_ne!(index_page.id(), setup.id());
        assert_eq!(urls(navigation.parents_of(index_page.id())), vec!["/"]);
        assert!(navigation.parents_of(navigation.root().id()).is_empty());
    }

    #[test]
    fn test_breadcrumbs_root_first() {
        let navigation = sample();

        let breadcrumbs = navigation.breadcrumbs("docs://setup/upgrade.md");

        assert_eq!(
            breadcrumbs,
            vec![
                Breadcrumb {
                    title: "Home".to_owned(),
                    url: "/".to_owned(),
                },
                Breadcrumb {
                    title: "Setup".to_owned(),
                    url: "/setup/".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_nav_tree_excludes_hidden_and_index_pages() {
        let navigation = sample();

        let tree = navigation.nav_tree();

        let titles: Vec<&str> = tree.iter().map(|item| item.title.as_str()).collect();
        assert_eq!(titles, vec!["Introduction", "Setup", "FAQ", "Kibana"]);
        let setup: Vec<&str> = tree[1].children.iter().map(|item| item.url.as_str()).collect();
        assert_eq!(setup, vec!["/setup/install/", "/setup/upgrade/"]);
    }

    #[test]
    fn test_nav_tree_serialization() {
        let item = NavItem {
            title: "Setup".to_owned(),
            url: "/setup/".to_owned(),
            children: Vec::new(),
        };

        let json = serde_json::to_string(&item).unwrap();

        assert_eq!(json, r#"{"title":"Setup","url":"/setup/"}"#);
    }

    #[test]
    fn test_accessors() {
        let navigation = sample();
        let install = navigation.current("docs://setup/install.md");

        assert_eq!(navigation.parent(install.id()).map(NavigationItem::url), Some("/setup/"));
        assert_eq!(navigation.table_of_contents(install.id()).id(), navigation.root().id());
        assert_eq!(navigation.path_prefix(install.id()), "/");
        assert_eq!(install.depth(), 2);
        assert_eq!(install.navigation_root(), navigation.root().id());
        assert!(navigation.root().is_root());
        assert_eq!(navigation.children(install.id()).count(), 0);
    }

    #[test]
    fn test_duplicate_identity_first_wins() {
        let storage = MockStorage::new()
            .with_file("index.md", "# Home")
            .with_file("a.md", "# A")
            .with_file("b.md", "# B");
        let yaml = "toc:
  - file: index.md
  - file: a.md
  - file: b.md
    children:
      - file: a.md
";

        let (navigation, diagnostics) = build(&storage, yaml);

        assert_eq!(navigation.current("docs://a.md").url(), "/a/");
        assert_eq!(navigation.current("docs://a.md").depth(), 1);
        assert_eq!(diagnostics.count(Severity::Warning), 1);
    }

    #[test]
    fn test_duplicate_is_skipped_by_next_and_previous() {
        let storage = MockStorage::new()
            .with_file("index.md", "# Home")
            .with_file("a.md", "# A")
            .with_file("b.md", "# B")
            .with_file("c.md", "# C");
        let yaml = "toc:
  - file: index.md
  - file: a.md
  - file: b.md
    children:
      - file: a.md
  - file: c.md
";

        let (navigation, _) = build(&storage, yaml);

        let mut visited = HashSet::new();
        let mut walk = vec![navigation.root().url()];
        let mut current = navigation.root();
        while let Some(next) = navigation.next_of(current.id()) {
            assert!(visited.insert(next.id()), "revisited {}", next.url());
            walk.push(next.url());
            current = next;
        }

        assert_eq!(walk, vec!["/", "/a/", "/b/", "/c/"]);
        assert_eq!(navigation.next("docs://b.md").map(NavigationItem::url), Some("/c/"));
        assert_eq!(navigation.previous("docs://c.md").map(NavigationItem::url), Some("/b/"));
    }

    #[test]
    fn test_duplicate_warning_points_at_declaring_toc() {
        let storage = MockStorage::new()
            .with_file("index.md", "# Home")
            .with_file("guide/toc.yml", "toc:\n  - file: index.md\n  - file: intro.md\n")
            .with_file("guide/index.md", "# Guide")
            .with_file("guide/intro.md", "# Introduction");
        let yaml = "toc:
  - file: index.md
  - file: guide/intro.md
  - toc: guide
";

        let (navigation, diagnostics) = build(&storage, yaml);
        let warnings: Vec<_> = diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Warning)
            .map(|diagnostic| diagnostic.location.as_str())
            .collect();

        assert_eq!(warnings, vec!["guide/toc.yml"]);
        assert_eq!(navigation.current("docs://guide/intro.md").declared_in(), "docset.yml");
    }

    #[test]
    fn test_index_page_is_not_duplicate() {
        let navigation_diagnostics = build(
            &MockStorage::new()
                .with_file("index.md", "# Home")
                .with_file("setup/index.md", "# Setup"),
            "toc:\n  - file: index.md\n  - folder: setup\n",
        )
        .1;

        assert!(navigation_diagnostics.is_empty());
    }
}
