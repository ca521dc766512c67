//! Navigation tree construction and positional indexing.
//!
//! Converts a parsed table of contents into an identity-stable tree of
//! navigation items, assigns each item a URL and a document-order position,
//! and exposes the traversal used by every page render.
//!
//! # Pipeline
//!
//! ```text
//! docset.yml ──TocParser──▶ TocItem tree ──NavigationBuilder──▶ Navigation
//!                                                  │
//!                           DocumentationFileFactory (title, identity)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use docnav_navigation::{BuildOptions, MarkdownFileFactory, NavigationBuilder};
//! use docnav_storage::FsStorage;
//! use docnav_toc::DiagnosticsCollector;
//!
//! let storage = FsStorage::new("docs".into());
//! let factory = MarkdownFileFactory::new(&storage, "elastic-docs");
//! let mut diagnostics = DiagnosticsCollector::new();
//!
//! let navigation = NavigationBuilder::new(&storage, &factory, BuildOptions::default())
//!     .build(&mut diagnostics)?;
//!
//! let page = navigation.current("elastic-docs://setup/install.md");
//! let next = navigation.next("elastic-docs://setup/install.md");
//! ```

mod builder;
mod factory;
mod item;
mod navigation;
mod prefix;

pub use builder::{BuildOptions, NavigationBuilder};
pub use factory::{DocumentationFile, DocumentationFileFactory, MarkdownFileFactory};
pub use item::{ItemKind, LeafItem, NavigationId, NavigationItem, NodeItem, NodeRole};
pub use navigation::{Breadcrumb, NavItem, Navigation, NavigationError};
pub use prefix::{PathPrefix, compose_prefix, resolve_url};
