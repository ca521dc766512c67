//! Table of contents parsing for docnav.
//!
//! This crate provides:
//! - [`TocParser`]: reads `docset.yml` and nested `toc.yml` descriptions
//!   into a typed [`TocItem`] tree, validating referenced files and folders
//! - [`DiagnosticsSink`] / [`DiagnosticsCollector`]: non-fatal reporting of
//!   configuration problems
//!
//! Parsing never fails: malformed or missing entries are reported as
//! diagnostics and dropped, and the remaining entries keep their declared
//! order.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use docnav_storage::FsStorage;
//! use docnav_toc::{DiagnosticsCollector, TocParser};
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! let mut diagnostics = DiagnosticsCollector::new();
//! let docset = TocParser::new(&storage).load_docset(&mut diagnostics);
//!
//! for diagnostic in diagnostics.iter() {
//!     eprintln!("{diagnostic}");
//! }
//! ```

mod diagnostics;
mod discovery;
mod item;
mod parser;

pub use diagnostics::{Diagnostic, DiagnosticsCollector, DiagnosticsSink, Severity};
pub use item::{CrossLinkRef, DocumentationSetFile, FileRef, FolderRef, TocItem, TocRef};
pub use parser::{DOCSET_FILENAME, TOC_FILENAME, TocParser};
