//! File-system abstraction for the docnav navigation engine.
//!
//! This crate provides a [`Storage`] trait for the handful of file-system
//! operations the TOC parser and navigation builder need. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Multiple checkouts** where nested tables of contents live elsewhere
//! - **Clean separation** between navigation logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `file_exists()`, `dir_exists()`, `read()` and `list_files()`
//! - [`FsStorage`] implementation rooted at a documentation source directory
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use docnav_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! if storage.file_exists("docset.yml") {
//!     let yaml = storage.read("docset.yml")?;
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind, join_path, parent_path};
