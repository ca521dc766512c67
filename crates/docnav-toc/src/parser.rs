//! YAML table of contents parser.
//!
//! Reads `docset.yml` and nested `toc.yml` files into [`TocItem`] trees.
//! Every path is resolved against the current parent path and validated
//! through [`Storage`] before it is accepted.
//!
//! # Entry Shapes
//!
//! | Keys | Result |
//! |------|--------|
//! | `file` (+ `children`, `hidden: true`, `title`) | [`TocItem::File`] |
//! | `hidden` (path) | hidden [`TocItem::File`] |
//! | `folder` (+ `children`, `title`) | [`TocItem::Folder`] |
//! | `folder` + `file` | [`TocItem::Folder`] with the file as first child |
//! | `crosslink` (+ `title`, `hidden`) | [`TocItem::CrossLink`] |
//! | `toc` | [`TocItem::Toc`], read lazily from `<path>/toc.yml` |

use glob::Pattern;
use serde_yaml::{Mapping, Value};

use docnav_storage::{Storage, join_path, parent_path};

use crate::diagnostics::DiagnosticsSink;
use crate::discovery::{default_patterns, discover_members};
use crate::item::{CrossLinkRef, DocumentationSetFile, FileRef, FolderRef, TocItem, TocRef};

/// Documentation set description at the storage root.
pub const DOCSET_FILENAME: &str = "docset.yml";

/// Nested table of contents description inside a TOC directory.
pub const TOC_FILENAME: &str = "toc.yml";

/// Keys understood on a single entry.
const ENTRY_KEYS: &[&str] = &["file", "hidden", "folder", "crosslink", "toc", "title", "children"];

/// Keys understood at the top level of `docset.yml`.
const DOCSET_KEYS: &[&str] = &["project", "toc"];

/// Keys understood at the top level of `toc.yml`.
const TOC_KEYS: &[&str] = &["toc"];

/// Resolution context for a list of entries.
struct Scope<'s> {
    /// Directory entries resolve against (relative to the docset root).
    parent_path: &'s str,
    /// Directory of the enclosing docset or TOC.
    container_path: &'s str,
    /// YAML file being parsed, used as the diagnostic location.
    context: &'s str,
}

/// Entry fields after type checking, before path resolution.
#[derive(Default)]
struct RawEntry<'v> {
    file: Option<&'v str>,
    hidden_path: Option<&'v str>,
    hidden: bool,
    folder: Option<&'v str>,
    crosslink: Option<&'v str>,
    toc: Option<&'v str>,
    title: Option<&'v str>,
    children: Option<&'v [Value]>,
}

/// Parser for `docset.yml` and `toc.yml` descriptions.
pub struct TocParser<'a> {
    storage: &'a dyn Storage,
    patterns: Vec<Pattern>,
}

impl<'a> TocParser<'a> {
    /// Create a parser reading through `storage`.
    #[must_use]
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self {
            storage,
            patterns: default_patterns(),
        }
    }

    /// Storage this parser validates paths against.
    #[must_use]
    pub fn storage(&self) -> &'a dyn Storage {
        self.storage
    }

    /// Read and parse `docset.yml` from the storage root.
    ///
    /// A missing or unreadable file yields an error diagnostic and an empty
    /// documentation set.
    pub fn load_docset(&self, sink: &mut dyn DiagnosticsSink) -> DocumentationSetFile {
        match self.storage.read(DOCSET_FILENAME) {
            Ok(yaml) => self.parse_docset(&yaml, sink),
            Err(e) => {
                sink.emit_error(
                    DOCSET_FILENAME,
                    format!("Unable to read documentation set: {e}"),
                );
                DocumentationSetFile::default()
            }
        }
    }

    /// Parse `docset.yml` content.
    pub fn parse_docset(&self, yaml: &str, sink: &mut dyn DiagnosticsSink) -> DocumentationSetFile {
        let Some(mapping) = parse_document(yaml, DOCSET_FILENAME, sink) else {
            return DocumentationSetFile::default();
        };
        warn_unknown_keys(&mapping, DOCSET_KEYS, DOCSET_FILENAME, sink);

        let project = match mapping.get("project") {
            None | Some(Value::Null) => None,
            Some(Value::String(project)) => Some(project.clone()),
            Some(_) => {
                sink.emit_error(DOCSET_FILENAME, "'project' must be a string".to_owned());
                None
            }
        };

        if mapping.get("toc").is_none() {
            sink.emit_error(
                DOCSET_FILENAME,
                "Documentation set has no table of contents defined".to_owned(),
            );
        }
        let entries = sequence(mapping.get("toc"), "toc", DOCSET_FILENAME, sink);
        let scope = Scope {
            parent_path: "",
            container_path: "",
            context: DOCSET_FILENAME,
        };
        let toc = self.resolve_entries(entries, &scope, sink);

        tracing::debug!(
            project = project.as_deref().unwrap_or_default(),
            entries = toc.len(),
            "Parsed documentation set"
        );

        DocumentationSetFile { project, toc }
    }

    /// Read the `toc.yml` belonging to a nested table of contents.
    ///
    /// Returns `None` (after emitting an error) if the file is missing or
    /// unparsable.
    pub fn load_toc(&self, toc: &TocRef, sink: &mut dyn DiagnosticsSink) -> Option<Vec<TocItem>> {
        let file = join_path(&toc.path, TOC_FILENAME);
        if !self.storage.file_exists(&file) {
            sink.emit_error(
                &toc.context,
                format!("Table of contents file not found: {file}"),
            );
            return None;
        }

        let yaml = match self.storage.read(&file) {
            Ok(yaml) => yaml,
            Err(e) => {
                sink.emit_error(&file, format!("Unable to read table of contents: {e}"));
                return None;
            }
        };
        Some(self.parse_toc(&toc.path, &yaml, sink))
    }

    /// Parse `toc.yml` content for the TOC directory `toc_path`.
    pub fn parse_toc(
        &self,
        toc_path: &str,
        yaml: &str,
        sink: &mut dyn DiagnosticsSink,
    ) -> Vec<TocItem> {
        let file = join_path(toc_path, TOC_FILENAME);
        let Some(mapping) = parse_document(yaml, &file, sink) else {
            return Vec::new();
        };
        warn_unknown_keys(&mapping, TOC_KEYS, &file, sink);

        let entries = sequence(mapping.get("toc"), "toc", &file, sink);
        let scope = Scope {
            parent_path: toc_path,
            container_path: toc_path,
            context: &file,
        };
        let items = self.resolve_entries(entries, &scope, sink);
        tracing::debug!(toc = toc_path, entries = items.len(), "Parsed table of contents");
        items
    }

    fn resolve_entries(
        &self,
        values: &[Value],
        scope: &Scope<'_>,
        sink: &mut dyn DiagnosticsSink,
    ) -> Vec<TocItem> {
        values
            .iter()
            .filter_map(|value| self.resolve_entry(value, scope, sink))
            .collect()
    }

    fn resolve_entry(
        &self,
        value: &Value,
        scope: &Scope<'_>,
        sink: &mut dyn DiagnosticsSink,
    ) -> Option<TocItem> {
        let Value::Mapping(mapping) = value else {
            sink.emit_error(
                scope.context,
                format!(
                    "Table of contents entry must be a mapping, found {}",
                    describe(value)
                ),
            );
            return None;
        };
        warn_unknown_keys(mapping, ENTRY_KEYS, scope.context, sink);
        let entry = RawEntry::from_mapping(mapping, scope.context, sink)?;

        if let (Some(folder), Some(file)) = (entry.folder, entry.file) {
            return self.resolve_folder(folder, Some(file), &entry, scope, sink);
        }
        if let Some(file) = entry.file {
            return self.resolve_file(file, entry.hidden, &entry, scope, sink);
        }
        if let Some(file) = entry.hidden_path {
            return self.resolve_file(file, true, &entry, scope, sink);
        }
        if let Some(uri) = entry.crosslink {
            return resolve_cross_link(uri, &entry, scope, sink);
        }
        if let Some(folder) = entry.folder {
            return self.resolve_folder(folder, None, &entry, scope, sink);
        }
        if let Some(toc) = entry.toc {
            return self.resolve_toc(toc, &entry, scope, sink);
        }

        sink.emit_error(
            scope.context,
            "Table of contents entry needs one of 'file', 'hidden', 'folder', 'crosslink' or 'toc'"
                .to_owned(),
        );
        None
    }

    fn resolve_file(
        &self,
        declared: &str,
        hidden: bool,
        entry: &RawEntry<'_>,
        scope: &Scope<'_>,
        sink: &mut dyn DiagnosticsSink,
    ) -> Option<TocItem> {
        let path = join_path(scope.parent_path, declared);
        if !self.storage.file_exists(&path) {
            sink.emit_error(scope.context, format!("File not found: '{path}'"));
            return None;
        }

        let children = entry.children.unwrap_or_default();
        if declared.contains('/') && !children.is_empty() {
            sink.emit_hint(
                scope.context,
                format!(
                    "File '{declared}' uses deep-linking with children, consider declaring a 'folder' instead"
                ),
            );
        }

        // Top-level children resolve next to the file, nested ones keep the folder/TOC path
        let child_parent = if scope.parent_path.is_empty() {
            parent_path(&path).to_owned()
        } else {
            scope.parent_path.to_owned()
        };
        let child_scope = Scope {
            parent_path: &child_parent,
            container_path: scope.container_path,
            context: scope.context,
        };
        let children = self.resolve_entries(children, &child_scope, sink);

        Some(TocItem::File(FileRef {
            path_relative_to_container: relative_to(&path, scope.container_path),
            path,
            title: entry.title.map(str::to_owned),
            hidden,
            children,
            context: scope.context.to_owned(),
        }))
    }

    fn resolve_folder(
        &self,
        declared: &str,
        index_file: Option<&str>,
        entry: &RawEntry<'_>,
        scope: &Scope<'_>,
        sink: &mut dyn DiagnosticsSink,
    ) -> Option<TocItem> {
        let path = join_path(scope.parent_path, declared);
        if !self.storage.dir_exists(&path) {
            sink.emit_error(scope.context, format!("Folder not found: '{path}'"));
            return None;
        }

        let folder_scope = Scope {
            parent_path: &path,
            container_path: scope.container_path,
            context: scope.context,
        };
        let mut children = Vec::new();

        if let Some(file) = index_file {
            if file.contains('/') {
                sink.emit_error(
                    scope.context,
                    format!(
                        "Deep linking on folder 'file' is not supported, found '{file}' in folder '{path}'"
                    ),
                );
                return None;
            }
            check_index_file_name(&path, file, scope.context, sink);
            let index_entry = RawEntry::default();
            children.extend(self.resolve_file(file, false, &index_entry, &folder_scope, sink));
        }

        let implicit = entry.children.is_none() && index_file.is_none();
        if implicit {
            children.extend(self.discover(&folder_scope, sink));
        } else if let Some(declared_children) = entry.children {
            children.extend(self.resolve_entries(declared_children, &folder_scope, sink));
        }

        Some(TocItem::Folder(FolderRef {
            path_relative_to_container: relative_to(&path, scope.container_path),
            path,
            title: entry.title.map(str::to_owned),
            implicit,
            children,
            context: scope.context.to_owned(),
        }))
    }

    fn discover(&self, scope: &Scope<'_>, sink: &mut dyn DiagnosticsSink) -> Vec<TocItem> {
        let names = match discover_members(self.storage, scope.parent_path, &self.patterns) {
            Ok(names) => names,
            Err(e) => {
                sink.emit_error(
                    scope.context,
                    format!("Unable to list folder '{}': {e}", scope.parent_path),
                );
                return Vec::new();
            }
        };

        names
            .into_iter()
            .map(|name| {
                let path = join_path(scope.parent_path, &name);
                TocItem::File(FileRef {
                    path_relative_to_container: relative_to(&path, scope.container_path),
                    path,
                    title: None,
                    hidden: false,
                    children: Vec::new(),
                    context: scope.context.to_owned(),
                })
            })
            .collect()
    }

    fn resolve_toc(
        &self,
        declared: &str,
        entry: &RawEntry<'_>,
        scope: &Scope<'_>,
        sink: &mut dyn DiagnosticsSink,
    ) -> Option<TocItem> {
        // Paths with a slash are relative to the declaring YAML file, simple names to the parent
        let path = if declared.contains('/') {
            join_path(parent_path(scope.context), declared)
        } else {
            join_path(scope.parent_path, declared)
        };
        if !self.storage.dir_exists(&path) {
            sink.emit_error(
                scope.context,
                format!("Table of contents directory not found: '{path}'"),
            );
            return None;
        }

        let toc_scope = Scope {
            parent_path: &path,
            container_path: &path,
            context: scope.context,
        };
        let mut children = Vec::new();
        for child in entry.children.unwrap_or_default() {
            if is_toc_entry(child) {
                children.extend(self.resolve_entry(child, &toc_scope, sink));
            } else {
                sink.emit_error(
                    scope.context,
                    format!(
                        "Table of contents '{path}' may only declare nested 'toc' children, define other children in '{path}/{TOC_FILENAME}' instead"
                    ),
                );
            }
        }

        Some(TocItem::Toc(TocRef {
            path_relative_to_container: relative_to(&path, scope.container_path),
            path,
            children,
            context: scope.context.to_owned(),
        }))
    }
}

impl<'v> RawEntry<'v> {
    /// Type-check the known keys of an entry.
    ///
    /// Returns `None` (after emitting an error) when a key has the wrong type.
    fn from_mapping(
        mapping: &'v Mapping,
        context: &str,
        sink: &mut dyn DiagnosticsSink,
    ) -> Option<Self> {
        let mut entry = Self {
            file: string_field(mapping, "file", context, sink)?,
            folder: string_field(mapping, "folder", context, sink)?,
            crosslink: string_field(mapping, "crosslink", context, sink)?,
            toc: string_field(mapping, "toc", context, sink)?,
            title: string_field(mapping, "title", context, sink)?,
            ..Self::default()
        };

        match mapping.get("hidden") {
            None | Some(Value::Null) => {}
            Some(Value::String(path)) => {
                entry.hidden_path = Some(path.as_str());
                entry.hidden = true;
            }
            Some(Value::Bool(hidden)) => entry.hidden = *hidden,
            Some(other) => {
                sink.emit_error(
                    context,
                    format!(
                        "'hidden' must be a file path or a boolean, found {}",
                        describe(other)
                    ),
                );
                return None;
            }
        }

        entry.children = match mapping.get("children") {
            None => None,
            Some(value) => Some(sequence(Some(value), "children", context, sink)),
        };

        if entry.crosslink.is_some() && entry.children.is_some_and(|c| !c.is_empty()) {
            sink.emit_warning(
                context,
                "Cross links may not have children, they are ignored".to_owned(),
            );
        }

        Some(entry)
    }
}

/// Parse a YAML document that must be a mapping at the top level.
fn parse_document(yaml: &str, location: &str, sink: &mut dyn DiagnosticsSink) -> Option<Mapping> {
    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(mapping)) => Some(mapping),
        Ok(Value::Null) => Some(Mapping::new()),
        Ok(other) => {
            sink.emit_error(
                location,
                format!("Expected a mapping at the top level, found {}", describe(&other)),
            );
            None
        }
        Err(e) => {
            sink.emit_error(location, format!("Invalid YAML: {e}"));
            None
        }
    }
}

/// Read an optional string-valued key.
///
/// The outer `Option` is `None` when the key has the wrong type.
fn string_field<'v>(
    mapping: &'v Mapping,
    key: &str,
    context: &str,
    sink: &mut dyn DiagnosticsSink,
) -> Option<Option<&'v str>> {
    match mapping.get(key) {
        None | Some(Value::Null) => Some(None),
        Some(Value::String(value)) => Some(Some(value.as_str())),
        Some(other) => {
            sink.emit_error(
                context,
                format!("'{key}' must be a string, found {}", describe(other)),
            );
            None
        }
    }
}

/// Read a list-valued key, treating anything else as empty.
fn sequence<'v>(
    value: Option<&'v Value>,
    key: &str,
    context: &str,
    sink: &mut dyn DiagnosticsSink,
) -> &'v [Value] {
    match value {
        None | Some(Value::Null) => &[],
        Some(Value::Sequence(items)) => items.as_slice(),
        Some(other) => {
            sink.emit_error(
                context,
                format!("'{key}' must be a list, found {}", describe(other)),
            );
            &[]
        }
    }
}

fn warn_unknown_keys(
    mapping: &Mapping,
    known: &[&str],
    context: &str,
    sink: &mut dyn DiagnosticsSink,
) {
    for key in mapping.keys() {
        match key.as_str() {
            Some(key) if known.contains(&key) => {}
            Some(key) => sink.emit_warning(context, format!("Unknown key '{key}' is ignored")),
            None => sink.emit_warning(
                context,
                format!("Non-string key {} is ignored", describe(key)),
            ),
        }
    }
}

fn is_toc_entry(value: &Value) -> bool {
    matches!(value, Value::Mapping(mapping) if mapping.contains_key("toc"))
}

fn resolve_cross_link(
    uri: &str,
    entry: &RawEntry<'_>,
    scope: &Scope<'_>,
    sink: &mut dyn DiagnosticsSink,
) -> Option<TocItem> {
    if !is_cross_link_uri(uri) {
        sink.emit_error(
            scope.context,
            format!("Invalid cross link '{uri}', expected 'repository://path'"),
        );
        return None;
    }

    Some(TocItem::CrossLink(CrossLinkRef {
        uri: uri.to_owned(),
        title: entry.title.map(str::to_owned),
        hidden: entry.hidden,
        context: scope.context.to_owned(),
    }))
}

/// Check `scheme://rest` with a non-empty scheme made of URI scheme characters.
fn is_cross_link_uri(uri: &str) -> bool {
    let Some((scheme, _)) = uri.split_once("://") else {
        return false;
    };
    !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+'))
}

/// Emit a hint when a folder's index file is not named after the folder.
fn check_index_file_name(folder: &str, file: &str, context: &str, sink: &mut dyn DiagnosticsSink) {
    if file == "index.md" {
        return;
    }
    let folder_name = folder.rsplit('/').next().unwrap_or(folder);
    let stem = file.strip_suffix(".md").unwrap_or(file);
    let normalize = |s: &str| s.replace(['-', '_'], "").to_lowercase();

    if normalize(stem) != normalize(folder_name) {
        sink.emit_hint(
            context,
            format!(
                "File name '{file}' does not match folder name '{folder_name}', consider 'folder: {folder_name}, file: {folder_name}.md'"
            ),
        );
    }
}

/// Strip the container directory from a docset-relative path.
fn relative_to(path: &str, container: &str) -> String {
    if container.is_empty() {
        return path.to_owned();
    }
    path.strip_prefix(container)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(path)
        .to_owned()
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
