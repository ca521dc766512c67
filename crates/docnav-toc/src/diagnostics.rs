//! Non-fatal diagnostics emitted while parsing and building navigation.
//!
//! Configuration problems never abort a build. They are pushed into a
//! [`DiagnosticsSink`] and the offending item is dropped.

use std::fmt;

use serde::Serialize;

/// Diagnostic severity, ordered from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Best-practice suggestion.
    Hint,
    /// Suspicious configuration that was still processed.
    Warning,
    /// Configuration that could not be processed; the item was dropped.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Hint => "hint",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// A single diagnostic message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity of the problem.
    pub severity: Severity,
    /// File that declared the offending item (e.g., `docset.yml`, `api/toc.yml`).
    pub location: String,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Create an error diagnostic.
    #[must_use]
    pub fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, location, message)
    }

    /// Create a warning diagnostic.
    #[must_use]
    pub fn warning(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, location, message)
    }

    /// Create a hint diagnostic.
    #[must_use]
    pub fn hint(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Hint, location, message)
    }

    fn new(severity: Severity, location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.location, self.message)
    }
}

/// Receiver for diagnostics. Implementations must never fail.
pub trait DiagnosticsSink {
    /// Record a diagnostic.
    fn emit(&mut self, diagnostic: Diagnostic);

    /// Record an error at `location`.
    fn emit_error(&mut self, location: &str, message: String) {
        self.emit(Diagnostic::error(location, message));
    }

    /// Record a warning at `location`.
    fn emit_warning(&mut self, location: &str, message: String) {
        self.emit(Diagnostic::warning(location, message));
    }

    /// Record a hint at `location`.
    fn emit_hint(&mut self, location: &str, message: String) {
        self.emit(Diagnostic::hint(location, message));
    }
}

/// Collects diagnostics in emission order.
#[derive(Debug, Default)]
pub struct DiagnosticsCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticsCollector {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over collected diagnostics in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Number of diagnostics with the given severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Number of error diagnostics.
    #[must_use]
    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of warning diagnostics.
    #[must_use]
    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// True if at least one error was collected.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors() > 0
    }

    /// True if nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Consume the collector, returning the diagnostics.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticsSink for DiagnosticsCollector {
    fn emit(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            severity = %diagnostic.severity,
            location = %diagnostic.location,
            message = %diagnostic.message,
            "Diagnostic emitted"
        );
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_collector_counts_by_severity() {
        let mut collector = DiagnosticsCollector::new();
        collector.emit_error("docset.yml", "missing".to_owned());
        collector.emit_warning("docset.yml", "unknown key".to_owned());
        collector.emit_warning("api/toc.yml", "unknown key".to_owned());
        collector.emit_hint("docset.yml", "use folder".to_owned());

        assert_eq!(collector.errors(), 1);
        assert_eq!(collector.warnings(), 2);
        assert_eq!(collector.count(Severity::Hint), 1);
        assert!(collector.has_errors());
    }

    #[test]
    fn test_collector_preserves_order() {
        let mut collector = DiagnosticsCollector::new();
        collector.emit_warning("a.yml", "first".to_owned());
        collector.emit_error("b.yml", "second".to_owned());

        let messages: Vec<_> = collector.iter().map(|d| d.message.as_str()).collect();

        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_empty_collector() {
        let collector = DiagnosticsCollector::new();

        assert!(collector.is_empty());
        assert!(!collector.has_errors());
        assert!(collector.into_vec().is_empty());
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::error("docset.yml", "File not found: 'a.md'");

        assert_eq!(
            diagnostic.to_string(),
            "error: docset.yml: File not found: 'a.md'"
        );
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Hint);
    }

    #[test]
    fn test_diagnostic_serialization() {
        let diagnostic = Diagnostic::warning("toc.yml", "Unknown key 'foo'");

        let json = serde_json::to_string(&diagnostic).unwrap();

        assert_eq!(
            json,
            r#"{"severity":"warning","location":"toc.yml","message":"Unknown key 'foo'"}"#
        );
    }
}
