//! Diagnostic messages.
//!
//! Diagnostics are data, not errors: producers (the library manager, the
//! dependency type-change detector) emit them and the snapshot carries them
//! through unchanged for the client to render.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::identity::LibraryIdentity;

/// Severity of a [`DiagnosticMessage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational.
    Info,
    /// Something the user should look at.
    Warning,
    /// Something that prevents a correct build.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A 1-based line/column span in a source file.
///
/// Zero means "unknown", matching how producers report positions they could
/// not determine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SourceRange {
    /// First line.
    pub start_line: u32,
    /// First column.
    pub start_column: u32,
    /// Last line.
    pub end_line: u32,
    /// Last column.
    pub end_column: u32,
}

impl SourceRange {
    /// A zero-width range at one position.
    #[must_use]
    pub const fn at(line: u32, column: u32) -> Self {
        Self {
            start_line: line,
            start_column: column,
            end_line: line,
            end_column: column,
        }
    }
}

/// One diagnostic produced while resolving the dependency graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DiagnosticMessage {
    /// Producer-specific code, e.g. `NU1001`.
    pub error_code: String,
    /// Human-readable message.
    pub message: String,
    /// File the diagnostic points at, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file_path: Option<String>,
    /// Severity.
    pub severity: Severity,
    /// Location within `source_file_path`.
    #[serde(default)]
    pub range: SourceRange,
    /// The library this diagnostic concerns. `None` for graph-level messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<LibraryIdentity>,
}

impl DiagnosticMessage {
    /// Create an unlocated, unattributed diagnostic.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            source_file_path: None,
            severity,
            range: SourceRange::default(),
            source: None,
        }
    }

    /// Point the diagnostic at a file location.
    #[must_use]
    pub fn located(mut self, path: impl Into<String>, range: SourceRange) -> Self {
        self.source_file_path = Some(path.into());
        self.range = range;
        self
    }

    /// Attribute the diagnostic to a library.
    #[must_use]
    pub fn attributed_to(mut self, library: LibraryIdentity) -> Self {
        self.source = Some(library);
        self
    }

    /// Returns `true` for [`Severity::Error`].
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Compiler-style rendering: `path(line,col): severity CODE: message`.
    #[must_use]
    pub fn formatted_message(&self) -> String {
        match &self.source_file_path {
            Some(path) => format!(
                "{path}({},{}): {} {}: {}",
                self.range.start_line,
                self.range.start_column,
                self.severity,
                self.error_code,
                self.message
            ),
            None => format!("{} {}: {}", self.severity, self.error_code, self.message),
        }
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted_message())
    }
}
