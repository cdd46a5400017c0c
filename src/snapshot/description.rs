//! Per-library output records.

use serde::{Deserialize, Serialize};

use crate::model::{
    DiagnosticMessage, FrameworkData, FrameworkName, LibraryDescription, LibraryKind,
};

use super::items::{DependencyItem, DependencyItemIndex};
use super::type_change::TYPE_CHANGED;

// ---------------------------------------------------------------------------
// DependencyDescription
// ---------------------------------------------------------------------------

/// Everything a client is told about one library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DependencyDescription {
    /// Library name.
    pub name: String,
    /// Resolved version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// On-disk location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Library kind.
    #[serde(rename = "Type")]
    pub kind: LibraryKind,
    /// Whether the library resolved. A library whose kind changed since the
    /// graph was resolved is reported unresolved.
    pub resolved: bool,
    /// Declared dependencies, as cross-reference items.
    pub dependencies: Vec<DependencyItem>,
    /// Diagnostics attributed to this library, of every severity, in
    /// aggregation order.
    pub diagnostics: Vec<DiagnosticMessage>,
}

impl DependencyDescription {
    /// Describe `library`, resolving its edges through `items`.
    #[must_use]
    pub fn create(
        library: &LibraryDescription,
        diagnostics: Vec<DiagnosticMessage>,
        items: &DependencyItemIndex,
    ) -> Self {
        let identity = &library.identity;
        let type_changed = diagnostics
            .iter()
            .any(|d| d.is_error() && d.error_code == TYPE_CHANGED);

        Self {
            name: identity.name.clone(),
            version: identity.version.as_ref().map(ToString::to_string),
            path: library.path.clone(),
            kind: identity.kind,
            resolved: library.resolved && !type_changed,
            dependencies: library
                .dependencies
                .iter()
                .map(|range| items.item_for(range))
                .collect(),
            diagnostics,
        }
    }
}

// ---------------------------------------------------------------------------
// ProjectReferenceDescription
// ---------------------------------------------------------------------------

/// A sibling project the root project references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectReferenceDescription {
    /// Project name.
    pub name: String,
    /// Project file path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Framework the project targets.
    pub framework: FrameworkData,
}

impl ProjectReferenceDescription {
    /// View `library` as a project reference. Returns `None` unless the
    /// library is a project.
    ///
    /// A project that does not record its own framework is assumed to target
    /// `fallback`, the graph's framework.
    #[must_use]
    pub fn create(library: &LibraryDescription, fallback: &FrameworkName) -> Option<Self> {
        if !library.is_project() {
            return None;
        }
        let framework = library.target_framework.as_ref().unwrap_or(fallback);
        Some(Self {
            name: library.identity.name.clone(),
            path: library.path.clone(),
            framework: FrameworkData::from(framework),
        })
    }
}
