//! Graph records: libraries and the dependency edges they declare.

use serde::{Deserialize, Serialize};

use super::diagnostic::SourceRange;
use super::framework::FrameworkName;
use super::identity::{LibraryIdentity, LibraryKind};

/// A declared dependency edge: "this library wants `name` in `version_range`".
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LibraryRange {
    /// Name of the depended-on library.
    pub name: String,
    /// Declared version range text, e.g. `[1.0.0, )`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_range: Option<String>,
    /// Project file that declares the edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file_path: Option<String>,
    /// Where in `source_file_path` the edge is declared.
    #[serde(default)]
    pub source_range: SourceRange,
}

impl LibraryRange {
    /// An edge with no declaration site.
    pub fn new(name: impl Into<String>, version_range: Option<String>) -> Self {
        Self {
            name: name.into(),
            version_range,
            source_file_path: None,
            source_range: SourceRange::default(),
        }
    }

    /// Record where this edge was declared.
    #[must_use]
    pub fn declared_at(mut self, path: impl Into<String>, range: SourceRange) -> Self {
        self.source_file_path = Some(path.into());
        self.source_range = range;
        self
    }
}

/// One library node of a resolved dependency graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LibraryDescription {
    /// Name, version, and kind.
    pub identity: LibraryIdentity,
    /// On-disk location: the package folder, project file, or assembly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Whether the resolver found this library.
    #[serde(default = "default_resolved")]
    pub resolved: bool,
    /// Declared dependency edges, in declaration order.
    #[serde(default)]
    pub dependencies: Vec<LibraryRange>,
    /// For projects: the framework the project itself targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_framework: Option<FrameworkName>,
}

const fn default_resolved() -> bool {
    true
}

impl LibraryDescription {
    /// A resolved library with no path and no dependencies.
    #[must_use]
    pub const fn new(identity: LibraryIdentity) -> Self {
        Self {
            identity,
            path: None,
            resolved: true,
            dependencies: Vec::new(),
            target_framework: None,
        }
    }

    /// Set the on-disk path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the declared dependency edges.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: Vec<LibraryRange>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Set the framework a project library targets.
    #[must_use]
    pub fn with_target_framework(mut self, framework: FrameworkName) -> Self {
        self.target_framework = Some(framework);
        self
    }

    /// Mark the library unresolved.
    #[must_use]
    pub fn unresolved(mut self) -> Self {
        self.resolved = false;
        self
    }

    /// Library name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// Returns `true` if this node is an in-graph project.
    #[must_use]
    pub const fn is_project(&self) -> bool {
        match self.identity.kind {
            LibraryKind::Project => true,
            LibraryKind::Package
            | LibraryKind::MsBuildProject
            | LibraryKind::ReferenceAssembly
            | LibraryKind::Unresolved => false,
        }
    }

    /// Find the edge this library declares on `name`.
    #[must_use]
    pub fn dependency_on(&self, name: &str) -> Option<&LibraryRange> {
        self.dependencies.iter().find(|range| range.name == name)
    }
}
