//! Per-library export artifacts.

use serde::{Deserialize, Serialize};

use super::identity::LibraryIdentity;

/// What one resolved library contributes to compilation.
///
/// Produced by the graph-resolution collaborator for a given configuration;
/// read-only here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LibraryExport {
    /// The library that produced this export.
    pub library: LibraryIdentity,
    /// Source files the library adds to the consuming compilation.
    #[serde(default)]
    pub source_references: Vec<String>,
    /// Resolved paths of the assemblies to compile against.
    #[serde(default)]
    pub compilation_assemblies: Vec<String>,
}

impl LibraryExport {
    /// An export with no artifacts.
    #[must_use]
    pub const fn new(library: LibraryIdentity) -> Self {
        Self {
            library,
            source_references: Vec::new(),
            compilation_assemblies: Vec::new(),
        }
    }

    /// Set the contributed source files.
    #[must_use]
    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_references = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Set the compilation assembly paths.
    #[must_use]
    pub fn with_assemblies<I, S>(mut self, assemblies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compilation_assemblies = assemblies.into_iter().map(Into::into).collect();
        self
    }

    /// Name of the exporting library.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.library.name
    }
}
