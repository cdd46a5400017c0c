//! Collaborator seams: the resolved dependency graph and project discovery.
//!
//! The snapshot builder never loads projects or walks the file system. It
//! reads everything through [`DependencyContext`] and [`ProjectLocator`].
//! [`ResolvedGraph`] is the in-memory implementation of both, deserialized
//! from a JSON graph document.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::model::{
    CompilerOptions, DiagnosticMessage, FrameworkName, LibraryDescription, LibraryExport,
};

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// A fully resolved, acyclic dependency graph for one root project and one
/// target framework.
pub trait DependencyContext {
    /// Name of the root project.
    fn root_name(&self) -> &str;

    /// Framework the graph was resolved for.
    fn target_framework(&self) -> &FrameworkName;

    /// Every library in the graph, in the graph's own enumeration order.
    /// The root project appears here too.
    fn libraries(&self) -> &[LibraryDescription];

    /// Source files the root project declares.
    fn source_files(&self) -> &[String];

    /// Search paths the graph was resolved against.
    fn search_paths(&self) -> &[String];

    /// Diagnostics from the library manager.
    fn all_diagnostics(&self) -> Vec<DiagnosticMessage>;

    /// Exports computed for `configuration`, possibly several per library name.
    fn exports(&self, configuration: &str) -> Vec<LibraryExport>;

    /// Effective compiler options for a framework/configuration pair.
    fn compiler_options(&self, framework: &FrameworkName, configuration: &str) -> CompilerOptions;
}

/// Finds the projects that live under a search path.
pub trait ProjectLocator {
    /// Names of the projects found directly under `search_path`.
    fn projects_in(&self, search_path: &str) -> Vec<String>;
}

// ---------------------------------------------------------------------------
// ResolvedGraph
// ---------------------------------------------------------------------------

/// The root project's own declarations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RootProject {
    /// Project name.
    pub name: String,
    /// Declared source files.
    #[serde(default)]
    pub source_files: Vec<String>,
    /// Project-wide compiler options.
    #[serde(default)]
    pub compiler_options: CompilerOptions,
    /// Compiler options per configuration label.
    #[serde(default)]
    pub configurations: BTreeMap<String, CompilerOptions>,
    /// Compiler options per target framework.
    #[serde(default)]
    pub frameworks: BTreeMap<FrameworkName, CompilerOptions>,
}

/// A resolved graph document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResolvedGraph {
    /// The root project.
    pub project: RootProject,
    /// Framework the graph was resolved for.
    pub target_framework: FrameworkName,
    /// Libraries in enumeration order.
    #[serde(default)]
    pub libraries: Vec<LibraryDescription>,
    /// Library manager diagnostics.
    #[serde(default)]
    pub diagnostics: Vec<DiagnosticMessage>,
    /// Exports keyed by configuration label.
    #[serde(default)]
    pub exports: BTreeMap<String, Vec<LibraryExport>>,
    /// Search paths the graph was resolved against.
    #[serde(default)]
    pub search_paths: Vec<String>,
    /// Project names found under each search path.
    #[serde(default)]
    pub search_path_projects: BTreeMap<String, Vec<String>>,
}

impl ResolvedGraph {
    /// An empty graph for `root` targeting `framework`.
    pub fn new(root: impl Into<String>, framework: FrameworkName) -> Self {
        Self {
            project: RootProject {
                name: root.into(),
                ..RootProject::default()
            },
            target_framework: framework,
            libraries: Vec::new(),
            diagnostics: Vec::new(),
            exports: BTreeMap::new(),
            search_paths: Vec::new(),
            search_path_projects: BTreeMap::new(),
        }
    }

    /// Parse a graph document from JSON text.
    ///
    /// # Errors
    /// Returns [`LoadError::Parse`] if the text is not a valid graph document.
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        serde_json::from_str(text).map_err(|e| LoadError::from_json(&e))
    }

    /// Read and parse a graph document.
    ///
    /// # Errors
    /// Returns [`LoadError::Read`] if the file cannot be read and
    /// [`LoadError::Parse`] if it is not a valid graph document.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&text).map_err(|e| e.with_path(path.to_owned()))
    }

    /// Append a library.
    #[must_use]
    pub fn with_library(mut self, library: LibraryDescription) -> Self {
        self.libraries.push(library);
        self
    }

    /// Append an export for `configuration`.
    #[must_use]
    pub fn with_export(mut self, configuration: &str, export: LibraryExport) -> Self {
        self.exports
            .entry(configuration.to_owned())
            .or_default()
            .push(export);
        self
    }

    /// Append a library manager diagnostic.
    #[must_use]
    pub fn with_diagnostic(mut self, diagnostic: DiagnosticMessage) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    /// Set the root project's declared source files.
    #[must_use]
    pub fn with_source_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.project.source_files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Record a resolved search path and the projects found under it.
    #[must_use]
    pub fn with_search_path<I, S>(mut self, path: &str, projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_paths.push(path.to_owned());
        self.search_path_projects.insert(
            path.to_owned(),
            projects.into_iter().map(Into::into).collect(),
        );
        self
    }
}

/// Configuration labels are matched case-insensitively.
fn lookup_config<'a, V>(map: &'a BTreeMap<String, V>, configuration: &str) -> Option<&'a V> {
    map.get(configuration).or_else(|| {
        map.iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(configuration))
            .map(|(_, value)| value)
    })
}

impl DependencyContext for ResolvedGraph {
    fn root_name(&self) -> &str {
        &self.project.name
    }

    fn target_framework(&self) -> &FrameworkName {
        &self.target_framework
    }

    fn libraries(&self) -> &[LibraryDescription] {
        &self.libraries
    }

    fn source_files(&self) -> &[String] {
        &self.project.source_files
    }

    fn search_paths(&self) -> &[String] {
        &self.search_paths
    }

    fn all_diagnostics(&self) -> Vec<DiagnosticMessage> {
        self.diagnostics.clone()
    }

    fn exports(&self, configuration: &str) -> Vec<LibraryExport> {
        lookup_config(&self.exports, configuration)
            .cloned()
            .unwrap_or_default()
    }

    fn compiler_options(&self, framework: &FrameworkName, configuration: &str) -> CompilerOptions {
        let project = &self.project;
        CompilerOptions::combine(
            std::iter::once(&project.compiler_options)
                .chain(lookup_config(&project.configurations, configuration))
                .chain(project.frameworks.get(framework)),
        )
    }
}

impl ProjectLocator for ResolvedGraph {
    fn projects_in(&self, search_path: &str) -> Vec<String> {
        self.search_path_projects
            .get(search_path)
            .cloned()
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LibraryIdentity, LibraryKind};

    fn net451() -> FrameworkName {
        FrameworkName::parse("net451").unwrap()
    }

    #[test]
    fn exports_lookup_ignores_configuration_case() {
        let bar = LibraryIdentity::new("Bar", None, LibraryKind::Package);
        let graph = ResolvedGraph::new("App", net451())
            .with_export("Debug", LibraryExport::new(bar).with_assemblies(["/pkg/bar.dll"]));
        assert_eq!(graph.exports("Debug").len(), 1);
        assert_eq!(graph.exports("debug").len(), 1);
        assert!(graph.exports("Release").is_empty());
    }

    #[test]
    fn compiler_options_layer_project_configuration_framework() {
        let mut graph = ResolvedGraph::new("App", net451());
        graph.project.compiler_options = CompilerOptions {
            defines: Some(vec!["TRACE".to_owned()]),
            optimize: Some(false),
            ..CompilerOptions::default()
        };
        graph.project.configurations.insert(
            "Release".to_owned(),
            CompilerOptions {
                defines: Some(vec!["RELEASE".to_owned()]),
                optimize: Some(true),
                ..CompilerOptions::default()
            },
        );
        graph.project.frameworks.insert(
            net451(),
            CompilerOptions {
                defines: Some(vec!["NET451".to_owned()]),
                ..CompilerOptions::default()
            },
        );

        let release = graph.compiler_options(&net451(), "release");
        assert_eq!(release.optimize, Some(true));
        assert_eq!(
            release.defines,
            Some(vec!["TRACE".to_owned(), "RELEASE".to_owned(), "NET451".to_owned()])
        );

        let other_fw = FrameworkName::parse("netstandard1.6").unwrap();
        let debug = graph.compiler_options(&other_fw, "Debug");
        assert_eq!(debug.optimize, Some(false));
        assert_eq!(debug.defines, Some(vec!["TRACE".to_owned()]));
    }

    #[test]
    fn locator_reads_search_path_projects() {
        let graph = ResolvedGraph::new("App", net451()).with_search_path("/src", ["App", "Lib"]);
        assert_eq!(graph.search_paths(), ["/src".to_owned()]);
        assert_eq!(graph.projects_in("/src"), vec!["App", "Lib"]);
        assert!(graph.projects_in("/test").is_empty());
    }

    #[test]
    fn parses_graph_document() {
        let text = r#"{
            "Project": {
                "Name": "App",
                "SourceFiles": ["Program.cs"],
                "Frameworks": { "net451": { "Defines": ["NET451"] } }
            },
            "TargetFramework": "net451",
            "Libraries": [
                { "Identity": { "Name": "App", "Kind": "Project" } },
                { "Identity": { "Name": "Bar", "Version": "1.0.0", "Kind": "Package" } }
            ],
            "Exports": {
                "Debug": [
                    { "Library": { "Name": "Bar", "Version": "1.0.0", "Kind": "Package" },
                      "CompilationAssemblies": ["/pkg/bar.dll"] }
                ]
            }
        }"#;
        let graph = ResolvedGraph::from_json(text).unwrap();
        assert_eq!(graph.root_name(), "App");
        assert_eq!(graph.libraries().len(), 2);
        assert_eq!(graph.source_files(), ["Program.cs".to_owned()]);
        assert_eq!(
            graph.compiler_options(&net451(), "Debug").defines,
            Some(vec!["NET451".to_owned()])
        );
    }

    #[test]
    fn rejects_bad_framework() {
        let text = r#"{ "Project": { "Name": "App" }, "TargetFramework": "???" }"#;
        let err = ResolvedGraph::from_json(text).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
