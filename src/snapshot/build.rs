//! Snapshot assembly.
//!
//! Drives the other pipeline steps and freezes the result into a
//! [`ProjectContextSnapshot`]. See the [module docs](super) for the ordering
//! guarantees.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{debug, info_span};

use crate::graph::{DependencyContext, ProjectLocator};
use crate::model::{CompilerOptions, DiagnosticMessage, FrameworkName};

use super::description::{DependencyDescription, ProjectReferenceDescription};
use super::diagnostics::DiagnosticIndex;
use super::exports::resolve_exports;
use super::items::DependencyItemIndex;
use super::type_change::diagnose_type_changes;

// ---------------------------------------------------------------------------
// ProjectContextSnapshot
// ---------------------------------------------------------------------------

/// Everything a client needs to know about one project/framework/configuration.
///
/// Built once by [`build_snapshot`] and read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectContextSnapshot {
    root_dependency: String,
    target_framework: FrameworkName,
    source_files: Vec<String>,
    compiler_options: CompilerOptions,
    project_references: Vec<ProjectReferenceDescription>,
    file_references: Vec<String>,
    dependency_diagnostics: Vec<DiagnosticMessage>,
    dependencies: BTreeMap<String, DependencyDescription>,
}

impl ProjectContextSnapshot {
    /// Name of the root project.
    #[must_use]
    pub fn root_dependency(&self) -> &str {
        &self.root_dependency
    }

    /// Framework the snapshot describes.
    #[must_use]
    pub const fn target_framework(&self) -> &FrameworkName {
        &self.target_framework
    }

    /// Source files to compile: sorted, case-insensitively unique.
    #[must_use]
    pub fn source_files(&self) -> &[String] {
        &self.source_files
    }

    /// Effective compiler options.
    #[must_use]
    pub const fn compiler_options(&self) -> &CompilerOptions {
        &self.compiler_options
    }

    /// Sibling projects, sorted by name. Never includes the root project.
    #[must_use]
    pub fn project_references(&self) -> &[ProjectReferenceDescription] {
        &self.project_references
    }

    /// Assemblies to compile against: sorted, case-insensitively unique.
    #[must_use]
    pub fn file_references(&self) -> &[String] {
        &self.file_references
    }

    /// Every diagnostic, manager messages first.
    #[must_use]
    pub fn dependency_diagnostics(&self) -> &[DiagnosticMessage] {
        &self.dependency_diagnostics
    }

    /// One description per library name.
    #[must_use]
    pub const fn dependencies(&self) -> &BTreeMap<String, DependencyDescription> {
        &self.dependencies
    }
}

// ---------------------------------------------------------------------------
// build_snapshot
// ---------------------------------------------------------------------------

/// Build the snapshot for `configuration`.
///
/// `current_search_paths` is the caller's last-known set of search paths; it
/// is compared against the graph's to detect libraries whose kind changed
/// (see [`diagnose_type_changes`]). `locator` answers which projects live
/// under the graph's search paths.
///
/// Pure and total: the same inputs always produce an identical snapshot.
pub fn build_snapshot<C, L>(
    context: &C,
    configuration: &str,
    current_search_paths: &[String],
    locator: &L,
) -> ProjectContextSnapshot
where
    C: DependencyContext + ?Sized,
    L: ProjectLocator + ?Sized,
{
    let root_name = context.root_name();
    let _span = info_span!("build_snapshot", root = root_name, configuration).entered();

    let diagnostics = DiagnosticIndex::new(
        context.all_diagnostics(),
        diagnose_type_changes(context, current_search_paths, locator),
    );
    let exports = resolve_exports(context.exports(configuration));
    let libraries = context.libraries();
    let items = DependencyItemIndex::build(libraries);

    let mut source_files: Vec<String> = context.source_files().to_vec();
    let mut file_references: Vec<String> = Vec::new();
    let mut project_references: Vec<ProjectReferenceDescription> = Vec::new();
    let mut dependencies: BTreeMap<String, DependencyDescription> = BTreeMap::new();

    for library in libraries {
        if let Some(export) = exports.get(library.name()) {
            source_files.extend(export.source_references.iter().cloned());
            file_references.extend(export.compilation_assemblies.iter().cloned());
        }

        let attached = diagnostics.for_library(&library.identity).to_vec();
        let description = DependencyDescription::create(library, attached, &items);
        dependencies.insert(description.name.clone(), description);

        if library.name() != root_name
            && let Some(reference) =
                ProjectReferenceDescription::create(library, context.target_framework())
        {
            project_references.push(reference);
        }
    }

    project_references.sort_by(|a, b| a.name.cmp(&b.name));

    let snapshot = ProjectContextSnapshot {
        root_dependency: root_name.to_owned(),
        target_framework: context.target_framework().clone(),
        source_files: freeze_paths(source_files),
        compiler_options: context.compiler_options(context.target_framework(), configuration),
        project_references,
        file_references: freeze_paths(file_references),
        dependency_diagnostics: diagnostics.into_all(),
        dependencies,
    };

    debug!(
        libraries = libraries.len(),
        exports = exports.len(),
        source_files = snapshot.source_files.len(),
        file_references = snapshot.file_references.len(),
        project_references = snapshot.project_references.len(),
        diagnostics = snapshot.dependency_diagnostics.len(),
        "snapshot built"
    );

    snapshot
}

/// Ordinal case-insensitive key: every character is uppercased on its own,
/// so no letter folds differently depending on its neighbours.
fn fold_case(path: &str) -> String {
    path.chars().flat_map(char::to_uppercase).collect()
}

/// Drop case-insensitive duplicates (first spelling wins), then sort ordinally.
fn freeze_paths(paths: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(paths.len());
    let mut unique: Vec<String> = paths
        .into_iter()
        .filter(|path| seen.insert(fold_case(path)))
        .collect();
    unique.sort();
    unique
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
