//! Dependency type-change detection.
//!
//! A graph is resolved against a set of search paths. If the caller's view of
//! the search paths has since changed, a library may have switched kind: a
//! package now has a project of the same name on a search path, or a project
//! has disappeared from them. Each such library gets an `NU1010` error.
//!
//! The previous search paths are always passed in; nothing is remembered
//! between calls.

use std::collections::BTreeSet;

use tracing::debug;

use crate::graph::{DependencyContext, ProjectLocator};
use crate::model::{DiagnosticMessage, LibraryDescription, LibraryKind, Severity};

/// Error code for a library whose kind changed since resolution.
pub const TYPE_CHANGED: &str = "NU1010";

/// Report libraries whose kind no longer matches the search paths.
///
/// Returns nothing when `current_search_paths` and the graph's search paths
/// are the same set.
pub fn diagnose_type_changes<C, L>(
    context: &C,
    current_search_paths: &[String],
    locator: &L,
) -> Vec<DiagnosticMessage>
where
    C: DependencyContext + ?Sized,
    L: ProjectLocator + ?Sized,
{
    let resolved_paths: BTreeSet<&str> = context.search_paths().iter().map(String::as_str).collect();
    let current_paths: BTreeSet<&str> = current_search_paths.iter().map(String::as_str).collect();
    if resolved_paths == current_paths {
        return Vec::new();
    }

    let candidates: BTreeSet<String> = resolved_paths
        .iter()
        .flat_map(|path| locator.projects_in(path))
        .collect();
    debug!(
        search_paths = resolved_paths.len(),
        candidates = candidates.len(),
        "search paths changed; checking dependency kinds"
    );

    let root_name = context.root_name();
    let root = context
        .libraries()
        .iter()
        .find(|library| library.name() == root_name);

    context
        .libraries()
        .iter()
        .filter(|library| library.resolved && library.name() != root_name)
        .filter(|library| kind_changed(library, &candidates))
        .map(|library| type_changed(library, root))
        .collect()
}

fn kind_changed(library: &LibraryDescription, candidates: &BTreeSet<String>) -> bool {
    let found = candidates.contains(library.name());
    match library.identity.kind {
        LibraryKind::Project => !found,
        LibraryKind::Package => found,
        LibraryKind::MsBuildProject | LibraryKind::ReferenceAssembly | LibraryKind::Unresolved => {
            false
        }
    }
}

fn type_changed(library: &LibraryDescription, root: Option<&LibraryDescription>) -> DiagnosticMessage {
    let name = library.name();
    let diagnostic = DiagnosticMessage::new(
        TYPE_CHANGED,
        format!("The type of dependency {name} was changed."),
        Severity::Error,
    )
    .attributed_to(library.identity.clone());

    match root
        .and_then(|root| root.dependency_on(name))
        .and_then(|range| Some((range.source_file_path.as_deref()?, range.source_range)))
    {
        Some((path, range)) => diagnostic.located(path, range),
        None => diagnostic,
    }
}
