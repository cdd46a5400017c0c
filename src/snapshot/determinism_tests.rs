//! Property tests for snapshot determinism.
//!
//! Building a snapshot must be a pure function of its inputs: building twice
//! gives equal snapshots, and the order in which the exporter lists exports
//! does not matter as long as each name has at most one reference-assembly
//! export and at most one other export.

#![allow(clippy::all, clippy::pedantic, clippy::nursery)]

use proptest::prelude::*;

use crate::graph::{DependencyContext, ResolvedGraph};
use crate::model::{
    FrameworkName, LibraryDescription, LibraryExport, LibraryIdentity, LibraryKind, LibraryRange,
};
use crate::snapshot::{ProjectContextSnapshot, build_snapshot};

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

const PATHS: &[&str] = &[
    "/pkg/a.dll",
    "/PKG/A.dll",
    "/pkg/b.dll",
    "/fx/System.Runtime.dll",
    "/fx/system.runtime.DLL",
    "src/Gen.cs",
    "SRC/gen.cs",
    "src/ΑΣ.cs",
    "src/ασ.cs",
];

#[derive(Clone, Debug)]
struct LibraryScenario {
    kind: LibraryKind,
    package_export: Option<Vec<String>>,
    fx_export: Option<Vec<String>>,
    sources: Vec<String>,
}

fn arb_kind() -> impl Strategy<Value = LibraryKind> {
    prop_oneof![
        Just(LibraryKind::Package),
        Just(LibraryKind::Project),
        Just(LibraryKind::MsBuildProject),
        Just(LibraryKind::ReferenceAssembly),
        Just(LibraryKind::Unresolved),
    ]
}

fn arb_paths() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(PATHS), 0..3)
        .prop_map(|paths| paths.into_iter().map(str::to_owned).collect())
}

fn arb_library() -> impl Strategy<Value = LibraryScenario> {
    (
        arb_kind(),
        prop::option::of(arb_paths()),
        prop::option::of(arb_paths()),
        arb_paths(),
    )
        .prop_map(|(kind, package_export, fx_export, sources)| LibraryScenario {
            kind,
            package_export,
            fx_export,
            sources,
        })
}

fn to_graph(scenarios: &[LibraryScenario]) -> ResolvedGraph {
    let names: Vec<String> = (0..scenarios.len()).map(|i| format!("Lib{i}")).collect();
    let root = LibraryDescription::new(LibraryIdentity::new("App", None, LibraryKind::Project))
        .with_dependencies(names.iter().map(|n| LibraryRange::new(n.clone(), None)).collect());
    let mut graph = ResolvedGraph::new("App", FrameworkName::parse("net451").unwrap())
        .with_source_files(["Program.cs", "program.cs"])
        .with_library(root);

    for (name, scenario) in names.iter().zip(scenarios) {
        graph = graph.with_library(LibraryDescription::new(LibraryIdentity::new(
            name.clone(),
            None,
            scenario.kind,
        )));
        if let Some(assemblies) = &scenario.package_export {
            let id = LibraryIdentity::new(name.clone(), None, LibraryKind::Package);
            graph = graph.with_export(
                "Debug",
                LibraryExport::new(id)
                    .with_sources(scenario.sources.clone())
                    .with_assemblies(assemblies.clone()),
            );
        }
        if let Some(assemblies) = &scenario.fx_export {
            let id = LibraryIdentity::new(name.clone(), None, LibraryKind::ReferenceAssembly);
            graph = graph.with_export(
                "Debug",
                LibraryExport::new(id).with_assemblies(assemblies.clone()),
            );
        }
    }
    graph
}

fn arb_graph() -> impl Strategy<Value = ResolvedGraph> {
    prop::collection::vec(arb_library(), 0..8).prop_map(|scenarios| to_graph(&scenarios))
}

fn build(graph: &ResolvedGraph) -> ProjectContextSnapshot {
    build_snapshot(graph, "Debug", graph.search_paths(), graph)
}

/// Pairwise check with a per-character lowercase fold.
fn same_ignoring_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn is_frozen(paths: &[String]) -> bool {
    let unique = paths
        .iter()
        .enumerate()
        .all(|(i, a)| paths[i + 1..].iter().all(|b| !same_ignoring_case(a, b)));
    unique && paths.windows(2).all(|w| w[0] < w[1])
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Building twice from the same graph yields equal snapshots.
    #[test]
    fn build_is_idempotent(graph in arb_graph()) {
        prop_assert_eq!(build(&graph), build(&graph));
    }

    /// Shuffling the exporter's output leaves the snapshot unchanged.
    #[test]
    fn export_order_does_not_matter(
        (graph, shuffled) in arb_graph().prop_flat_map(|graph| {
            let exports = graph.exports.get("Debug").cloned().unwrap_or_default();
            (Just(graph), Just(exports).prop_shuffle())
        })
    ) {
        let mut reordered = graph.clone();
        reordered.exports.insert("Debug".to_owned(), shuffled);
        prop_assert_eq!(build(&graph), build(&reordered));
    }

    /// Frozen lists are sorted and case-insensitively unique; the root is
    /// never its own project reference.
    #[test]
    fn snapshot_lists_are_frozen(graph in arb_graph()) {
        let snapshot = build(&graph);
        prop_assert!(is_frozen(snapshot.source_files()));
        prop_assert!(is_frozen(snapshot.file_references()));
        prop_assert!(snapshot.source_files().iter().any(|f| f.eq_ignore_ascii_case("program.cs")));
        prop_assert!(snapshot.project_references().iter().all(|p| p.name != "App"));
        prop_assert!(snapshot
            .project_references()
            .windows(2)
            .all(|w| w[0].name <= w[1].name));
        prop_assert_eq!(snapshot.dependencies().len(), graph.libraries.len());
    }
}
