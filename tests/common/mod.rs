//! Shared test helpers for depsnap integration tests.
//!
//! All tests use temp directories; nothing touches the real working tree.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use depsnap::ResolvedGraph;
use depsnap::model::{
    FrameworkName, LibraryDescription, LibraryExport, LibraryIdentity, LibraryKind, LibraryRange,
    SemanticVersion, SourceRange,
};
use tempfile::TempDir;

pub fn net451() -> FrameworkName {
    FrameworkName::parse("net451").expect("net451 parses")
}

pub fn identity(name: &str, version: Option<&str>, kind: LibraryKind) -> LibraryIdentity {
    LibraryIdentity::new(
        name,
        version.map(|v| SemanticVersion::parse(v).expect("valid version")),
        kind,
    )
}

/// App (project, Program.cs) depending on System.Foo (reference assembly),
/// Bar 1.0.0 (package), and Lib (sibling project). `/src` holds App and Lib.
pub fn app_graph() -> ResolvedGraph {
    let bar = identity("Bar", Some("1.0.0"), LibraryKind::Package);
    let fx = identity("System.Foo", Some("4.0.0"), LibraryKind::ReferenceAssembly);
    let lib = identity("Lib", Some("1.0.0"), LibraryKind::Project);

    ResolvedGraph::new("App", net451())
        .with_source_files(["Program.cs"])
        .with_library(
            LibraryDescription::new(identity("App", Some("1.0.0"), LibraryKind::Project))
                .with_path("/src/App/project.json")
                .with_dependencies(vec![
                    LibraryRange::new("System.Foo", None),
                    LibraryRange::new("Bar", Some("1.0.0".to_owned()))
                        .declared_at("/src/App/project.json", SourceRange::at(9, 13)),
                    LibraryRange::new("Lib", None),
                ]),
        )
        .with_library(LibraryDescription::new(fx.clone()))
        .with_library(LibraryDescription::new(bar.clone()).with_path("/pkg/Bar/1.0.0"))
        .with_library(
            LibraryDescription::new(lib.clone())
                .with_path("/src/Lib/project.json")
                .with_dependencies(vec![LibraryRange::new("Bar", Some("1.0.0".to_owned()))]),
        )
        .with_export("Debug", LibraryExport::new(fx).with_assemblies(["/fx/System.Foo.dll"]))
        .with_export(
            "Debug",
            LibraryExport::new(bar)
                .with_sources(["/pkg/Bar/1.0.0/shared/Gen.cs"])
                .with_assemblies(["/pkg/Bar/1.0.0/lib/net451/Bar.dll"]),
        )
        .with_export(
            "Debug",
            LibraryExport::new(lib).with_assemblies(["/src/Lib/bin/Debug/net451/Lib.dll"]),
        )
        .with_search_path("/src", ["App", "Lib"])
}

/// Serialize `graph` into `dir/graph.json` and return the path.
pub fn write_graph(dir: &Path, graph: &ResolvedGraph) -> PathBuf {
    let path = dir.join("graph.json");
    let text = serde_json::to_string_pretty(graph).expect("graph serializes");
    std::fs::write(&path, text).expect("write graph");
    path
}

/// Fresh temp dir holding `graph.json` for [`app_graph`].
pub fn app_graph_dir() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = write_graph(dir.path(), &app_graph());
    (dir, path)
}

/// Run the `depsnap` binary in `cwd`.
pub fn depsnap(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_depsnap"))
        .args(args)
        .current_dir(cwd)
        .env_remove("DEPSNAP_CONFIG")
        .env_remove("DEPSNAP_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run depsnap")
}

/// Run `depsnap` and assert it succeeded, returning stdout.
pub fn depsnap_ok(cwd: &Path, args: &[&str]) -> String {
    let out = depsnap(cwd, args);
    assert!(
        out.status.success(),
        "depsnap {} failed:\n{}",
        args.join(" "),
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).into_owned()
}
