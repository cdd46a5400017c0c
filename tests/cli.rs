//! Integration tests for the `depsnap` binary.

mod common;

use common::{app_graph_dir, depsnap, depsnap_ok};

fn parse(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("stdout is JSON")
}

#[test]
fn build_prints_snapshot_json() {
    let (dir, graph) = app_graph_dir();
    let stdout = depsnap_ok(dir.path(), &["build", graph.to_str().unwrap(), "--search-path", "/src"]);

    let json = parse(&stdout);
    assert_eq!(json["RootDependency"], "App");
    assert_eq!(json["FileReferences"].as_array().unwrap().len(), 3);
    assert!(json["DependencyDiagnostics"].as_array().unwrap().is_empty());
    // Pretty by default.
    assert!(stdout.lines().count() > 1);
}

#[test]
fn build_compact_prints_one_line() {
    let (dir, graph) = app_graph_dir();
    let stdout = depsnap_ok(dir.path(), &["build", graph.to_str().unwrap(), "--compact"]);
    assert_eq!(stdout.trim_end().lines().count(), 1);
}

#[test]
fn build_writes_output_file() {
    let (dir, graph) = app_graph_dir();
    let out = dir.path().join("snapshot.json");
    let stdout = depsnap_ok(
        dir.path(),
        &["build", graph.to_str().unwrap(), "--output", out.to_str().unwrap()],
    );
    assert!(stdout.is_empty());

    let json = parse(&std::fs::read_to_string(&out).unwrap());
    assert_eq!(json["ProjectReferences"][0]["Name"], "Lib");
}

#[test]
fn build_uses_configuration_from_config_file() {
    let (dir, graph) = app_graph_dir();
    std::fs::write(
        dir.path().join("depsnap.toml"),
        "[build]\nconfiguration = \"Release\"\nsearch_paths = [\"/src\"]\n\n[output]\npretty = false\n",
    )
    .unwrap();

    let stdout = depsnap_ok(dir.path(), &["build", graph.to_str().unwrap()]);
    let json = parse(&stdout);
    // The fixture only exports Debug.
    assert!(json["FileReferences"].as_array().unwrap().is_empty());
    assert_eq!(stdout.trim_end().lines().count(), 1);

    // Flags override the file.
    let stdout = depsnap_ok(
        dir.path(),
        &["build", graph.to_str().unwrap(), "--configuration", "Debug"],
    );
    assert_eq!(parse(&stdout)["FileReferences"].as_array().unwrap().len(), 3);
}

#[test]
fn stale_search_paths_without_kind_changes_report_nothing() {
    let (dir, graph) = app_graph_dir();
    // The graph was resolved against /src; the caller last saw /old.
    let stdout = depsnap_ok(
        dir.path(),
        &["build", graph.to_str().unwrap(), "--search-path", "/old"],
    );
    let json = parse(&stdout);
    // /src holds App and Lib, matching the graph, so nothing changed kind.
    assert!(json["DependencyDiagnostics"].as_array().unwrap().is_empty());
}

#[test]
fn build_fails_on_missing_graph() {
    let dir = tempfile::tempdir().unwrap();
    let out = depsnap(dir.path(), &["build", "missing.json"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("missing.json"), "stderr: {stderr}");
}

#[test]
fn invalid_config_is_rejected_with_line_number() {
    let (dir, graph) = app_graph_dir();
    std::fs::write(dir.path().join("depsnap.toml"), "[output]\ncolor = true\n").unwrap();

    let out = depsnap(dir.path(), &["build", graph.to_str().unwrap()]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("line 2"), "stderr: {stderr}");
}

#[test]
fn check_config_reports_defaults_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = depsnap_ok(dir.path(), &["check-config"]);
    assert!(stdout.contains("using defaults"));
    assert!(stdout.contains("build.configuration = \"Debug\""));
}

#[test]
fn check_config_reads_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[log]\nformat = \"json\"\n").unwrap();

    let stdout = depsnap_ok(dir.path(), &["check-config", "--config", path.to_str().unwrap()]);
    assert!(stdout.contains("parsed"));
    assert!(stdout.contains("log.format          = json"));
}
