//! `depsnap build`: load a graph document and emit its snapshot.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use depsnap::config::DepsnapConfig;
use depsnap::graph::ResolvedGraph;
use depsnap::snapshot::{ProjectContextSnapshot, build_snapshot};

/// Arguments for `depsnap build`.
#[derive(Args)]
pub struct BuildArgs {
    /// Resolved graph document (JSON).
    pub graph: PathBuf,

    /// Configuration label, e.g. Debug or Release.
    ///
    /// Defaults to `build.configuration` from the config file.
    #[arg(long, short = 'c')]
    pub configuration: Option<String>,

    /// Search path the caller last saw (repeatable).
    ///
    /// Defaults to `build.search_paths` from the config file.
    #[arg(long = "search-path", value_name = "PATH")]
    pub search_paths: Vec<String>,

    /// Write the snapshot here instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print single-line JSON regardless of `output.pretty`.
    #[arg(long)]
    pub compact: bool,
}

pub fn run(args: &BuildArgs, config: &DepsnapConfig) -> Result<()> {
    let graph = ResolvedGraph::load(&args.graph)?;

    let configuration = args
        .configuration
        .as_deref()
        .unwrap_or(config.build.configuration.as_str());
    let search_paths = if args.search_paths.is_empty() {
        &config.build.search_paths
    } else {
        &args.search_paths
    };

    let snapshot = build_snapshot(&graph, configuration, search_paths, &graph);
    let json = render(&snapshot, config.output.pretty && !args.compact)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("writing snapshot to {}", path.display()))?;
            info!(path = %path.display(), "snapshot written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn render(snapshot: &ProjectContextSnapshot, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(snapshot)
    } else {
        serde_json::to_string(snapshot)
    };
    json.context("serializing snapshot")
}
