use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use depsnap::config::{DEFAULT_CONFIG_FILE, DepsnapConfig};
use depsnap::telemetry;

mod build_cmd;
mod config_cmd;

/// Dependency snapshot builder
///
/// Reads a resolved dependency graph (JSON) and prints the project context
/// snapshot an editor or language server needs: source files, assembly
/// references, sibling projects, per-dependency descriptions, and
/// diagnostics.
///
/// QUICK START:
///
///   depsnap build graph.json
///   depsnap build graph.json --configuration Release --output snapshot.json
///
/// Defaults come from depsnap.toml in the working directory (see
/// 'depsnap check-config'). Set DEPSNAP_LOG=debug for pipeline logs.
#[derive(Parser)]
#[command(name = "depsnap")]
#[command(version, about)]
#[command(propagate_version = true)]
#[command(after_help = "See 'depsnap <command> --help' for more information on a specific command.")]
struct Cli {
    /// Configuration file.
    #[arg(long, global = true, env = "DEPSNAP_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a snapshot from a resolved graph document
    Build(build_cmd::BuildArgs),

    /// Parse the configuration file and print the effective settings
    #[command(name = "check-config")]
    CheckConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = DepsnapConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    telemetry::init(config.log.format);

    match cli.command {
        Commands::Build(ref args) => build_cmd::run(args, &config),
        Commands::CheckConfig => config_cmd::run(&cli.config, &config),
    }
}
