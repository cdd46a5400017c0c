//! `depsnap check-config`: report the effective configuration.

use std::path::Path;

use anyhow::Result;

use depsnap::config::DepsnapConfig;

#[allow(clippy::unnecessary_wraps)]
pub fn run(path: &Path, config: &DepsnapConfig) -> Result<()> {
    if path.exists() {
        println!("[OK] {} parsed", path.display());
    } else {
        println!("[OK] no file at {}, using defaults", path.display());
    }

    println!("build.configuration = {:?}", config.build.configuration);
    println!("build.search_paths  = {:?}", config.build.search_paths);
    println!("output.pretty       = {}", config.output.pretty);
    println!("log.format          = {}", config.log.format);
    Ok(())
}
