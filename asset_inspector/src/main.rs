//! Asset inspector
//!
//! Loads every entry of a resource manifest into a registry backed by the
//! headless backend and prints the resulting registry, one line per
//! resource. The first failure stops the run with its category and message.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use engine_core::assets::{ResourceError, ResourceManager};
use engine_core::backend::HeadlessBackend;
use engine_core::config::{Config, ConfigError, ResourceConfig};
use engine_core::foundation::logging;
use thiserror::Error;

mod manifest;
use manifest::Manifest;

const DEFAULT_MANIFEST: &str = "resources/manifest.ron";

#[derive(Debug, Parser)]
#[command(name = "asset_inspector", about = "Load a resource manifest and list the registry")]
struct Cli {
    /// Manifest listing the resources to create (.ron or .toml)
    #[arg(long, value_name = "FILE", default_value = DEFAULT_MANIFEST)]
    manifest: PathBuf,

    /// Resource settings (.ron or .toml); the manifest directory is always searched last
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum InspectorError {
    Config(#[from] ConfigError),
    Resource(#[from] ResourceError),
}

impl fmt::Display for InspectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Resource(e) => write!(f, "{}: {e}", e.category()),
        }
    }
}

fn load_config(cli: &Cli) -> Result<ResourceConfig, ConfigError> {
    let config = match &cli.config {
        Some(path) => ResourceConfig::load_from_file(path)?,
        None => ResourceConfig::default(),
    };
    let manifest_dir = cli.manifest.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.with_search_path(manifest_dir))
}

fn run(cli: &Cli) -> Result<ResourceManager, InspectorError> {
    let config = load_config(cli)?;
    let manifest = Manifest::load_from_file(&cli.manifest)?;
    log::info!(
        "Applying {} manifest entries from {}",
        manifest.entries.len(),
        cli.manifest.display()
    );

    let mut backend = HeadlessBackend::new();
    let mut manager = ResourceManager::new(config);
    manifest.apply(&mut manager, &mut backend)?;

    log::debug!("Backend holds {} objects", backend.object_count());
    Ok(manager)
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(manager) => {
            for resource in manager.resources() {
                println!("{resource}");
            }
            println!("{} resources", manager.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
