pub mod commands;
pub mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::{load_config, Config};
use crate::core::paths;
use crate::core::Release;
use crate::loader::FlatFileLoader;

#[derive(Parser)]
#[command(
    name = "mirus",
    version,
    about = "Query miRBase releases in memory",
    long_about = "Mirus loads one miRBase release (precursors, mature sequences, organisms, \
                  genome coordinates) into indexed memory and answers multi-criteria lookups, \
                  genomic cluster searches and taxonomy queries."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub release: ReleaseArgs,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads to use (0 = all available)
    #[arg(short = 'j', long, default_value = "0", global = true)]
    pub threads: usize,
}

/// Where the release comes from
#[derive(Args, Debug, Clone, Default)]
pub struct ReleaseArgs {
    /// Config file (defaults to ~/.mirus/config.toml when present)
    #[arg(long, global = true, env = "MIRUS_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Release directory to load, bypassing the configured data directory
    #[arg(long, global = true, value_name = "DIR")]
    pub release_dir: Option<PathBuf>,

    /// Release version under the data directory (e.g. 22.1, CURRENT)
    #[arg(long = "release", global = true, value_name = "VERSION")]
    pub version: Option<String>,
}

impl ReleaseArgs {
    pub fn config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Ok(load_config(path)?),
            None => {
                let default = paths::config_file();
                if default.is_file() {
                    Ok(load_config(default)?)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    pub fn loader(&self, config: &Config) -> FlatFileLoader {
        match (&self.release_dir, &self.version) {
            (Some(dir), Some(version)) => FlatFileLoader::new(dir).with_version(version),
            (Some(dir), None) => FlatFileLoader::new(dir),
            (None, version) => {
                let version = version.clone().unwrap_or_else(|| config.release.version.clone());
                FlatFileLoader::new(config.data_dir().join(&version)).with_version(version)
            }
        }
    }

    /// Load the selected release behind a spinner
    pub fn load(&self, config: &Config) -> anyhow::Result<Release> {
        let loader = self.loader(config);
        let spinner = output::create_spinner(&format!("Loading release from {}...", loader.dir().display()));
        match Release::load(&loader) {
            Ok(release) => {
                spinner.finish_with_message(format!(
                    "Loaded release {} ({} precursors, {} matures)",
                    release.version(),
                    release.store().precursors().len(),
                    release.store().matures().len()
                ));
                Ok(release)
            }
            Err(e) => {
                spinner.finish_and_clear();
                Err(e.into())
            }
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up precursor (stem-loop) records
    Precursors(commands::precursors::PrecursorsArgs),

    /// Look up mature sequences
    Matures(commands::matures::MaturesArgs),

    /// Precursors within a genomic window of a seed record
    Cluster(commands::cluster::ClusterArgs),

    /// Browse the organism taxonomy
    Taxonomy(commands::taxonomy::TaxonomyArgs),

    /// Summarise the loaded release
    Info(commands::info::InfoArgs),
}
