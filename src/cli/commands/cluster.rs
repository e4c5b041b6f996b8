use clap::Args;
use colored::*;

use crate::cli::output::{self, OutputFormat};
use crate::cli::ReleaseArgs;
use crate::query::ClusterDirection;

#[derive(Args)]
pub struct ClusterArgs {
    /// Precursor or mature accession to search around
    pub seed: String,

    /// Window size in bases (defaults to the configured window)
    #[arg(short, long, allow_hyphen_values = true)]
    pub window: Option<i64>,

    /// upstream, downstream or both
    #[arg(short, long)]
    pub direction: Option<ClusterDirection>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub fn run(args: ClusterArgs, release_args: &ReleaseArgs) -> anyhow::Result<()> {
    let config = release_args.config()?;

    // reject bad input before paying for a load
    let window = match args.window {
        Some(window) => window,
        None => i64::try_from(config.query.cluster_window)?,
    };
    crate::query::cluster::window_size(window)?;
    let direction = args.direction.unwrap_or(config.query.cluster_direction);

    let release = release_args.load(&config)?;
    let members = release.cluster(&args.seed, window, direction)?;

    if args.format == OutputFormat::Json {
        return output::print_json(&members);
    }

    output::print_section(&format!(
        "Cluster around {} ({} {} bp)",
        args.seed, direction, window
    ));
    output::print_records(&members);
    println!("{} {}", "✓".green().bold(), format!("{} precursors", members.len()));
    Ok(())
}
