use clap::Parser;
use colored::*;
use mirus::cli::{Cli, Commands};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging with MIRUS_LOG environment variable support
    let log_level = std::env::var("MIRUS_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = match e.downcast_ref::<mirus::MirusError>() {
            Some(mirus::MirusError::Config(_)) => 2,
            Some(mirus::MirusError::Io(_)) => 3,
            Some(mirus::MirusError::Parse(_)) | Some(mirus::MirusError::Integrity(_)) => 4,
            Some(mirus::MirusError::NotFound(_)) | Some(mirus::MirusError::PathNotFound(_)) => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let threads = mirus::utils::parallel::configure_thread_pool(cli.threads)?;

    if cli.verbose > 0 {
        eprintln!("Using {} threads", threads);
    }

    match cli.command {
        Commands::Precursors(args) => mirus::cli::commands::precursors::run(args, &cli.release),
        Commands::Matures(args) => mirus::cli::commands::matures::run(args, &cli.release),
        Commands::Cluster(args) => mirus::cli::commands::cluster::run(args, &cli.release),
        Commands::Taxonomy(args) => mirus::cli::commands::taxonomy::run(args, &cli.release),
        Commands::Info(args) => mirus::cli::commands::info::run(args, &cli.release),
    }
}
