use clap::Args;
use colored::*;
use std::time::Instant;

use super::CriteriaArgs;
use crate::cli::output::{self, OutputFormat};
use crate::cli::ReleaseArgs;

#[derive(Args)]
pub struct PrecursorsArgs {
    #[command(flatten)]
    pub criteria: CriteriaArgs,

    /// Mature accessions whose precursors should be listed
    #[arg(long = "mature", value_delimiter = ',')]
    pub matures: Vec<String>,

    /// Print dot-bracket structures instead of the record table
    #[arg(long)]
    pub structures: bool,

    /// Print PubMed links for the matched records
    #[arg(long)]
    pub references: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub fn run(args: PrecursorsArgs, release_args: &ReleaseArgs) -> anyhow::Result<()> {
    let config = release_args.config()?;
    let release = release_args.load(&config)?;

    let criteria = args.criteria.criteria(&args.matures);
    let started = Instant::now();
    let mut outcome = release.precursors(&criteria)?;

    if args.criteria.high_confidence || config.query.high_confidence_only {
        if !release.capabilities().high_confidence {
            output::print_warning(&format!(
                "release {} defines no high-confidence set; every record counts as low confidence",
                release.version()
            ));
        }
        outcome = outcome.high_confidence(true);
    }
    tracing::debug!("Resolved precursors in {:?}", started.elapsed());

    if args.structures || args.references {
        let ids: Vec<&str> = match &outcome {
            crate::QueryOutcome::Unified(records) => records.iter().map(|p| p.id.as_str()).collect(),
            crate::QueryOutcome::Partitioned(_) => {
                output::print_warning("criteria contradict each other; refine the query first");
                return output::print_outcome(&outcome, args.format);
            }
        };
        let none: [&str; 0] = [];
        if args.structures {
            let structures = release.structures(&ids, &none);
            if args.format == OutputFormat::Json {
                output::print_json(&structures)?;
            } else {
                for (id, structure) in &structures {
                    println!("{}\t{}", id.bold(), structure);
                }
            }
        }
        if args.references {
            let links = release.pubmed_links(&ids, &none, &none);
            if args.format == OutputFormat::Json {
                output::print_json(&links)?;
            } else {
                for link in links {
                    println!("{}", link);
                }
            }
        }
        return Ok(());
    }

    output::print_outcome(&outcome, args.format)
}
