use clap::Args;

use super::CriteriaArgs;
use crate::cli::output::{self, OutputFormat};
use crate::cli::ReleaseArgs;

#[derive(Args)]
pub struct MaturesArgs {
    #[command(flatten)]
    pub criteria: CriteriaArgs,

    /// Precursor accessions whose mature products should be listed
    #[arg(long = "precursor", value_delimiter = ',')]
    pub precursors: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub fn run(args: MaturesArgs, release_args: &ReleaseArgs) -> anyhow::Result<()> {
    let config = release_args.config()?;
    let release = release_args.load(&config)?;

    let criteria = args.criteria.criteria(&args.precursors);
    let mut outcome = release.matures(&criteria)?;

    if args.criteria.high_confidence || config.query.high_confidence_only {
        if !release.capabilities().high_confidence {
            output::print_warning(&format!(
                "release {} defines no high-confidence set; every record counts as low confidence",
                release.version()
            ));
        }
        outcome = outcome.high_confidence(true);
    }

    output::print_outcome(&outcome, args.format)
}
