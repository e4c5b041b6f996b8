use clap::Args;

use crate::cli::output::{self, OutputFormat};
use crate::cli::ReleaseArgs;

#[derive(Args)]
pub struct InfoArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(serde::Serialize)]
struct ReleaseSummary<'a> {
    version: &'a str,
    loaded_at: String,
    organisms: usize,
    precursors: usize,
    matures: usize,
    high_confidence_precursors: usize,
    genomic_buckets: usize,
    taxonomy_depth: usize,
    capabilities: crate::loader::ReleaseCapabilities,
}

fn yes_no(flag: bool) -> String {
    let label = if flag { "yes" } else { "no" };
    label.to_string()
}

pub fn run(args: InfoArgs, release_args: &ReleaseArgs) -> anyhow::Result<()> {
    let config = release_args.config()?;
    let release = release_args.load(&config)?;
    let store = release.store();

    let summary = ReleaseSummary {
        version: release.version(),
        loaded_at: release.loaded_at().to_rfc3339(),
        organisms: store.organism_count(),
        precursors: store.precursors().len(),
        matures: store.matures().len(),
        high_confidence_precursors: crate::query::quality::filter(store.precursors().iter(), true).len(),
        genomic_buckets: release.index().precursors.genomic.bucket_count(),
        taxonomy_depth: release.taxonomy().depth(),
        capabilities: release.capabilities(),
    };

    if args.format == OutputFormat::Json {
        return output::print_json(&summary);
    }

    let caps = summary.capabilities;
    output::print_key_values(
        &format!("Release {}", summary.version),
        vec![
            ("Loaded at", summary.loaded_at.clone()),
            ("Organisms", summary.organisms.to_string()),
            ("Precursors", summary.precursors.to_string()),
            ("Mature sequences", summary.matures.to_string()),
            ("High-confidence precursors", summary.high_confidence_precursors.to_string()),
            ("Chromosome/strand buckets", summary.genomic_buckets.to_string()),
            ("Taxonomy depth", summary.taxonomy_depth.to_string()),
            ("High-confidence set", yes_no(caps.high_confidence)),
            ("Structures", yes_no(caps.structures)),
            ("Genome coordinates", yes_no(caps.genomic_coordinates)),
            ("NCBI taxonomy ids", yes_no(caps.taxonomy_ids)),
        ],
    );
    Ok(())
}
