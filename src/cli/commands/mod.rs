pub mod cluster;
pub mod info;
pub mod matures;
pub mod precursors;
pub mod taxonomy;

use clap::Args;

use crate::bio::Strand;
use crate::query::{GenomicFilter, QueryCriteria};

/// Filter flags shared by the record lookup commands
#[derive(Args, Debug, Clone, Default)]
pub struct CriteriaArgs {
    /// Accessions (comma separated or repeated)
    #[arg(long = "id", value_delimiter = ',')]
    pub ids: Vec<String>,

    /// Record names (comma separated or repeated)
    #[arg(long = "name", value_delimiter = ',')]
    pub names: Vec<String>,

    /// Organism code or latin name
    #[arg(long = "organism")]
    pub organisms: Vec<String>,

    /// Taxonomic rank, e.g. Mammalia
    #[arg(long)]
    pub rank: Option<String>,

    /// Chromosome for a genomic search
    #[arg(long = "chr")]
    pub chromosome: Option<String>,

    /// Strand for a genomic search (+, -, forward, reverse)
    #[arg(long)]
    pub strand: Option<Strand>,

    /// First position of the genomic range
    #[arg(long)]
    pub start: Option<u64>,

    /// Last position of the genomic range
    #[arg(long)]
    pub end: Option<u64>,

    /// Keep only high-confidence records
    #[arg(long)]
    pub high_confidence: bool,
}

impl CriteriaArgs {
    pub fn genomic(&self) -> Option<GenomicFilter> {
        if self.chromosome.is_none() && self.strand.is_none() && self.start.is_none() && self.end.is_none() {
            return None;
        }
        Some(GenomicFilter {
            chromosome: self.chromosome.clone(),
            strand: self.strand,
            start: self.start,
            end: self.end,
        })
    }

    pub fn criteria(&self, related: &[String]) -> QueryCriteria {
        let mut criteria = QueryCriteria::new()
            .with_ids(self.ids.iter().cloned())
            .with_names(self.names.iter().cloned())
            .with_related(related.iter().cloned());
        criteria.organisms = self.organisms.clone();
        criteria.rank = self.rank.clone();
        criteria.genomic = self.genomic();
        criteria
    }
}
