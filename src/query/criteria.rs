use serde::{Deserialize, Serialize};

use crate::bio::Strand;
use crate::{MirusError, Result};

/// Chromosome/strand/position restriction.
///
/// Every field is optional. Without `start` the range begins at position 0,
/// without `end` it runs to the end of the chromosome. A record matches when
/// one of its loci lies entirely inside the range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomicFilter {
    pub chromosome: Option<String>,
    pub strand: Option<Strand>,
    pub start: Option<u64>,
    pub end: Option<u64>,
}

impl GenomicFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(chromosome: impl Into<String>) -> Self {
        Self {
            chromosome: Some(chromosome.into()),
            ..Self::default()
        }
    }

    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.strand = Some(strand);
        self
    }

    pub fn with_start(mut self, start: u64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: u64) -> Self {
        self.end = Some(end);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(MirusError::InvalidInput(format!(
                    "genomic range start {} is past end {}",
                    start, end
                )));
            }
        }
        if self.chromosome.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(MirusError::InvalidInput("empty chromosome name".to_string()));
        }
        Ok(())
    }

    pub fn lower_bound(&self) -> u64 {
        self.start.unwrap_or(0)
    }
}

/// Optional filter categories for one resolver call; an empty list means the
/// category was not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCriteria {
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub names: Vec<String>,
    /// Organism codes or latin names
    #[serde(default)]
    pub organisms: Vec<String>,
    #[serde(default)]
    pub rank: Option<String>,
    /// Identifiers of the other record kind: mature ids for a precursor query,
    /// precursor ids for a mature query
    #[serde(default)]
    pub related: Vec<String>,
    #[serde(default)]
    pub genomic: Option<GenomicFilter>,
}

impl QueryCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_organism(mut self, organism: impl Into<String>) -> Self {
        self.organisms.push(organism.into());
        self
    }

    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = Some(rank.into());
        self
    }

    pub fn with_related<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_genomic(mut self, filter: GenomicFilter) -> Self {
        self.genomic = Some(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
            && self.names.is_empty()
            && self.organisms.is_empty()
            && self.rank.is_none()
            && self.related.is_empty()
            && self.genomic.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(rank) = &self.rank {
            if rank.trim().is_empty() {
                return Err(MirusError::InvalidInput("empty taxonomic rank".to_string()));
            }
        }
        if let Some(filter) = &self.genomic {
            filter.validate()?;
        }
        Ok(())
    }
}
