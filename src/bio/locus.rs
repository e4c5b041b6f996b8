use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
    Unknown,
}

impl Strand {
    /// Parse the GFF strand column
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s.trim() {
            "+" => Some(Self::Forward),
            "-" => Some(Self::Reverse),
            "." | "?" => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Forward => '+',
            Self::Reverse => '-',
            Self::Unknown => '.',
        }
    }
}

impl std::str::FromStr for Strand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(strand) = Self::from_symbol(s) {
            return Ok(strand);
        }
        match s.to_lowercase().as_str() {
            "forward" | "plus" => Ok(Self::Forward),
            "reverse" | "minus" => Ok(Self::Reverse),
            _ => Err(format!("Unknown strand: {}", s)),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One genomic locus, 1-based and inclusive on both ends as in GFF3
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenomicPlacement {
    pub chromosome: String,
    pub strand: Strand,
    pub start: u64,
    pub end: u64,
}

impl GenomicPlacement {
    pub fn new(chromosome: impl Into<String>, strand: Strand, start: u64, end: u64) -> Self {
        Self {
            chromosome: chromosome.into(),
            strand,
            start,
            end,
        }
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Inclusive overlap on the same chromosome and strand
    pub fn overlaps(&self, other: &GenomicPlacement) -> bool {
        self.chromosome == other.chromosome
            && self.strand == other.strand
            && self.start <= other.end
            && self.end >= other.start
    }
}

impl fmt::Display for GenomicPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}({})",
            self.chromosome, self.start, self.end, self.strand
        )
    }
}
