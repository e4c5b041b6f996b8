use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::bio::{GenomicPlacement, Precursor};
use crate::index::{GenomicEntry, IndexSet};
use crate::store::EntityStore;
use crate::{MirusError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterDirection {
    Upstream,
    Downstream,
    #[default]
    Both,
}

impl ClusterDirection {
    /// Query interval around `locus`, clamped at position 0
    pub fn window(&self, locus: &GenomicPlacement, size: u64) -> (u64, u64) {
        match self {
            Self::Upstream => (locus.start.saturating_sub(size), locus.start),
            Self::Downstream => (locus.end, locus.end.saturating_add(size)),
            Self::Both => (locus.start.saturating_sub(size), locus.end.saturating_add(size)),
        }
    }
}

impl FromStr for ClusterDirection {
    type Err = MirusError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "upstream" | "up" => Ok(Self::Upstream),
            "downstream" | "down" => Ok(Self::Downstream),
            "both" | "up-downstream" => Ok(Self::Both),
            _ => Err(MirusError::InvalidInput(format!(
                "unknown cluster direction '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for ClusterDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upstream => write!(f, "upstream"),
            Self::Downstream => write!(f, "downstream"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// Reject negative window sizes before they reach the engine
pub fn window_size(window: i64) -> Result<u64> {
    u64::try_from(window)
        .map_err(|_| MirusError::InvalidInput(format!("window size must not be negative, got {}", window)))
}

/// Precursors near a seed on the same chromosome and strand
#[derive(Debug, Clone, Copy)]
pub struct ClusterEngine<'a> {
    store: &'a EntityStore,
    index: &'a IndexSet,
}

impl<'a> ClusterEngine<'a> {
    pub fn new(store: &'a EntityStore, index: &'a IndexSet) -> Self {
        Self { store, index }
    }

    /// Seed loci: the precursor's own placements, or for a mature id the
    /// placements of every precursor it derives from
    pub fn seed_loci(&self, seed: &str) -> Result<Vec<&'a GenomicPlacement>> {
        let seed = seed.trim();
        if seed.is_empty() {
            return Err(MirusError::InvalidInput("empty cluster seed".to_string()));
        }

        let loci: Vec<&GenomicPlacement> = if let Some(precursor) = self.store.precursors().get(seed) {
            precursor.placements.iter().collect()
        } else if let Some(mature) = self.store.matures().get(seed) {
            self.store
                .precursors_of(mature)
                .into_iter()
                .flat_map(|p| p.placements.iter())
                .collect()
        } else {
            return Err(MirusError::NotFound(format!("cluster seed {}", seed)));
        };

        if loci.is_empty() {
            return Err(MirusError::NotFound(format!("no genomic locus for {}", seed)));
        }
        Ok(loci)
    }

    pub fn cluster(&self, seed: &str, window: i64, direction: ClusterDirection) -> Result<Vec<&'a Precursor>> {
        let size = window_size(window)?;
        let loci = self.seed_loci(seed)?;

        let mut entries: Vec<GenomicEntry> = Vec::new();
        for locus in &loci {
            let (start, end) = direction.window(locus, size);
            entries.extend(
                self.index
                    .precursors
                    .genomic
                    .overlapping(&locus.chromosome, locus.strand, start, end),
            );
        }
        entries.sort_unstable();

        let mut seen = HashSet::new();
        let table = self.store.precursors();
        let members: Vec<&Precursor> = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.entity))
            .filter_map(|entry| table.at(entry.entity))
            .collect();

        tracing::debug!(
            seed,
            window = size,
            direction = %direction,
            loci = loci.len(),
            members = members.len(),
            "Cluster computed"
        );
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bio::Strand;
    use rstest::rstest;

    #[rstest]
    #[case(ClusterDirection::Upstream, (900, 1000))]
    #[case(ClusterDirection::Downstream, (1100, 1200))]
    #[case(ClusterDirection::Both, (900, 1200))]
    fn test_window_bounds(#[case] direction: ClusterDirection, #[case] expected: (u64, u64)) {
        let locus = GenomicPlacement::new("1", Strand::Forward, 1000, 1100);
        assert_eq!(direction.window(&locus, 100), expected);
    }

    #[test]
    fn test_window_clamps_at_zero() {
        let locus = GenomicPlacement::new("1", Strand::Forward, 50, 80);
        assert_eq!(ClusterDirection::Both.window(&locus, 100), (0, 180));
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("up-downstream".parse::<ClusterDirection>().unwrap(), ClusterDirection::Both);
        assert_eq!("Upstream".parse::<ClusterDirection>().unwrap(), ClusterDirection::Upstream);
        assert!("sideways".parse::<ClusterDirection>().is_err());
    }

    #[test]
    fn test_negative_window_rejected() {
        assert!(matches!(window_size(-1), Err(MirusError::InvalidInput(_))));
        assert_eq!(window_size(0).unwrap(), 0);
    }
}
