//! Per-(chromosome, strand) interval buckets ordered by start coordinate
use std::collections::{BTreeMap, HashSet};

use crate::bio::{GenomicPlacement, Strand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GenomicEntry {
    pub start: u64,
    pub end: u64,
    /// Position of the owning record in its entity table
    pub entity: usize,
}

#[derive(Debug, Clone, Default)]
struct Bucket {
    entries: Vec<GenomicEntry>,
    // running maximum of `end`, so entries that finish before a query can be
    // skipped with one binary search
    max_end: Vec<u64>,
}

impl Bucket {
    fn seal(&mut self) {
        self.entries.sort_unstable();
        self.entries.dedup();
        let mut running = 0;
        self.max_end = self
            .entries
            .iter()
            .map(|e| {
                running = running.max(e.end);
                running
            })
            .collect();
    }

    fn overlapping(&self, start: u64, end: u64) -> impl Iterator<Item = &GenomicEntry> {
        let upper = self.entries.partition_point(|e| e.start <= end);
        let lower = self.max_end.partition_point(|&m| m < start).min(upper);
        self.entries[lower..upper]
            .iter()
            .filter(move |e| e.end >= start)
    }

    fn contained(&self, start: u64, end: Option<u64>) -> impl Iterator<Item = &GenomicEntry> {
        let lower = self.entries.partition_point(|e| e.start < start);
        self.entries[lower..]
            .iter()
            .take_while(move |e| end.map_or(true, |end| e.start <= end))
            .filter(move |e| end.map_or(true, |end| e.end <= end))
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenomicIndex {
    buckets: BTreeMap<(String, Strand), Bucket>,
}

impl GenomicIndex {
    pub fn build<'a, I>(placements: I) -> Self
    where
        I: IntoIterator<Item = (usize, &'a GenomicPlacement)>,
    {
        let mut buckets: BTreeMap<(String, Strand), Bucket> = BTreeMap::new();
        for (entity, placement) in placements {
            buckets
                .entry((placement.chromosome.clone(), placement.strand))
                .or_default()
                .entries
                .push(GenomicEntry {
                    start: placement.start,
                    end: placement.end,
                    entity,
                });
        }
        for bucket in buckets.values_mut() {
            bucket.seal();
        }
        Self { buckets }
    }

    /// Entries on `chromosome`/`strand` whose interval touches `[start, end]`,
    /// ascending by start
    pub fn overlapping(&self, chromosome: &str, strand: Strand, start: u64, end: u64) -> Vec<GenomicEntry> {
        if start > end {
            return Vec::new();
        }
        self.buckets
            .get(&(chromosome.to_string(), strand))
            .map(|bucket| bucket.overlapping(start, end).copied().collect())
            .unwrap_or_default()
    }

    /// Entity positions lying entirely inside `[start, end]` on every bucket
    /// matching the optional chromosome and strand. Buckets are visited in key
    /// order and each entity is reported once, at its first hit.
    pub fn contained(
        &self,
        chromosome: Option<&str>,
        strand: Option<Strand>,
        start: u64,
        end: Option<u64>,
    ) -> Vec<usize> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for ((chrom, bucket_strand), bucket) in &self.buckets {
            if chromosome.is_some_and(|c| c != chrom) || strand.is_some_and(|s| s != *bucket_strand) {
                continue;
            }
            for entry in bucket.contained(start, end) {
                if seen.insert(entry.entity) {
                    out.push(entry.entity);
                }
            }
        }
        out
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(|b| b.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn chromosomes(&self) -> impl Iterator<Item = (&str, Strand)> {
        self.buckets.keys().map(|(chrom, strand)| (chrom.as_str(), *strand))
    }
}
