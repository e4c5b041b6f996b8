//! Read-only lookup structures built once over an entity store
pub mod genomic;

pub use genomic::{GenomicEntry, GenomicIndex};

use std::collections::HashMap;

use crate::store::EntityStore;

/// Name, organism and genomic lookups for one record kind.
///
/// Identifier lookup is served by the entity table itself; every value here is
/// a position into that table.
#[derive(Debug, Clone, Default)]
pub struct RecordIndex {
    names: HashMap<String, Vec<usize>>,
    organisms: HashMap<String, Vec<usize>>,
    pub genomic: GenomicIndex,
}

impl RecordIndex {
    /// Positions carrying `name`, in identifier order
    pub fn by_name(&self, name: &str) -> &[usize] {
        self.names.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Positions belonging to the organism with three-letter `code`
    pub fn by_organism(&self, code: &str) -> &[usize] {
        self.organisms.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    pub fn organism_count(&self) -> usize {
        self.organisms.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct IndexSet {
    pub precursors: RecordIndex,
    pub matures: RecordIndex,
}

impl IndexSet {
    pub fn build(store: &EntityStore) -> Self {
        let precursors = build_precursor_index(store);
        let matures = build_mature_index(store);

        tracing::debug!(
            precursor_names = precursors.name_count(),
            precursor_buckets = precursors.genomic.bucket_count(),
            mature_names = matures.name_count(),
            mature_buckets = matures.genomic.bucket_count(),
            "Indexes built"
        );

        Self { precursors, matures }
    }
}

fn build_precursor_index(store: &EntityStore) -> RecordIndex {
    let table = store.precursors();
    let mut names: HashMap<String, Vec<usize>> = HashMap::new();
    let mut organisms: HashMap<String, Vec<usize>> = HashMap::new();

    for (pos, precursor) in table.enumerate() {
        names.entry(precursor.name.clone()).or_default().push(pos);
        organisms.entry(precursor.organism.clone()).or_default().push(pos);
    }

    let genomic = GenomicIndex::build(
        table
            .enumerate()
            .flat_map(|(pos, p)| p.placements.iter().map(move |locus| (pos, locus))),
    );

    RecordIndex {
        names,
        organisms,
        genomic,
    }
}

fn build_mature_index(store: &EntityStore) -> RecordIndex {
    let table = store.matures();
    let mut names: HashMap<String, Vec<usize>> = HashMap::new();
    let mut organisms: HashMap<String, Vec<usize>> = HashMap::new();

    for (pos, mature) in table.enumerate() {
        names.entry(mature.name.clone()).or_default().push(pos);
        for organism in store.organisms_of_mature(mature) {
            organisms.entry(organism.code.clone()).or_default().push(pos);
        }
    }

    let genomic = GenomicIndex::build(
        table
            .enumerate()
            .flat_map(|(pos, m)| m.loci().map(move |locus| (pos, locus))),
    );

    RecordIndex {
        names,
        organisms,
        genomic,
    }
}
