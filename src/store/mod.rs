//! Canonical entity set of one loaded release
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

use crate::bio::{GenomicPlacement, MatureSequence, Organism, Precursor, Record};
use crate::loader::ReleaseRecords;
use crate::{MirusError, Result};

/// Records keyed by identifier, iterated in identifier order.
///
/// Positions into the table are stable for the lifetime of the release and are
/// what the index layer stores.
#[derive(Debug, Clone)]
pub struct EntityTable<T> {
    records: IndexMap<String, T>,
}

impl<T: Record> EntityTable<T> {
    fn build(records: Vec<T>, kind: &str) -> Result<Self> {
        let mut table = IndexMap::with_capacity(records.len());
        for record in records {
            let id = record.id().to_string();
            if id.is_empty() {
                return Err(MirusError::Integrity(format!(
                    "{} '{}' has an empty identifier",
                    kind,
                    record.name()
                )));
            }
            if table.contains_key(&id) {
                return Err(MirusError::Integrity(format!(
                    "duplicate {} identifier {}",
                    kind, id
                )));
            }
            table.insert(id, record);
        }
        table.sort_keys();
        Ok(Self { records: table })
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.get(id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.records.get_index_of(id)
    }

    pub fn at(&self, position: usize) -> Option<&T> {
        self.records.get_index(position).map(|(_, record)| record)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.values()
    }

    /// `(position, record)` pairs in identifier order
    pub fn enumerate(&self) -> impl Iterator<Item = (usize, &T)> {
        self.records.values().enumerate()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct EntityStore {
    organisms: IndexMap<String, Organism>,
    organism_names: HashMap<String, String>,
    precursors: EntityTable<Precursor>,
    matures: EntityTable<MatureSequence>,
}

impl EntityStore {
    /// Validate loader output and take ownership of it
    pub fn build(records: ReleaseRecords) -> Result<Self> {
        let ReleaseRecords {
            organisms: organism_list,
            precursors,
            matures,
            ..
        } = records;

        let mut organisms = IndexMap::with_capacity(organism_list.len());
        let mut organism_names = HashMap::with_capacity(organism_list.len());
        for organism in organism_list {
            if organisms.contains_key(&organism.code) {
                return Err(MirusError::Integrity(format!(
                    "duplicate organism code {}",
                    organism.code
                )));
            }
            if let Some(existing) = organism_names.insert(organism.name.clone(), organism.code.clone()) {
                return Err(MirusError::Integrity(format!(
                    "organism name '{}' used by both {} and {}",
                    organism.name, existing, organism.code
                )));
            }
            organisms.insert(organism.code.clone(), organism);
        }

        let precursors = EntityTable::build(precursors, "precursor")?;
        let matures = EntityTable::build(matures, "mature")?;

        let store = Self {
            organisms,
            organism_names,
            precursors,
            matures,
        };
        store.check_references()?;

        tracing::info!(
            organisms = store.organisms.len(),
            precursors = store.precursors.len(),
            matures = store.matures.len(),
            "Entity store built"
        );
        Ok(store)
    }

    fn check_references(&self) -> Result<()> {
        let mut names = HashSet::with_capacity(self.precursors.len());
        for precursor in self.precursors.iter() {
            if !names.insert(precursor.name.as_str()) {
                return Err(MirusError::Integrity(format!(
                    "precursor name {} is not unique",
                    precursor.name
                )));
            }
            if !self.organisms.contains_key(&precursor.organism) {
                return Err(MirusError::Integrity(format!(
                    "precursor {} references unknown organism {}",
                    precursor.id, precursor.organism
                )));
            }
            for mature_id in &precursor.matures {
                if !self.matures.contains(mature_id) {
                    return Err(MirusError::Integrity(format!(
                        "precursor {} lists unknown mature {}",
                        precursor.id, mature_id
                    )));
                }
            }
            check_placements(&precursor.id, &precursor.placements)?;
        }

        for mature in self.matures.iter() {
            if mature.origins.is_empty() {
                return Err(MirusError::Integrity(format!(
                    "mature {} has no originating precursor",
                    mature.id
                )));
            }
            for origin in &mature.origins {
                if !self.precursors.contains(&origin.precursor_id) {
                    return Err(MirusError::Integrity(format!(
                        "mature {} derives from unknown precursor {}",
                        mature.id, origin.precursor_id
                    )));
                }
            }
            for placement in &mature.placements {
                if !self.precursors.contains(&placement.precursor_id) {
                    return Err(MirusError::Integrity(format!(
                        "mature {} placed on unknown precursor {}",
                        mature.id, placement.precursor_id
                    )));
                }
            }
            let loci: Vec<GenomicPlacement> = mature.loci().cloned().collect();
            check_placements(&mature.id, &loci)?;
        }
        Ok(())
    }

    pub fn precursors(&self) -> &EntityTable<Precursor> {
        &self.precursors
    }

    pub fn matures(&self) -> &EntityTable<MatureSequence> {
        &self.matures
    }

    pub fn organisms(&self) -> impl Iterator<Item = &Organism> {
        self.organisms.values()
    }

    pub fn organism_count(&self) -> usize {
        self.organisms.len()
    }

    pub fn precursor(&self, id: &str) -> Result<&Precursor> {
        self.precursors
            .get(id)
            .ok_or_else(|| MirusError::NotFound(format!("precursor {}", id)))
    }

    pub fn mature(&self, id: &str) -> Result<&MatureSequence> {
        self.matures
            .get(id)
            .ok_or_else(|| MirusError::NotFound(format!("mature sequence {}", id)))
    }

    /// Look an organism up by three-letter code or latin name
    pub fn organism(&self, key: &str) -> Result<&Organism> {
        self.find_organism(key)
            .ok_or_else(|| MirusError::NotFound(format!("organism {}", key)))
    }

    pub fn find_organism(&self, key: &str) -> Option<&Organism> {
        self.organisms.get(key).or_else(|| {
            self.organism_names
                .get(key)
                .and_then(|code| self.organisms.get(code))
        })
    }

    pub fn organism_code(&self, key: &str) -> Option<&str> {
        self.find_organism(key).map(|o| o.code.as_str())
    }

    /// Organisms of a mature sequence, reached through its precursors
    pub fn organisms_of_mature(&self, mature: &MatureSequence) -> Vec<&Organism> {
        let mut out: Vec<&Organism> = Vec::new();
        for precursor_id in mature.precursor_ids() {
            if let Some(organism) = self
                .precursors
                .get(precursor_id)
                .and_then(|p| self.organisms.get(&p.organism))
            {
                if !out.iter().any(|o| o.code == organism.code) {
                    out.push(organism);
                }
            }
        }
        out
    }

    pub fn precursors_of(&self, mature: &MatureSequence) -> Vec<&Precursor> {
        mature
            .precursor_ids()
            .into_iter()
            .filter_map(|id| self.precursors.get(id))
            .collect()
    }
}

fn check_placements(owner: &str, placements: &[GenomicPlacement]) -> Result<()> {
    for placement in placements {
        if placement.chromosome.is_empty() || placement.end < placement.start {
            return Err(MirusError::Integrity(format!(
                "{} has malformed placement {}",
                owner, placement
            )));
        }
    }
    Ok(())
}
