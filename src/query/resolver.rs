use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::criteria::{GenomicFilter, QueryCriteria};
use crate::bio::{MatureSequence, Precursor, Record, TaxonomyTree};
use crate::index::{IndexSet, RecordIndex};
use crate::store::{EntityStore, EntityTable};
use crate::Result;

/// Criteria category, also the key of a partitioned outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SearchCategory {
    #[serde(rename = "id-search")]
    Identifier,
    #[serde(rename = "name-search")]
    Name,
    #[serde(rename = "organism-search")]
    Organism,
    #[serde(rename = "tax-search")]
    Taxonomy,
    #[serde(rename = "related-search")]
    Related,
    /// Pre-intersection of several identity categories
    #[serde(rename = "identity-search")]
    Identity,
    #[serde(rename = "genomic-search")]
    Genomic,
}

impl SearchCategory {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Identifier => "id-search",
            Self::Name => "name-search",
            Self::Organism => "organism-search",
            Self::Taxonomy => "tax-search",
            Self::Related => "related-search",
            Self::Identity => "identity-search",
            Self::Genomic => "genomic-search",
        }
    }
}

impl fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Resolver result: one merged list, or per-category lists when the supplied
/// criteria cannot all hold for any single record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryOutcome<T> {
    Unified(Vec<T>),
    Partitioned(IndexMap<SearchCategory, Vec<T>>),
}

impl<T> QueryOutcome<T> {
    pub fn is_partitioned(&self) -> bool {
        matches!(self, Self::Partitioned(_))
    }

    /// True when nothing matched anywhere
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Unified(items) => items.is_empty(),
            Self::Partitioned(buckets) => buckets.values().all(Vec::is_empty),
        }
    }

    pub fn unified(&self) -> Option<&[T]> {
        match self {
            Self::Unified(items) => Some(items),
            Self::Partitioned(_) => None,
        }
    }

    pub fn partition(&self, category: SearchCategory) -> Option<&[T]> {
        match self {
            Self::Unified(_) => None,
            Self::Partitioned(buckets) => buckets.get(&category).map(Vec::as_slice),
        }
    }

    pub fn map<U, F>(self, mut f: F) -> QueryOutcome<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            Self::Unified(items) => QueryOutcome::Unified(items.into_iter().map(&mut f).collect()),
            Self::Partitioned(buckets) => QueryOutcome::Partitioned(
                buckets
                    .into_iter()
                    .map(|(category, items)| (category, items.into_iter().map(&mut f).collect()))
                    .collect(),
            ),
        }
    }

    /// Apply `f` to every list, unified or partitioned
    pub fn map_lists<F>(self, mut f: F) -> Self
    where
        F: FnMut(Vec<T>) -> Vec<T>,
    {
        match self {
            Self::Unified(items) => Self::Unified(f(items)),
            Self::Partitioned(buckets) => Self::Partitioned(
                buckets
                    .into_iter()
                    .map(|(category, items)| (category, f(items)))
                    .collect(),
            ),
        }
    }
}

/// Merge per-category position sets.
///
/// Identity categories are intersected; the genomic list, when present, then
/// restricts that intersection and fixes the output order. An empty combination
/// with some non-empty category is a contradiction and yields a partition.
pub fn combine(
    total: usize,
    identity: Vec<(SearchCategory, BTreeSet<usize>)>,
    genomic: Option<Vec<usize>>,
) -> QueryOutcome<usize> {
    if identity.is_empty() && genomic.is_none() {
        return QueryOutcome::Unified((0..total).collect());
    }

    let intersection = identity.iter().map(|(_, set)| set).fold(None, |acc: Option<BTreeSet<usize>>, set| {
        Some(match acc {
            None => set.clone(),
            Some(acc) => acc.intersection(set).copied().collect(),
        })
    });

    let combined: Vec<usize> = match (&intersection, &genomic) {
        (Some(set), Some(hits)) => hits.iter().copied().filter(|pos| set.contains(pos)).collect(),
        (Some(set), None) => set.iter().copied().collect(),
        (None, Some(hits)) => hits.clone(),
        (None, None) => Vec::new(),
    };
    if !combined.is_empty() {
        return QueryOutcome::Unified(combined);
    }

    let any_hits = identity.iter().any(|(_, set)| !set.is_empty())
        || genomic.as_ref().is_some_and(|hits| !hits.is_empty());
    if !any_hits {
        return QueryOutcome::Unified(Vec::new());
    }

    tracing::debug!(categories = identity.len() + usize::from(genomic.is_some()), "Contradicting criteria");

    let mut buckets: IndexMap<SearchCategory, Vec<usize>> = IndexMap::new();
    let identity_disjoint = identity.len() > 1 && intersection.as_ref().is_some_and(BTreeSet::is_empty);
    if identity_disjoint {
        for (category, set) in identity {
            buckets.insert(category, set.into_iter().collect());
        }
    } else if let Some(set) = intersection {
        let category = match identity.as_slice() {
            [(single, _)] => *single,
            _ => SearchCategory::Identity,
        };
        buckets.insert(category, set.into_iter().collect());
    }
    if let Some(hits) = genomic {
        buckets.insert(SearchCategory::Genomic, hits);
    }
    QueryOutcome::Partitioned(buckets)
}

/// Multi-criteria lookups against one loaded release
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    store: &'a EntityStore,
    index: &'a IndexSet,
    taxonomy: &'a TaxonomyTree,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a EntityStore, index: &'a IndexSet, taxonomy: &'a TaxonomyTree) -> Self {
        Self {
            store,
            index,
            taxonomy,
        }
    }

    pub fn precursors(&self, criteria: &QueryCriteria) -> Result<QueryOutcome<&'a Precursor>> {
        criteria.validate()?;
        let table = self.store.precursors();

        let related: Option<BTreeSet<usize>> = (!criteria.related.is_empty()).then(|| {
            criteria
                .related
                .iter()
                .filter_map(|id| self.store.matures().get(id))
                .flat_map(|mature| mature.precursor_ids())
                .filter_map(|id| table.position(id))
                .collect()
        });

        let outcome = self.resolve(table, &self.index.precursors, criteria, related);
        Ok(materialize(outcome, table))
    }

    pub fn matures(&self, criteria: &QueryCriteria) -> Result<QueryOutcome<&'a MatureSequence>> {
        criteria.validate()?;
        let table = self.store.matures();

        let related: Option<BTreeSet<usize>> = (!criteria.related.is_empty()).then(|| {
            criteria
                .related
                .iter()
                .filter_map(|id| self.store.precursors().get(id))
                .flat_map(|precursor| precursor.matures.iter())
                .filter_map(|id| table.position(id))
                .collect()
        });

        let outcome = self.resolve(table, &self.index.matures, criteria, related);
        Ok(materialize(outcome, table))
    }

    fn resolve<T: Record>(
        &self,
        table: &EntityTable<T>,
        index: &RecordIndex,
        criteria: &QueryCriteria,
        related: Option<BTreeSet<usize>>,
    ) -> QueryOutcome<usize> {
        let mut identity = Vec::new();

        if !criteria.ids.is_empty() {
            let hits: BTreeSet<usize> = criteria.ids.iter().filter_map(|id| table.position(id)).collect();
            identity.push((SearchCategory::Identifier, hits));
        }
        if !criteria.names.is_empty() {
            let hits = criteria
                .names
                .iter()
                .flat_map(|name| index.by_name(name).iter().copied())
                .collect();
            identity.push((SearchCategory::Name, hits));
        }
        if !criteria.organisms.is_empty() {
            let codes = criteria
                .organisms
                .iter()
                .filter_map(|key| self.store.organism_code(key));
            identity.push((SearchCategory::Organism, by_organisms(index, codes)));
        }
        if let Some(rank) = &criteria.rank {
            let names = self.taxonomy.get_organisms_at(rank);
            let codes = names.iter().filter_map(|name| self.store.organism_code(name));
            identity.push((SearchCategory::Taxonomy, by_organisms(index, codes)));
        }
        if let Some(hits) = related {
            identity.push((SearchCategory::Related, hits));
        }

        let genomic = criteria.genomic.as_ref().map(|filter| genomic_hits(index, filter));

        for (category, hits) in &identity {
            tracing::debug!(category = %category, hits = hits.len(), "Category resolved");
        }

        combine(table.len(), identity, genomic)
    }
}

fn by_organisms<'c>(index: &RecordIndex, codes: impl Iterator<Item = &'c str>) -> BTreeSet<usize> {
    codes
        .flat_map(|code| index.by_organism(code).iter().copied())
        .collect()
}

fn genomic_hits(index: &RecordIndex, filter: &GenomicFilter) -> Vec<usize> {
    index.genomic.contained(
        filter.chromosome.as_deref(),
        filter.strand,
        filter.lower_bound(),
        filter.end,
    )
}

fn materialize<'a, T: Record>(outcome: QueryOutcome<usize>, table: &'a EntityTable<T>) -> QueryOutcome<&'a T> {
    match outcome {
        QueryOutcome::Unified(positions) => {
            QueryOutcome::Unified(positions.into_iter().filter_map(|pos| table.at(pos)).collect())
        }
        QueryOutcome::Partitioned(buckets) => QueryOutcome::Partitioned(
            buckets
                .into_iter()
                .map(|(category, positions)| {
                    (category, positions.into_iter().filter_map(|pos| table.at(pos)).collect())
                })
                .collect(),
        ),
    }
}
