//! A fully built release snapshot and the handle that publishes it
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::bio::{MatureSequence, Organism, Precursor, TaxonomyNode, TaxonomyTree};
use crate::index::IndexSet;
use crate::loader::{ReleaseCapabilities, ReleaseLoader, ReleaseRecords};
use crate::query::{ClusterDirection, ClusterEngine, QueryCriteria, QueryOutcome, Resolver};
use crate::store::EntityStore;
use crate::Result;

pub const PUBMED_URL: &str = "https://pubmed.ncbi.nlm.nih.gov";

/// Immutable store, indexes and taxonomy of one release
#[derive(Debug)]
pub struct Release {
    version: String,
    capabilities: ReleaseCapabilities,
    store: EntityStore,
    index: IndexSet,
    taxonomy: TaxonomyTree,
    loaded_at: DateTime<Utc>,
}

impl Release {
    pub fn build(records: ReleaseRecords) -> Result<Self> {
        let version = records.version.clone();
        let capabilities = records.capabilities;

        let store = EntityStore::build(records)?;
        let index = IndexSet::build(&store);
        let taxonomy = TaxonomyTree::from_organisms(store.organisms());
        tracing::debug!(depth = taxonomy.depth(), "Taxonomy tree built");

        Ok(Self {
            version,
            capabilities,
            store,
            index,
            taxonomy,
            loaded_at: Utc::now(),
        })
    }

    pub fn load(loader: &dyn ReleaseLoader) -> Result<Self> {
        Self::build(loader.load()?)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn capabilities(&self) -> ReleaseCapabilities {
        self.capabilities
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn index(&self) -> &IndexSet {
        &self.index
    }

    pub fn taxonomy(&self) -> &TaxonomyTree {
        &self.taxonomy
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.store, &self.index, &self.taxonomy)
    }

    pub fn precursors(&self, criteria: &QueryCriteria) -> Result<QueryOutcome<&Precursor>> {
        self.resolver().precursors(criteria)
    }

    pub fn matures(&self, criteria: &QueryCriteria) -> Result<QueryOutcome<&MatureSequence>> {
        self.resolver().matures(criteria)
    }

    pub fn cluster(&self, seed: &str, window: i64, direction: ClusterDirection) -> Result<Vec<&Precursor>> {
        ClusterEngine::new(&self.store, &self.index).cluster(seed, window, direction)
    }

    pub fn precursor(&self, id: &str) -> Result<&Precursor> {
        self.store.precursor(id)
    }

    pub fn mature(&self, id: &str) -> Result<&MatureSequence> {
        self.store.mature(id)
    }

    pub fn slice<S: AsRef<str>>(&self, path: &[S]) -> Result<&TaxonomyNode> {
        self.taxonomy.slice(path)
    }

    pub fn slice_organisms_at<S: AsRef<str>>(&self, path: &[S], rank: &str) -> Result<BTreeSet<String>> {
        self.taxonomy.slice_organisms_at(path, rank)
    }

    pub fn organisms(&self) -> Vec<&Organism> {
        self.store.organisms().collect()
    }

    /// Three-letter code -> latin name, in file order
    pub fn organism_codes(&self) -> IndexMap<&str, &str> {
        self.store
            .organisms()
            .map(|o| (o.code.as_str(), o.name.as_str()))
            .collect()
    }

    pub fn organism(&self, code_or_name: &str) -> Result<&Organism> {
        self.store.organism(code_or_name)
    }

    /// Taxonomy path per organism key; unknown keys are dropped
    pub fn taxonomy_of<S: AsRef<str>>(&self, organisms: &[S]) -> IndexMap<String, Vec<String>> {
        organisms
            .iter()
            .filter_map(|key| {
                let key = key.as_ref();
                self.store
                    .find_organism(key)
                    .map(|o| (key.to_string(), o.taxonomy.clone()))
            })
            .collect()
    }

    /// Codes of organisms whose taxonomy path contains `rank`
    pub fn organisms_at_rank(&self, rank: &str) -> Vec<&str> {
        self.store
            .organisms()
            .filter(|o| o.has_rank(rank))
            .map(|o| o.code.as_str())
            .collect()
    }

    /// NCBI taxonomy id per organism key; `None` where the release has none
    pub fn taxids<S: AsRef<str>>(&self, organisms: &[S]) -> IndexMap<String, Option<u32>> {
        organisms
            .iter()
            .filter_map(|key| {
                let key = key.as_ref();
                self.store.find_organism(key).map(|o| (key.to_string(), o.taxid))
            })
            .collect()
    }

    /// PubMed ids cited by the given precursors and by the precursors of the
    /// given matures, first citation order, no repeats
    pub fn references<S: AsRef<str>>(&self, precursor_ids: &[S], mature_ids: &[S], mature_names: &[S]) -> Vec<&str> {
        let mut precursors: Vec<&Precursor> = precursor_ids
            .iter()
            .filter_map(|id| self.store.precursors().get(id.as_ref()))
            .collect();

        let by_id = mature_ids.iter().filter_map(|id| self.store.matures().get(id.as_ref()));
        let by_name = mature_names.iter().flat_map(|name| {
            self.index
                .matures
                .by_name(name.as_ref())
                .iter()
                .filter_map(|&pos| self.store.matures().at(pos))
        });
        for mature in by_id.chain(by_name) {
            precursors.extend(self.store.precursors_of(mature));
        }

        let mut out: Vec<&str> = Vec::new();
        for precursor in precursors {
            for pmid in &precursor.references {
                if !out.contains(&pmid.as_str()) {
                    out.push(pmid);
                }
            }
        }
        out
    }

    pub fn pubmed_links<S: AsRef<str>>(&self, precursor_ids: &[S], mature_ids: &[S], mature_names: &[S]) -> Vec<String> {
        self.references(precursor_ids, mature_ids, mature_names)
            .into_iter()
            .map(|pmid| format!("{}/{}/", PUBMED_URL, pmid))
            .collect()
    }

    /// Precursor id -> dot-bracket for the requested ids and names; precursors
    /// without a structure are skipped
    pub fn structures<S: AsRef<str>>(&self, ids: &[S], names: &[S]) -> IndexMap<&str, &str> {
        let by_id = ids.iter().filter_map(|id| self.store.precursors().get(id.as_ref()));
        let by_name = names.iter().flat_map(|name| {
            self.index
                .precursors
                .by_name(name.as_ref())
                .iter()
                .filter_map(|&pos| self.store.precursors().at(pos))
        });
        by_id
            .chain(by_name)
            .filter_map(|p| p.structure.as_deref().map(|s| (p.id.as_str(), s)))
            .collect()
    }
}

/// Publishes the current release; readers take cheap `Arc` snapshots
#[derive(Debug)]
pub struct ReleaseHandle {
    current: RwLock<Arc<Release>>,
}

impl ReleaseHandle {
    pub fn new(release: Release) -> Self {
        Self {
            current: RwLock::new(Arc::new(release)),
        }
    }

    pub fn load(loader: &dyn ReleaseLoader) -> Result<Self> {
        Ok(Self::new(Release::load(loader)?))
    }

    pub fn snapshot(&self) -> Arc<Release> {
        Arc::clone(&self.current.read())
    }

    /// Build a new release off to the side and swap it in.
    ///
    /// On failure the previous release stays published and the error is
    /// returned.
    pub fn reload(&self, loader: &dyn ReleaseLoader) -> Result<Arc<Release>> {
        let fresh = Arc::new(Release::load(loader)?);
        let previous = {
            let mut current = self.current.write();
            std::mem::replace(&mut *current, Arc::clone(&fresh))
        };
        tracing::info!(
            "Switched release {} -> {}",
            previous.version(),
            fresh.version()
        );
        Ok(fresh)
    }

    pub fn publish(&self, release: Release) -> Arc<Release> {
        let release = Arc::new(release);
        *self.current.write() = Arc::clone(&release);
        release
    }
}
