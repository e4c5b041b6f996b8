//! Rank hierarchy of the organisms present in a release
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, BTreeSet};

use super::Organism;
use crate::{MirusError, Result};

/// Key under which organisms at a rank appear in the serialised tree
pub const ORGANISMS_KEY: &str = "@organisms";

/// One rank of the tree.
///
/// A node with sub-ranks may also list organisms placed directly at that rank,
/// so `Ranks` carries both; `Organisms` is a rank with nothing below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyNode {
    Ranks {
        children: BTreeMap<String, TaxonomyNode>,
        organisms: BTreeSet<String>,
    },
    Organisms(BTreeSet<String>),
}

impl Default for TaxonomyNode {
    fn default() -> Self {
        Self::Ranks {
            children: BTreeMap::new(),
            organisms: BTreeSet::new(),
        }
    }
}

impl TaxonomyNode {
    /// Organisms placed at exactly this rank
    pub fn organisms(&self) -> &BTreeSet<String> {
        match self {
            Self::Ranks { organisms, .. } => organisms,
            Self::Organisms(organisms) => organisms,
        }
    }

    pub fn children(&self) -> Option<&BTreeMap<String, TaxonomyNode>> {
        match self {
            Self::Ranks { children, .. } => Some(children),
            Self::Organisms(_) => None,
        }
    }

    pub fn child(&self, rank: &str) -> Option<&TaxonomyNode> {
        self.children().and_then(|children| children.get(rank))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Organisms(_))
    }

    /// Every organism in this subtree
    pub fn all_organisms(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_organisms(&mut out);
        out
    }

    /// Organisms at or below every rank named `rank` inside this subtree
    pub fn organisms_at(&self, rank: &str) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_at(rank, &mut out);
        out
    }

    /// Number of rank levels below this node
    pub fn depth(&self) -> usize {
        self.children()
            .map(|children| children.values().map(|c| c.depth() + 1).max().unwrap_or(0))
            .unwrap_or(0)
    }

    fn collect_organisms(&self, out: &mut BTreeSet<String>) {
        out.extend(self.organisms().iter().cloned());
        if let Some(children) = self.children() {
            for child in children.values() {
                child.collect_organisms(out);
            }
        }
    }

    fn collect_at(&self, rank: &str, out: &mut BTreeSet<String>) {
        let Some(children) = self.children() else {
            return;
        };
        for (name, child) in children {
            if name == rank {
                child.collect_organisms(out);
            } else {
                child.collect_at(rank, out);
            }
        }
    }

    fn descend_or_create(&mut self, rank: &str) -> &mut TaxonomyNode {
        if let Self::Organisms(organisms) = self {
            let organisms = std::mem::take(organisms);
            *self = Self::Ranks {
                children: BTreeMap::new(),
                organisms,
            };
        }
        match self {
            Self::Ranks { children, .. } => children
                .entry(rank.to_string())
                .or_insert_with(|| Self::Organisms(BTreeSet::new())),
            Self::Organisms(_) => unreachable!("converted to Ranks above"),
        }
    }

    fn add_organism(&mut self, name: &str) {
        match self {
            Self::Ranks { organisms, .. } => organisms.insert(name.to_string()),
            Self::Organisms(organisms) => organisms.insert(name.to_string()),
        };
    }
}

impl Serialize for TaxonomyNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let children = self.children();
        let organisms = self.organisms();
        let len = children.map(BTreeMap::len).unwrap_or(0) + usize::from(!organisms.is_empty());

        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(children) = children {
            for (rank, child) in children {
                map.serialize_entry(rank, child)?;
            }
        }
        if !organisms.is_empty() {
            map.serialize_entry(ORGANISMS_KEY, organisms)?;
        }
        map.end()
    }
}

/// Taxonomy built once from every organism's rank path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyTree {
    root: TaxonomyNode,
}

impl TaxonomyTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_organisms<'a, I>(organisms: I) -> Self
    where
        I: IntoIterator<Item = &'a Organism>,
    {
        let mut tree = Self::new();
        for organism in organisms {
            tree.insert(organism.taxonomy.as_slice(), &organism.name);
        }
        tree
    }

    /// Insert a rank path ending in `organism`; repeating a path is a no-op
    pub fn insert<S: AsRef<str>>(&mut self, path: &[S], organism: &str) {
        let mut node = &mut self.root;
        for rank in path {
            node = node.descend_or_create(rank.as_ref());
        }
        node.add_organism(organism);
    }

    pub fn root(&self) -> &TaxonomyNode {
        &self.root
    }

    /// All organism names at or below any rank called `rank`
    pub fn get_organisms_at(&self, rank: &str) -> BTreeSet<String> {
        self.root.organisms_at(rank)
    }

    /// Descend from the root one rank at a time
    pub fn slice<S: AsRef<str>>(&self, path: &[S]) -> Result<&TaxonomyNode> {
        let mut node = &self.root;
        for rank in path {
            node = node.child(rank.as_ref()).ok_or_else(|| {
                MirusError::PathNotFound(path.iter().map(|r| r.as_ref().to_string()).collect())
            })?;
        }
        Ok(node)
    }

    /// Organisms at or below `rank` inside the subtree at `path`.
    ///
    /// The slice root counts as a match when `rank` names it, so asking for
    /// the last rank of the path yields the whole slice.
    pub fn slice_organisms_at<S: AsRef<str>>(&self, path: &[S], rank: &str) -> Result<BTreeSet<String>> {
        let node = self.slice(path)?;
        match path.last() {
            Some(last) if last.as_ref() == rank => Ok(node.all_organisms()),
            _ => Ok(node.organisms_at(rank)),
        }
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn is_empty(&self) -> bool {
        self.root.organisms().is_empty()
            && self.root.children().map(BTreeMap::is_empty).unwrap_or(true)
    }
}

impl Serialize for TaxonomyTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}
