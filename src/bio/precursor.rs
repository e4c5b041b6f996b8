use serde::{Deserialize, Serialize};

use super::{GenomicPlacement, Record};

/// A stem-loop record from miRNA.dat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precursor {
    pub id: String,
    pub name: String,
    /// Dot-bracket secondary structure; `None` when the release ships no miRNA.str
    pub structure: Option<String>,
    pub sequence: String,
    /// Organism code
    pub organism: String,
    pub placements: Vec<GenomicPlacement>,
    pub high_confidence: bool,
    /// PubMed identifiers in citation order
    pub references: Vec<String>,
    /// Mature accessions in feature order
    pub matures: Vec<String>,
}

impl Precursor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        organism: impl Into<String>,
        sequence: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            structure: None,
            sequence: sequence.into(),
            organism: organism.into(),
            placements: Vec::new(),
            high_confidence: false,
            references: Vec::new(),
            matures: Vec::new(),
        }
    }

    pub fn with_placement(mut self, placement: GenomicPlacement) -> Self {
        self.placements.push(placement);
        self
    }

    pub fn with_matures<I, S>(mut self, matures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matures = matures.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_references<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references = references.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_structure(mut self, structure: impl Into<String>) -> Self {
        self.structure = Some(structure.into());
        self
    }

    pub fn with_high_confidence(mut self, high_confidence: bool) -> Self {
        self.high_confidence = high_confidence;
        self
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Cut a 1-based inclusive span out of the hairpin sequence
    pub fn subsequence(&self, start: usize, end: usize) -> Option<&str> {
        if start == 0 || end < start || end > self.sequence.len() {
            return None;
        }
        self.sequence.get(start - 1..end)
    }
}

impl Record for Precursor {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn high_confidence(&self) -> bool {
        self.high_confidence
    }
}
