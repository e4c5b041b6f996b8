use serde::{Deserialize, Serialize};
use std::fmt;

use super::{GenomicPlacement, Record};

/// Hairpin arm a mature product is excised from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arm {
    FivePrime,
    ThreePrime,
    /// Legacy releases name products without an arm suffix
    Undetermined,
}

impl Arm {
    /// Derive the arm from a product name such as "hsa-let-7a-5p"
    pub fn from_product_name(name: &str) -> Self {
        if name.ends_with("-5p") {
            Self::FivePrime
        } else if name.ends_with("-3p") {
            Self::ThreePrime
        } else {
            Self::Undetermined
        }
    }
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FivePrime => write!(f, "5p"),
            Self::ThreePrime => write!(f, "3p"),
            Self::Undetermined => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Evidence {
    Experimental(String),
    NotExperimental,
    Unknown,
}

impl Evidence {
    pub fn parse(evidence: &str, experiment: Option<&str>) -> Self {
        match evidence.trim() {
            "experimental" => Self::Experimental(experiment.unwrap_or_default().to_string()),
            "not_experimental" => Self::NotExperimental,
            _ => Self::Unknown,
        }
    }

    pub fn is_experimental(&self) -> bool {
        matches!(self, Self::Experimental(_))
    }
}

/// Where on one precursor a mature product sits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatureOrigin {
    pub precursor_id: String,
    /// 1-based inclusive span on the precursor sequence
    pub span: (usize, usize),
    pub evidence: Evidence,
}

/// Genomic locus of a mature product, scoped to the precursor locus it derives from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaturePlacement {
    pub precursor_id: String,
    pub locus: GenomicPlacement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatureSequence {
    pub id: String,
    pub name: String,
    pub sequence: String,
    pub arm: Arm,
    pub origins: Vec<MatureOrigin>,
    pub placements: Vec<MaturePlacement>,
    pub high_confidence: bool,
}

impl MatureSequence {
    pub fn new(id: impl Into<String>, name: impl Into<String>, sequence: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            arm: Arm::from_product_name(&name),
            name,
            sequence: sequence.into(),
            origins: Vec::new(),
            placements: Vec::new(),
            high_confidence: false,
        }
    }

    pub fn with_origin(mut self, precursor_id: impl Into<String>, span: (usize, usize)) -> Self {
        self.origins.push(MatureOrigin {
            precursor_id: precursor_id.into(),
            span,
            evidence: Evidence::Unknown,
        });
        self
    }

    pub fn with_placement(mut self, precursor_id: impl Into<String>, locus: GenomicPlacement) -> Self {
        self.placements.push(MaturePlacement {
            precursor_id: precursor_id.into(),
            locus,
        });
        self
    }

    pub fn with_high_confidence(mut self, high_confidence: bool) -> Self {
        self.high_confidence = high_confidence;
        self
    }

    /// Precursor accessions in origin order, without repeats
    pub fn precursor_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::with_capacity(self.origins.len());
        for origin in &self.origins {
            if !ids.contains(&origin.precursor_id.as_str()) {
                ids.push(&origin.precursor_id);
            }
        }
        ids
    }

    pub fn loci(&self) -> impl Iterator<Item = &GenomicPlacement> {
        self.placements.iter().map(|p| &p.locus)
    }
}

impl Record for MatureSequence {
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
