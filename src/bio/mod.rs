pub mod locus;
pub mod mature;
pub mod organism;
pub mod precursor;
pub mod taxonomy;

pub use locus::{GenomicPlacement, Strand};
pub use mature::{Arm, Evidence, MatureOrigin, MaturePlacement, MatureSequence};
pub use organism::Organism;
pub use precursor::Precursor;
pub use taxonomy::{TaxonomyNode, TaxonomyTree};

/// Attributes shared by every record the index layer and resolver can serve.
pub trait Record {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn high_confidence(&self) -> bool;
}
