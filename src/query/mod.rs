//! Query surfaces over a loaded release: multi-criteria resolution, genomic
//! clustering and high-confidence filtering
pub mod cluster;
pub mod criteria;
pub mod quality;
pub mod resolver;

pub use cluster::{ClusterDirection, ClusterEngine};
pub use criteria::{GenomicFilter, QueryCriteria};
pub use resolver::{QueryOutcome, Resolver, SearchCategory};

use crate::bio::Record;

impl<'a, T: Record> QueryOutcome<&'a T> {
    /// Quality filter applied to every list of the outcome
    pub fn high_confidence(self, target: bool) -> Self {
        self.map_lists(|items| quality::filter(items, target))
    }
}
