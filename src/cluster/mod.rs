//! Cluster extraction, scoring and threshold search

pub mod detection;
pub mod metrics;
pub mod optimizer;

use serde::{Deserialize, Serialize};

use crate::cluster::metrics::{ValidityIndex, ValidityResult};

/// One member of a partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// Position of this cluster in the partition
    pub id: u32,

    /// Members of this cluster (vertex indices, ascending)
    pub members: Vec<usize>,

    /// Size of the cluster
    pub size: usize,
}

impl Cluster {
    /// Create a cluster, sorting its members
    pub fn new(id: u32, mut members: Vec<usize>) -> Self {
        members.sort_unstable();
        Self {
            id,
            size: members.len(),
            members,
        }
    }

    pub fn contains(&self, vertex: usize) -> bool {
        self.members.binary_search(&vertex).is_ok()
    }
}

/// Outcome of an automatic clustering run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterResult {
    /// Partition at the selected threshold
    pub clusters: Vec<Cluster>,

    /// Selected cut threshold
    pub threshold: f64,

    /// Index used to pick the threshold
    pub index: ValidityIndex,

    /// Score of the selected partition
    pub score: ValidityResult,
}

impl ClusterResult {
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Cluster label per vertex, for callers that colour points
    pub fn labels(&self, node_count: usize) -> Vec<Option<u32>> {
        let mut labels = vec![None; node_count];
        for cluster in &self.clusters {
            for &member in &cluster.members {
                if let Some(slot) = labels.get_mut(member) {
                    *slot = Some(cluster.id);
                }
            }
        }
        labels
    }
}
