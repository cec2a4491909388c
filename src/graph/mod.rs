//! Candidate graph, spanning tree and cut-tree adjacency

pub mod algorithms;
pub mod builder;
pub mod compressed;

use serde::{Deserialize, Serialize};

pub use algorithms::{kruskal_mst, DisjointSets, MinimumSpanningTree};
pub use builder::{GraphBuilder, GraphMode};
pub use compressed::CompressedGraph;

/// Weighted undirected edge between two vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub v0: usize,
    pub v1: usize,
    pub w: f64,
}

impl Edge {
    pub fn new(v0: usize, v1: usize, w: f64) -> Self {
        Self { v0, v1, w }
    }
}
