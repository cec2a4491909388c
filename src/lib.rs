//! Minimum-spanning-tree clustering of planar points
//!
//! Points are joined into a spanning tree, the tree is cut at a weight
//! threshold, and the threshold is chosen by scoring the resulting
//! partitions with a cluster validity index (SD or SDbw).

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod pipeline;

pub use cluster::metrics::{ValidityIndex, ValidityResult};
pub use cluster::{Cluster, ClusterResult};
pub use config::Config;
pub use data::{Dissimilarity, DissimilarityMatrix, Euclidean, Planar, Point, Record};
pub use error::{ClusterError, Result};
pub use graph::{kruskal_mst, Edge, GraphMode, MinimumSpanningTree};
pub use pipeline::{build_cluster_at_threshold, cluster};
