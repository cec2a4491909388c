//! Connected components of a cut spanning tree

use std::collections::VecDeque;

use crate::cluster::Cluster;
use crate::graph::{CompressedGraph, MinimumSpanningTree};

/// Partition the tree's vertices at `threshold`.
///
/// Two vertices share a cluster iff a path of tree edges with weight
/// `<= threshold` joins them. Clusters are numbered in order of their
/// smallest member, so the output is deterministic for a given tree.
pub fn clusters_at_threshold(tree: &MinimumSpanningTree, threshold: f64) -> Vec<Cluster> {
    let graph = CompressedGraph::from_tree(tree, threshold);
    find_connected_components(&graph)
}

/// Breadth-first component search over a compressed adjacency
pub fn find_connected_components(graph: &CompressedGraph) -> Vec<Cluster> {
    let node_count = graph.node_count;
    let mut visited = vec![false; node_count];
    let mut clusters = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..node_count {
        if visited[start] {
            continue;
        }

        visited[start] = true;
        queue.push_back(start);
        let mut members = Vec::new();

        while let Some(node) = queue.pop_front() {
            members.push(node);
            for &next in graph.neighbors(node) {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        clusters.push(Cluster::new(clusters.len() as u32, members));
    }

    log::trace!(
        "Found {} components over {} kept edges",
        clusters.len(),
        graph.edge_count()
    );

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn tree() -> MinimumSpanningTree {
        // 0 -1- 1 -4- 2 -1- 3    4 hangs off 0 with weight 9
        MinimumSpanningTree {
            node_count: 5,
            edges: vec![
                Edge::new(0, 1, 1.0),
                Edge::new(2, 3, 1.0),
                Edge::new(1, 2, 4.0),
                Edge::new(0, 4, 9.0),
            ],
        }
    }

    fn member_lists(clusters: &[Cluster]) -> Vec<Vec<usize>> {
        clusters.iter().map(|c| c.members.clone()).collect()
    }

    #[test]
    fn test_cut_between_pairs() {
        let clusters = clusters_at_threshold(&tree(), 2.0);
        assert_eq!(member_lists(&clusters), vec![vec![0, 1], vec![2, 3], vec![4]]);
        assert_eq!(clusters[2].id, 2);
    }

    #[test]
    fn test_everything_below_threshold() {
        let clusters = clusters_at_threshold(&tree(), 9.0);
        assert_eq!(member_lists(&clusters), vec![vec![0, 1, 2, 3, 4]]);
    }

    #[test]
    fn test_all_singletons() {
        let clusters = clusters_at_threshold(&tree(), 0.5);
        assert_eq!(clusters.len(), 5);
        assert!(clusters.iter().all(|c| c.size == 1));
    }

    #[test]
    fn test_empty_tree() {
        let empty = MinimumSpanningTree {
            node_count: 0,
            edges: Vec::new(),
        };
        assert!(clusters_at_threshold(&empty, 1.0).is_empty());

        let single = MinimumSpanningTree {
            node_count: 1,
            edges: Vec::new(),
        };
        assert_eq!(member_lists(&clusters_at_threshold(&single, 1.0)), vec![vec![0]]);
    }
}
