//! Spanning tree construction

use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, Result};
use crate::graph::Edge;

/// Union-Find over vertex indices, used to track Kruskal's trees
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of vertex i)
    parent: Vec<usize>,

    /// Size of each set, valid at roots (for union by size)
    size: Vec<usize>,
}

impl DisjointSets {
    /// Create `n` singleton sets
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merge the sets containing x and y; false if they were already joined
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false;
        }

        // Attach smaller tree under root of larger tree
        if self.size[root_x] >= self.size[root_y] {
            self.parent[root_y] = root_x;
            self.size[root_x] += self.size[root_y];
        } else {
            self.parent[root_x] = root_y;
            self.size[root_y] += self.size[root_x];
        }

        true
    }

    /// Get the size of the set containing x
    pub fn set_size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root]
    }
}

/// Minimum spanning tree over `node_count` vertices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimumSpanningTree {
    pub node_count: usize,

    /// Accepted edges, in ascending weight order
    pub edges: Vec<Edge>,
}

impl MinimumSpanningTree {
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.w).sum()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.edges.iter().map(|e| e.w).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Kruskal's algorithm over an unsorted candidate edge list.
///
/// Edges are sorted stably by weight, so ties keep their insertion order.
/// The candidate graph must be connected: if the list runs out before
/// `node_count - 1` edges are accepted the call fails with
/// [`ClusterError::DisconnectedGraph`] and no partial forest is returned.
pub fn kruskal_mst(node_count: usize, mut edges: Vec<Edge>) -> Result<MinimumSpanningTree> {
    if node_count <= 1 {
        return Ok(MinimumSpanningTree {
            node_count,
            edges: Vec::new(),
        });
    }

    for edge in &edges {
        for vertex in [edge.v0, edge.v1] {
            if vertex >= node_count {
                return Err(ClusterError::VertexOutOfRange { vertex, node_count });
            }
        }
    }

    edges.sort_by(|a, b| a.w.total_cmp(&b.w));

    let required = node_count - 1;
    let mut sets = DisjointSets::new(node_count);
    let mut accepted = Vec::with_capacity(required);

    for edge in edges {
        if sets.union(edge.v0, edge.v1) {
            accepted.push(edge);
            if accepted.len() == required {
                break;
            }
        }
    }

    if accepted.len() < required {
        log::error!(
            "Candidate graph is disconnected: {} of {} spanning edges",
            accepted.len(),
            required
        );
        return Err(ClusterError::disconnected(accepted.len(), required));
    }

    Ok(MinimumSpanningTree {
        node_count,
        edges: accepted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disjoint_sets() {
        let mut sets = DisjointSets::new(5);
        assert!(sets.union(0, 1));
        assert!(sets.union(3, 4));
        assert!(!sets.union(1, 0));
        assert!(sets.union(1, 4));

        assert_eq!(sets.find(0), sets.find(3));
        assert_ne!(sets.find(0), sets.find(2));
        assert_eq!(sets.set_size(4), 4);
        assert_eq!(sets.set_size(2), 1);
    }

    #[test]
    fn test_seven_vertices() {
        let edges = vec![
            Edge::new(0, 1, 7.0),
            Edge::new(0, 3, 5.0),
            Edge::new(1, 2, 8.0),
            Edge::new(1, 3, 9.0),
            Edge::new(1, 4, 7.0),
            Edge::new(2, 4, 5.0),
            Edge::new(3, 4, 15.0),
            Edge::new(3, 5, 6.0),
            Edge::new(4, 5, 8.0),
            Edge::new(4, 6, 9.0),
            Edge::new(5, 6, 11.0),
        ];

        let mst = kruskal_mst(7, edges).unwrap();
        assert_eq!(mst.edges.len(), 6);
        assert_eq!(mst.total_weight(), 39.0);
        assert_eq!(
            mst.edges,
            vec![
                Edge::new(0, 3, 5.0),
                Edge::new(2, 4, 5.0),
                Edge::new(3, 5, 6.0),
                Edge::new(0, 1, 7.0),
                Edge::new(1, 4, 7.0),
                Edge::new(4, 6, 9.0),
            ]
        );
    }

    #[test]
    fn test_weights_are_ascending() {
        let edges = vec![
            Edge::new(0, 1, 3.0),
            Edge::new(1, 2, 1.0),
            Edge::new(0, 2, 2.0),
            Edge::new(2, 3, 0.5),
        ];
        let weights = kruskal_mst(4, edges).unwrap().weights();
        assert_eq!(weights, vec![0.5, 1.0, 2.0]);
    }

    #[test]
    fn test_disconnected_graph_fails() {
        let edges = vec![Edge::new(0, 1, 1.0), Edge::new(2, 3, 1.0)];
        assert_eq!(
            kruskal_mst(4, edges),
            Err(ClusterError::DisconnectedGraph {
                accepted: 2,
                required: 3
            })
        );
    }

    #[test]
    fn test_out_of_range_vertex() {
        let edges = vec![Edge::new(0, 9, 1.0)];
        assert!(matches!(
            kruskal_mst(2, edges),
            Err(ClusterError::VertexOutOfRange { vertex: 9, node_count: 2 })
        ));
    }

    #[test]
    fn test_degenerate_sizes() {
        assert!(kruskal_mst(0, Vec::new()).unwrap().is_empty());
        assert!(kruskal_mst(1, Vec::new()).unwrap().is_empty());
    }
}
