//! Compact adjacency for a spanning tree cut at a threshold

use crate::graph::MinimumSpanningTree;

/// Compressed sparse row adjacency of the tree edges that survive a cut.
///
/// Each surviving edge is stored in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedGraph {
    /// Number of vertices in the graph
    pub node_count: usize,

    /// Offset array: neighbours of vertex i are `targets[offsets[i]..offsets[i+1]]`
    pub offsets: Vec<usize>,

    /// Concatenated neighbour lists
    pub targets: Vec<usize>,
}

impl CompressedGraph {
    /// Keep the tree edges with weight `<= threshold`
    pub fn from_tree(tree: &MinimumSpanningTree, threshold: f64) -> Self {
        let node_count = tree.node_count;
        let kept: Vec<(usize, usize)> = tree
            .edges
            .iter()
            .filter(|e| e.w <= threshold)
            .map(|e| (e.v0, e.v1))
            .collect();

        let mut degrees = vec![0usize; node_count];
        for &(a, b) in &kept {
            degrees[a] += 1;
            degrees[b] += 1;
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        let mut offset = 0;
        for &degree in &degrees {
            offset += degree;
            offsets.push(offset);
        }

        let mut targets = vec![0usize; offset];
        let mut cursor: Vec<usize> = offsets[..node_count].to_vec();
        for &(a, b) in &kept {
            targets[cursor[a]] = b;
            cursor[a] += 1;
            targets[cursor[b]] = a;
            cursor[b] += 1;
        }

        Self {
            node_count,
            offsets,
            targets,
        }
    }

    /// Neighbours of a vertex
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.targets[self.offsets[node]..self.offsets[node + 1]]
    }

    /// Number of surviving edges touching a vertex
    pub fn degree(&self, node: usize) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }

    /// Number of undirected edges kept
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }
}
