//! Candidate edge construction

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::data::dissimilarity::{checked_between, Dissimilarity};
use crate::data::points::Planar;
use crate::error::{ClusterError, Result};
use crate::graph::Edge;

/// How candidate edges are enumerated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GraphMode {
    /// Every pair is measured; non-hub edges above the threshold are dropped
    FullMatrix,

    /// Vertices are swept in x order and a pair is only measured while
    /// `dx <= threshold`
    SortedSweep,
}

/// Builds the candidate edge list handed to Kruskal.
///
/// Vertex 0 is a hub: every edge incident to it is kept regardless of the
/// threshold, so the candidate graph is always connected.
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder {
    mode: GraphMode,
    threshold: f64,
}

impl GraphBuilder {
    /// Create a builder with a non-hub edge cap
    pub fn new(mode: GraphMode, threshold: f64) -> Self {
        Self { mode, threshold }
    }

    /// Builder that keeps every pair (complete graph)
    pub fn complete() -> Self {
        Self::new(GraphMode::FullMatrix, f64::INFINITY)
    }

    /// Build the candidate edges for `points`
    pub fn build<P, D>(&self, points: &[P], dissimilarity: &D) -> Result<Vec<Edge>>
    where
        P: Planar,
        D: Dissimilarity<P> + ?Sized,
    {
        if self.threshold.is_nan() || self.threshold < 0.0 {
            return Err(ClusterError::invalid_parameter(format!(
                "edge threshold must be non-negative, got {}",
                self.threshold
            )));
        }

        let edges = match self.mode {
            GraphMode::FullMatrix => self.build_full(points, dissimilarity)?,
            GraphMode::SortedSweep => self.build_sorted(points, dissimilarity)?,
        };

        log::debug!(
            "Built {} candidate edges for {} vertices ({:?})",
            edges.len(),
            points.len(),
            self.mode
        );

        Ok(edges)
    }

    fn build_full<P, D>(&self, points: &[P], dissimilarity: &D) -> Result<Vec<Edge>>
    where
        D: Dissimilarity<P> + ?Sized,
    {
        let n = points.len();
        let mut edges = Vec::with_capacity(n.saturating_sub(1));

        for i in 0..n {
            for j in (i + 1)..n {
                let w = checked_between(dissimilarity, points, i, j)?;
                if i == 0 || w <= self.threshold {
                    edges.push(Edge::new(i, j, w));
                }
            }
        }

        Ok(edges)
    }

    fn build_sorted<P, D>(&self, points: &[P], dissimilarity: &D) -> Result<Vec<Edge>>
    where
        P: Planar,
        D: Dissimilarity<P> + ?Sized,
    {
        if !dissimilarity.bounded_by_dx() {
            return Err(ClusterError::invalid_parameter(
                "sorted sweep needs a dissimilarity bounded below by |dx|",
            ));
        }

        let n = points.len();
        let mut edges = Vec::with_capacity(n.saturating_sub(1));

        // Hub edges first
        for j in 1..n {
            let w = checked_between(dissimilarity, points, 0, j)?;
            edges.push(Edge::new(0, j, w));
        }

        let mut order: Vec<usize> = (1..n).collect();
        order.sort_by(|&a, &b| points[a].x().total_cmp(&points[b].x()));

        for (pos, &a) in order.iter().enumerate() {
            let xa = points[a].x();
            for &b in &order[pos + 1..] {
                if points[b].x() - xa > self.threshold {
                    break;
                }
                let w = checked_between(dissimilarity, points, a, b)?;
                if w <= self.threshold {
                    edges.push(Edge::new(a.min(b), a.max(b), w));
                }
            }
        }

        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dissimilarity::{DissimilarityMatrix, Euclidean};
    use crate::data::points::Point;

    fn two_pairs() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 11.0),
        ]
    }

    fn sorted_pairs(edges: &[Edge]) -> Vec<(usize, usize)> {
        let mut pairs: Vec<_> = edges.iter().map(|e| (e.v0, e.v1)).collect();
        pairs.sort_unstable();
        pairs
    }

    #[test]
    fn test_full_matrix_keeps_hub_edges() {
        let points = two_pairs();
        let edges = GraphBuilder::new(GraphMode::FullMatrix, 2.0)
            .build(&points, &Euclidean)
            .unwrap();

        // All three hub edges plus the short (2, 3) pair
        assert_eq!(sorted_pairs(&edges), vec![(0, 1), (0, 2), (0, 3), (2, 3)]);
    }

    #[test]
    fn test_complete_graph() {
        let points = two_pairs();
        let edges = GraphBuilder::complete().build(&points, &Euclidean).unwrap();
        assert_eq!(edges.len(), 6);
    }

    #[test]
    fn test_matrix_source() {
        let points = two_pairs();
        let matrix = DissimilarityMatrix::from_points(&points[..], &Euclidean);
        let from_matrix = GraphBuilder::new(GraphMode::FullMatrix, 2.0)
            .build(&points, &matrix)
            .unwrap();
        let from_points = GraphBuilder::new(GraphMode::FullMatrix, 2.0)
            .build(&points, &Euclidean)
            .unwrap();
        assert_eq!(from_matrix, from_points);
    }

    #[test]
    fn test_sorted_sweep_matches_full_matrix() {
        let points = vec![
            Point::new(3.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(0.5, 5.0),
            Point::new(1.0, 0.2),
            Point::new(7.0, 7.0),
            Point::new(7.5, 7.1),
        ];
        for threshold in [0.5, 1.2, 3.0, 100.0] {
            let full = GraphBuilder::new(GraphMode::FullMatrix, threshold)
                .build(&points, &Euclidean)
                .unwrap();
            let sweep = GraphBuilder::new(GraphMode::SortedSweep, threshold)
                .build(&points, &Euclidean)
                .unwrap();
            assert_eq!(sorted_pairs(&full), sorted_pairs(&sweep), "threshold {}", threshold);
        }
    }

    #[test]
    fn test_sorted_sweep_needs_bounded_metric() {
        let points = two_pairs();
        let chebyshev = |a: &Point, b: &Point| (a.x - b.x).abs().max((a.y - b.y).abs());
        let result = GraphBuilder::new(GraphMode::SortedSweep, 1.0).build(&points, &chebyshev);
        assert!(matches!(result, Err(ClusterError::InvalidParameter { .. })));
    }

    #[test]
    fn test_degenerate_inputs_have_no_edges() {
        let none: Vec<Point> = Vec::new();
        assert!(GraphBuilder::complete().build(&none, &Euclidean).unwrap().is_empty());

        let one = vec![Point::new(1.0, 1.0)];
        assert!(GraphBuilder::complete().build(&one, &Euclidean).unwrap().is_empty());
    }
}
