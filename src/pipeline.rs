//! End-to-end clustering calls
//!
//! Every call builds its own candidate graph, tree and partitions and drops
//! them on return; nothing is shared between calls.

use crate::cluster::detection::clusters_at_threshold;
use crate::cluster::optimizer::ThresholdOptimizer;
use crate::cluster::{Cluster, ClusterResult};
use crate::config::Config;
use crate::data::dissimilarity::Dissimilarity;
use crate::data::points::Planar;
use crate::error::{ClusterError, Result};
use crate::graph::{kruskal_mst, GraphBuilder, MinimumSpanningTree};

/// Build the candidate graph for `points` and reduce it to its spanning tree
pub fn spanning_tree<P, D>(
    points: &[P],
    dissimilarity: &D,
    edge_cap: f64,
    config: &Config,
) -> Result<MinimumSpanningTree>
where
    P: Planar,
    D: Dissimilarity<P> + ?Sized,
{
    check_source_size(points, dissimilarity)?;

    let edges = GraphBuilder::new(config.graph_mode, edge_cap).build(points, dissimilarity)?;
    let tree = kruskal_mst(points.len(), edges)?;

    log::debug!(
        "Spanning tree over {} points: {} edges, total weight {:.4}",
        points.len(),
        tree.edges.len(),
        tree.total_weight()
    );

    Ok(tree)
}

/// Cluster `points`, choosing the cut threshold with the configured index
pub fn cluster<P, D>(points: &[P], dissimilarity: &D, config: &Config) -> Result<ClusterResult>
where
    P: Planar,
    D: Dissimilarity<P> + ?Sized,
{
    config.validate()?;

    let n = points.len();
    if n <= 1 {
        log::warn!("Only {} point(s); skipping threshold search", n);
        check_source_size(points, dissimilarity)?;
        let clusters = (0..n).map(|i| Cluster::new(i as u32, vec![i])).collect();
        return Ok(ClusterResult {
            clusters,
            threshold: 0.0,
            index: config.index,
            score: Default::default(),
        });
    }

    let tree = spanning_tree(points, dissimilarity, config.edge_cap(), config)?;
    let report = ThresholdOptimizer::from_config(config).scan(points, &tree)?;
    let best = *report.best_sample();

    // Rebuild the winning partition rather than keeping every sample's
    let clusters = clusters_at_threshold(&tree, best.threshold);

    log::info!(
        "Selected threshold {:.4} with {} clusters ({:?}, score {:.6})",
        best.threshold,
        clusters.len(),
        config.index,
        best.score.combined(report.alpha)
    );

    Ok(ClusterResult {
        clusters,
        threshold: best.threshold,
        index: config.index,
        score: best.score,
    })
}

/// Partition `points` at a fixed threshold.
///
/// Unless the configuration caps candidate edges itself, the threshold also
/// caps them: edges above it are cut afterwards anyway, so the partition is
/// the same as over the complete graph.
pub fn build_cluster_at_threshold<P, D>(
    points: &[P],
    dissimilarity: &D,
    threshold: f64,
    config: &Config,
) -> Result<Vec<Cluster>>
where
    P: Planar,
    D: Dissimilarity<P> + ?Sized,
{
    config.validate()?;
    if threshold.is_nan() {
        return Err(ClusterError::invalid_parameter("threshold must not be NaN"));
    }

    let n = points.len();
    if n <= 1 {
        check_source_size(points, dissimilarity)?;
        return Ok((0..n).map(|i| Cluster::new(i as u32, vec![i])).collect());
    }

    let edge_cap = config.edge_threshold.unwrap_or(threshold.max(0.0));
    let tree = spanning_tree(points, dissimilarity, edge_cap, config)?;
    let clusters = clusters_at_threshold(&tree, threshold);

    log::info!(
        "Threshold {:.4} splits {} points into {} clusters",
        threshold,
        n,
        clusters.len()
    );

    Ok(clusters)
}

fn check_source_size<P, D>(points: &[P], dissimilarity: &D) -> Result<()>
where
    D: Dissimilarity<P> + ?Sized,
{
    let n = points.len();
    match dissimilarity.node_count() {
        Some(size) if size != n => Err(ClusterError::invalid_parameter(format!(
            "dissimilarity matrix is {}x{} but there are {} points",
            size, size, n
        ))),
        _ => Ok(()),
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

    fn member_lists(clusters: &[Cluster]) -> Vec<Vec<usize>> {
        clusters.iter().map(|c| c.members.clone()).collect()
    }

    #[test]
    fn test_fixed_thresholds() {
        let points = two_pairs();
        let config = Config::default();

        let split = build_cluster_at_threshold(&points, &Euclidean, 2.0, &config).unwrap();
        assert_eq!(member_lists(&split), vec![vec![0, 1], vec![2, 3]]);

        let whole = build_cluster_at_threshold(&points, &Euclidean, 15.0, &config).unwrap();
        assert_eq!(member_lists(&whole), vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn test_auto_cluster_finds_pairs() {
        let points = two_pairs();
        let result = cluster(&points, &Euclidean, &Config::default()).unwrap();

        assert_eq!(member_lists(&result.clusters), vec![vec![0, 1], vec![2, 3]]);
        assert!(result.threshold >= 1.0 && result.threshold < 13.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        let none: Vec<Point> = Vec::new();
        let result = cluster(&none, &Euclidean, &Config::default()).unwrap();
        assert!(result.clusters.is_empty());

        let one = vec![Point::new(4.0, 2.0)];
        let result = cluster(&one, &Euclidean, &Config::default()).unwrap();
        assert_eq!(member_lists(&result.clusters), vec![vec![0]]);

        let fixed = build_cluster_at_threshold(&one, &Euclidean, 1.0, &Config::default()).unwrap();
        assert_eq!(fixed.len(), 1);
    }

    #[test]
    fn test_matrix_size_mismatch() {
        let points = two_pairs();
        let matrix = DissimilarityMatrix::new(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let result = cluster(&points, &matrix, &Config::default());
        assert!(matches!(result, Err(ClusterError::InvalidParameter { .. })));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let points = two_pairs();
        let result = build_cluster_at_threshold(&points, &Euclidean, f64::NAN, &Config::default());
        assert!(result.is_err());
    }
}
