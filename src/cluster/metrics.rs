//! Cluster validity indices
//!
//! Both indices return a [`ValidityResult`] holding a scatter term `S`
//! (mean intra-cluster variance relative to the whole set) and a second term
//! `D`. Lower `alpha * S + D` means a better partition.
//!
//! * **SD**: `D` is the summed reciprocal centroid distance, scaled by the
//!   ratio of the largest to the smallest centroid distance.
//! * **SDbw**: `D` compares, for every ordered pair of clusters, the density
//!   of their union around the centroid midpoint with the larger of their own
//!   densities.
//!
//! Zero denominators contribute zero instead of producing `NaN` or infinity.

use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::cluster::Cluster;
use crate::data::points::{Planar, Point};

/// Selectable validity index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ValidityIndex {
    /// Scatter plus centroid separation
    Sd,

    /// Scatter plus inter-cluster density
    #[value(name = "sdbw")]
    SdBw,
}

impl ValidityIndex {
    /// Score a partition of `points`
    pub fn score<P: Planar>(&self, points: &[P], clusters: &[Cluster]) -> ValidityResult {
        match self {
            ValidityIndex::Sd => sd_index(points, clusters),
            ValidityIndex::SdBw => sdbw_index(points, clusters),
        }
    }

    /// Weight of the scatter term, calibrated on the loosest partition's score
    pub fn alpha(&self, loosest: &ValidityResult) -> f64 {
        match self {
            ValidityIndex::Sd if loosest.separation.is_finite() => loosest.separation,
            ValidityIndex::Sd => 0.0,
            ValidityIndex::SdBw => 1.0,
        }
    }
}

/// Scatter and separation/density terms of one partition
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidityResult {
    /// `S`: normalised intra-cluster scatter
    pub scatter: f64,

    /// `D`: separation (SD) or inter-cluster density (SDbw)
    pub separation: f64,
}

impl ValidityResult {
    pub fn new(scatter: f64, separation: f64) -> Self {
        Self {
            scatter,
            separation,
        }
    }

    /// `alpha * S + D`
    pub fn combined(&self, alpha: f64) -> f64 {
        alpha * self.scatter + self.separation
    }
}

/// Centroid and per-axis population variance of a point set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterStats {
    pub centroid: Point,
    pub variance: Point,
    pub size: usize,
}

impl ClusterStats {
    /// Statistics of the points at `members`
    pub fn from_members<P: Planar>(points: &[P], members: &[usize]) -> Self {
        Self::from_points_iter(members.iter().map(move |&i| &points[i]))
    }

    fn from_points_iter<'a, P: Planar + 'a>(iter: impl Iterator<Item = &'a P> + Clone) -> Self {
        let (mut sx, mut sy, mut size) = (0.0, 0.0, 0usize);
        for p in iter.clone() {
            sx += p.x();
            sy += p.y();
            size += 1;
        }
        if size == 0 {
            return Self {
                centroid: Point::new(0.0, 0.0),
                variance: Point::new(0.0, 0.0),
                size,
            };
        }

        let n = size as f64;
        let centroid = Point::new(sx / n, sy / n);
        let (mut vx, mut vy) = (0.0, 0.0);
        for p in iter {
            vx += (p.x() - centroid.x).powi(2);
            vy += (p.y() - centroid.y).powi(2);
        }

        Self {
            centroid,
            variance: Point::new(vx / n, vy / n),
            size,
        }
    }

    /// Length of the variance vector
    pub fn scatter_norm(&self) -> f64 {
        self.variance.x.hypot(self.variance.y)
    }
}

/// Per-cluster statistics plus those of the union of every member
fn partition_stats<P: Planar>(points: &[P], clusters: &[Cluster]) -> (Vec<ClusterStats>, ClusterStats) {
    let stats = clusters
        .iter()
        .map(|c| ClusterStats::from_members(points, &c.members))
        .collect();
    let overall = ClusterStats::from_points_iter(
        clusters
            .iter()
            .flat_map(|c| c.members.iter())
            .map(move |&i| &points[i]),
    );
    (stats, overall)
}

/// Mean of per-cluster scatter over the overall scatter
fn scatter(stats: &[ClusterStats], overall: &ClusterStats) -> f64 {
    let total = overall.scatter_norm();
    if stats.is_empty() || total == 0.0 {
        return 0.0;
    }
    stats.iter().map(|s| s.scatter_norm() / total).sum::<f64>() / stats.len() as f64
}

/// SD validity index
pub fn sd_index<P: Planar>(points: &[P], clusters: &[Cluster]) -> ValidityResult {
    if clusters.is_empty() {
        return ValidityResult::default();
    }

    let (stats, overall) = partition_stats(points, clusters);
    let s = scatter(&stats, &overall);

    let distances: Vec<f64> = stats
        .iter()
        .tuple_combinations()
        .map(|(a, b)| a.centroid.distance(&b.centroid))
        .collect();

    let d_max = distances.iter().copied().fold(0.0, f64::max);
    let d_min = distances
        .iter()
        .copied()
        .filter(|&d| d > 0.0)
        .fold(f64::INFINITY, f64::min);
    if !d_min.is_finite() {
        return ValidityResult::new(s, 0.0);
    }

    // Every unordered pair is seen once from each side
    let reciprocal_sum: f64 = distances
        .iter()
        .filter(|&&d| d > 0.0)
        .map(|&d| 2.0 / d)
        .sum();

    ValidityResult::new(s, (d_max / d_min) * reciprocal_sum)
}

/// Members of `members` farther than `radius` from `anchor`
fn density<P: Planar>(points: &[P], members: &[usize], anchor: &Point, radius: f64) -> usize {
    members
        .iter()
        .filter(|&&i| Point::new(points[i].x(), points[i].y()).distance(anchor) > radius)
        .count()
}

/// SDbw validity index
pub fn sdbw_index<P: Planar>(points: &[P], clusters: &[Cluster]) -> ValidityResult {
    let k = clusters.len();
    if k == 0 {
        return ValidityResult::default();
    }

    let (stats, overall) = partition_stats(points, clusters);
    let s = scatter(&stats, &overall);
    if k == 1 {
        return ValidityResult::new(s, 0.0);
    }

    let std_unit = stats.iter().map(ClusterStats::scatter_norm).sum::<f64>().sqrt() / k as f64;

    let own: Vec<usize> = clusters
        .iter()
        .zip(&stats)
        .map(|(c, st)| density(points, &c.members, &st.centroid, std_unit))
        .collect();

    let total: f64 = (0..k)
        .cartesian_product(0..k)
        .filter(|(i, j)| i != j)
        .map(|(i, j)| {
            let largest = own[i].max(own[j]);
            if largest == 0 {
                return 0.0;
            }
            let mid = stats[i].centroid.midpoint(&stats[j].centroid);
            let union = density(points, &clusters[i].members, &mid, std_unit)
                + density(points, &clusters[j].members, &mid, std_unit);
            union as f64 / largest as f64
        })
        .sum();

    ValidityResult::new(s, total / (k * (k - 1)) as f64)
}
