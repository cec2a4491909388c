//! Threshold search over the spanning tree's edge weights

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, OrderStatistics, Statistics};

use crate::cluster::detection::clusters_at_threshold;
use crate::cluster::metrics::{ValidityIndex, ValidityResult};
use crate::config::Config;
use crate::data::points::Planar;
use crate::error::{ClusterError, Result};
use crate::graph::MinimumSpanningTree;

/// Scan window derived from the tree's weight distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanBounds {
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// One evaluated threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSample {
    pub threshold: f64,
    pub cluster_count: usize,
    pub score: ValidityResult,
}

/// Every sample of a scan plus the selection made from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub bounds: ScanBounds,

    /// Samples from the largest threshold down to the smallest
    pub samples: Vec<ThresholdSample>,

    /// Weight applied to the scatter term
    pub alpha: f64,

    /// Position of the winning sample in `samples`
    pub best: usize,
}

impl ScanReport {
    pub fn best_sample(&self) -> &ThresholdSample {
        &self.samples[self.best]
    }

    pub fn best_threshold(&self) -> f64 {
        self.best_sample().threshold
    }
}

/// Fixed-resolution search for the threshold minimising `alpha * S + D`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdOptimizer {
    index: ValidityIndex,
    steps: usize,
    spread: f64,
}

impl ThresholdOptimizer {
    pub fn new(index: ValidityIndex, steps: usize, spread: f64) -> Self {
        Self {
            index,
            steps,
            spread,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.index, config.scan_steps, config.spread)
    }

    /// Median and population standard deviation of the tree weights, and
    /// the window `median +/- spread * std`.
    ///
    /// When the lower edge would not clear `spread * std` it falls back to
    /// half the median, which keeps it positive.
    pub fn bounds(&self, tree: &MinimumSpanningTree) -> Result<ScanBounds> {
        let weights = tree.weights();
        if weights.is_empty() {
            return Err(ClusterError::invalid_parameter(
                "threshold search needs a tree with at least one edge",
            ));
        }

        let std_dev = weights.iter().population_std_dev();
        let median = Data::new(weights).median();
        let width = self.spread * std_dev;

        let lower = median - width;
        let min = if lower > width { lower } else { median - median / 2.0 };
        let max = median + width;

        Ok(ScanBounds {
            median,
            std_dev,
            min,
            max,
        })
    }

    /// Sample thresholds from `max` down to `min`, both inclusive
    pub fn thresholds(&self, bounds: &ScanBounds) -> Vec<f64> {
        let step = (bounds.max - bounds.min) / self.steps as f64;
        if step.is_nan() || step <= 0.0 {
            return vec![bounds.max];
        }

        (0..=self.steps)
            .map(|i| {
                if i == self.steps {
                    bounds.min
                } else {
                    bounds.max - i as f64 * step
                }
            })
            .collect()
    }

    /// Score every sampled threshold and pick the best
    pub fn scan<P: Planar>(&self, points: &[P], tree: &MinimumSpanningTree) -> Result<ScanReport> {
        if self.steps == 0 {
            return Err(ClusterError::invalid_parameter("scan_steps must be > 0"));
        }

        let bounds = self.bounds(tree)?;
        log::debug!(
            "Scan window [{:.4}, {:.4}] (median {:.4}, std {:.4})",
            bounds.min,
            bounds.max,
            bounds.median,
            bounds.std_dev
        );

        let samples: Vec<ThresholdSample> = self
            .thresholds(&bounds)
            .into_iter()
            .map(|threshold| {
                let clusters = clusters_at_threshold(tree, threshold);
                ThresholdSample {
                    threshold,
                    cluster_count: clusters.len(),
                    score: self.index.score(points, &clusters),
                }
            })
            .collect();

        // The loosest sample is the last one
        let alpha = samples
            .last()
            .map_or(1.0, |loosest| self.index.alpha(&loosest.score));

        let mut best = 0;
        let mut best_value = f64::INFINITY;
        for (i, sample) in samples.iter().enumerate() {
            let value = sample.score.combined(alpha);
            log::debug!(
                "t={:.4} clusters={} S={:.6} D={:.6} score={:.6}",
                sample.threshold,
                sample.cluster_count,
                sample.score.scatter,
                sample.score.separation,
                value
            );
            if value < best_value {
                best_value = value;
                best = i;
            }
        }

        Ok(ScanReport {
            bounds,
            samples,
            alpha,
            best,
        })
    }
}
