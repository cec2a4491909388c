//! Configuration management for the spanning-tree clusterer

use serde::{Deserialize, Serialize};

use crate::cluster::metrics::ValidityIndex;
use crate::error::{ClusterError, Result};
use crate::graph::builder::GraphMode;

/// Default number of intervals in the threshold scan (21 samples)
pub const DEFAULT_SCAN_STEPS: usize = 20;

/// Default width of the scan window, in standard deviations around the median
pub const DEFAULT_SPREAD: f64 = 1.0;

/// Configuration for one clustering call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Validity index used to score candidate partitions
    pub index: ValidityIndex,

    /// How candidate edges are generated before the MST
    pub graph_mode: GraphMode,

    /// Maximum weight of non-hub candidate edges (`None` keeps every pair)
    pub edge_threshold: Option<f64>,

    /// Number of intervals between the scan bounds
    pub scan_steps: usize,

    /// Standard deviations around the median that bound the scan
    pub spread: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index: ValidityIndex::Sd,
            graph_mode: GraphMode::FullMatrix,
            edge_threshold: None,
            scan_steps: DEFAULT_SCAN_STEPS,
            spread: DEFAULT_SPREAD,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(
        index: ValidityIndex,
        graph_mode: GraphMode,
        edge_threshold: Option<f64>,
        scan_steps: usize,
        spread: f64,
    ) -> Self {
        Self {
            index,
            graph_mode,
            edge_threshold,
            scan_steps,
            spread,
        }
    }

    /// Same configuration with a different validity index
    pub fn with_index(mut self, index: ValidityIndex) -> Self {
        self.index = index;
        self
    }

    /// Same configuration with a candidate edge cap
    pub fn with_edge_threshold(mut self, threshold: f64) -> Self {
        self.edge_threshold = Some(threshold);
        self
    }

    /// Reject settings the search cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.scan_steps == 0 {
            return Err(ClusterError::invalid_parameter("scan_steps must be > 0"));
        }
        if !self.spread.is_finite() || self.spread < 0.0 {
            return Err(ClusterError::invalid_parameter(format!(
                "spread must be a finite non-negative number, got {}",
                self.spread
            )));
        }
        if let Some(t) = self.edge_threshold {
            if t.is_nan() || t < 0.0 {
                return Err(ClusterError::invalid_parameter(format!(
                    "edge_threshold must be non-negative, got {}",
                    t
                )));
            }
        }
        Ok(())
    }

    /// Candidate edge cap with `None` mapped to "keep everything"
    pub(crate) fn edge_cap(&self) -> f64 {
        self.edge_threshold.unwrap_or(f64::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scan_steps, 20);
        assert_eq!(config.edge_cap(), f64::INFINITY);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = Config::default();
        config.scan_steps = 0;
        assert!(config.validate().is_err());

        let config = Config::default().with_edge_threshold(-1.0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.spread = f64::NAN;
        assert!(config.validate().is_err());
    }
}
