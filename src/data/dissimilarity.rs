//! Pairwise dissimilarity sources

use serde::{Deserialize, Serialize};

use crate::data::points::Planar;
use crate::error::{ClusterError, Result};

/// Source of pairwise distances between the points of one input.
pub trait Dissimilarity<P> {
    /// Distance between `points[i]` and `points[j]`
    fn between(&self, points: &[P], i: usize, j: usize) -> f64;

    /// True when `|x_i - x_j|` never exceeds the distance, which lets the
    /// sorted sweep stop scanning early
    fn bounded_by_dx(&self) -> bool {
        false
    }

    /// Number of points the source was built for, if it is fixed
    fn node_count(&self) -> Option<usize> {
        None
    }
}

/// Straight-line distance on `(x, y)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Euclidean;

impl<P: Planar> Dissimilarity<P> for Euclidean {
    fn between(&self, points: &[P], i: usize, j: usize) -> f64 {
        let (a, b) = (&points[i], &points[j]);
        (a.x() - b.x()).hypot(a.y() - b.y())
    }

    fn bounded_by_dx(&self) -> bool {
        true
    }
}

impl<P, F> Dissimilarity<P> for F
where
    F: Fn(&P, &P) -> f64,
{
    fn between(&self, points: &[P], i: usize, j: usize) -> f64 {
        self(&points[i], &points[j])
    }
}

/// Precomputed symmetric `n x n` distance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DissimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DissimilarityMatrix {
    /// Build from rows, checking shape and symmetry
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size * size);

        for (row, entries) in rows.iter().enumerate() {
            if entries.len() != size {
                return Err(ClusterError::MatrixShape {
                    row,
                    len: entries.len(),
                    expected: size,
                });
            }
            values.extend_from_slice(entries);
        }

        for i in 0..size {
            for j in (i + 1)..size {
                let (a, b) = (values[i * size + j], values[j * size + i]);
                if a.is_nan() || b.is_nan() || (a - b).abs() > 1e-9 * a.abs().max(1.0) {
                    return Err(ClusterError::AsymmetricMatrix { i, j });
                }
            }
        }

        Ok(Self { size, values })
    }

    /// Tabulate a dissimilarity over every pair of points
    pub fn from_points<P, D>(points: &[P], dissimilarity: &D) -> Self
    where
        D: Dissimilarity<P> + ?Sized,
    {
        let size = points.len();
        let mut values = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let d = dissimilarity.between(points, i, j);
                values[i * size + j] = d;
                values[j * size + i] = d;
            }
        }
        Self { size, values }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }
}

impl<P> Dissimilarity<P> for DissimilarityMatrix {
    fn between(&self, _points: &[P], i: usize, j: usize) -> f64 {
        self.get(i, j)
    }

    fn node_count(&self) -> Option<usize> {
        Some(self.size)
    }
}

/// Distance between two points, rejecting values the tree cannot order
pub(crate) fn checked_between<P, D>(dissimilarity: &D, points: &[P], i: usize, j: usize) -> Result<f64>
where
    D: Dissimilarity<P> + ?Sized,
{
    let value = dissimilarity.between(points, i, j);
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ClusterError::InvalidDissimilarity { i, j, value })
    }
}
