//! Error types for spanning-tree clustering

use thiserror::Error;

/// Errors that can occur while building or cutting a spanning tree.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClusterError {
    /// The edge list ran out before the tree spanned every vertex.
    #[error("Disconnected graph: accepted {accepted} of {required} spanning edges")]
    DisconnectedGraph {
        /// Edges accepted before the candidate list was exhausted
        accepted: usize,
        /// Edges a spanning tree needs (`n - 1`)
        required: usize,
    },

    /// An edge references a vertex that does not exist.
    #[error("Vertex {vertex} out of range for {node_count} vertices")]
    VertexOutOfRange {
        vertex: usize,
        node_count: usize,
    },

    /// A dissimilarity source produced a negative or non-finite distance.
    #[error("Invalid dissimilarity between {i} and {j}: {value}")]
    InvalidDissimilarity {
        i: usize,
        j: usize,
        value: f64,
    },

    /// Precomputed matrix is not `n x n`.
    #[error("Matrix shape mismatch: row {row} has {len} entries, expected {expected}")]
    MatrixShape {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// Precomputed matrix is not symmetric.
    #[error("Asymmetric matrix at ({i}, {j})")]
    AsymmetricMatrix {
        i: usize,
        j: usize,
    },

    /// Invalid parameter provided.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of what's wrong with the parameter
        message: String,
    },
}

impl ClusterError {
    /// Create a DisconnectedGraph error.
    pub fn disconnected(accepted: usize, required: usize) -> Self {
        Self::DisconnectedGraph { accepted, required }
    }

    /// Create an InvalidParameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }
}

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, ClusterError>;
