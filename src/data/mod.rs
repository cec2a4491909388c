//! Point types, dissimilarity sources and input loading

pub mod dissimilarity;
pub mod json;
pub mod points;

pub use dissimilarity::{Dissimilarity, DissimilarityMatrix, Euclidean};
pub use points::{Planar, Point, Record};
