//! Planar point representations

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Anything with a position on the plane.
///
/// The clusterer only ever reads `x` and `y`; every other field on a caller's
/// type is invisible to it.
pub trait Planar {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

/// Bare 2D point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between two points
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Planar for Point {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

impl Planar for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }

    fn y(&self) -> f64 {
        self.1
    }
}

/// Positioned record with an opaque payload (e.g. a tweet and its scores)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub x: f64,
    pub y: f64,

    /// Every other field from the input, carried through untouched
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Planar for Record {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_payload() {
        let json = r#"{"x": 1.5, "y": -2.0, "text": "hello", "score": 0.3}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.x(), 1.5);
        assert_eq!(record.y(), -2.0);
        assert_eq!(record.payload.get("text"), Some(&Value::from("hello")));
        assert_eq!(record.payload.len(), 2);
    }

    #[test]
    fn test_point_geometry() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(a.midpoint(&b), Point::new(1.5, 2.0));
    }
}
