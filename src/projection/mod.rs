//! 2D projection of embedding vectors for the visual tour.
//!
//! The tour core treats projection as an opaque collaborator: anything that
//! maps `n` vectors to `n` points in the same order can drive a visual tour.

mod pca;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use pca::PcaProjection;

/// A point in the projected plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Maps high-dimensional vectors to 2D coordinates.
///
/// Implementations must return exactly one point per input vector, in
/// input order.
pub trait Projection {
    fn project(&self, vectors: &[Vec<f64>]) -> Result<Vec<Point2>>;
}

/// Coordinates computed elsewhere, for example by an external t-SNE run.
#[derive(Debug, Clone)]
pub struct FixedProjection {
    points: Vec<Point2>,
}

impl FixedProjection {
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }
}

impl Projection for FixedProjection {
    fn project(&self, vectors: &[Vec<f64>]) -> Result<Vec<Point2>> {
        if vectors.len() != self.points.len() {
            return Err(Error::invalid_input(format!(
                "fixed projection holds {} points for {} vectors",
                self.points.len(),
                vectors.len()
            )));
        }
        Ok(self.points.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_projection() {
        let proj = FixedProjection::new(vec![Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)]);
        let points = proj.project(&[vec![0.0], vec![1.0]]).unwrap();
        assert_eq!(points[1], Point2::new(3.0, 4.0));
    }

    #[test]
    fn test_fixed_projection_length_mismatch() {
        let proj = FixedProjection::new(vec![Point2::new(1.0, 2.0)]);
        assert!(matches!(
            proj.project(&[vec![0.0], vec![1.0]]),
            Err(Error::InvalidInput(_))
        ));
    }
}
