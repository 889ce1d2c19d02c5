//! Principal component projection.

use linfa::prelude::*;
use linfa_reduction::Pca;
use ndarray::Array2;

use super::{Point2, Projection};
use crate::error::{Error, Result};

/// Projects onto the two leading principal components.
///
/// Vectors with one or two dimensions, and pairs of vectors, already lie in
/// a plane; they are centered and laid out directly. Everything else goes
/// through `linfa-reduction`'s PCA. Either way, pairwise distances within
/// the retained plane are preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct PcaProjection;

impl PcaProjection {
    fn fit_project(&self, records: Array2<f64>) -> Result<Array2<f64>> {
        let dataset = Dataset::from(records);
        let model = Pca::params(2)
            .fit(&dataset)
            .map_err(|e| Error::projection(e.to_string()))?;
        let projected: Array2<f64> = model.predict(dataset.records());
        Ok(projected)
    }
}

impl Projection for PcaProjection {
    fn project(&self, vectors: &[Vec<f64>]) -> Result<Vec<Point2>> {
        let Some(first) = vectors.first() else {
            return Err(Error::invalid_input("cannot project an empty vector set"));
        };
        let dim = first.len();
        if dim == 0 || vectors.iter().any(|v| v.len() != dim) {
            return Err(Error::invalid_input(
                "projection needs non-empty vectors of equal length",
            ));
        }

        let n = vectors.len();
        if n == 2 && dim > 2 {
            let half = crate::distance::euclidean(&vectors[0], &vectors[1]) / 2.0;
            return Ok(vec![Point2::new(-half, 0.0), Point2::new(half, 0.0)]);
        }
        if dim <= 2 {
            return Ok(center_planar(vectors));
        }

        let flat: Vec<f64> = vectors.iter().flatten().copied().collect();
        let records = Array2::from_shape_vec((n, dim), flat)
            .map_err(|e| Error::projection(e.to_string()))?;
        let projected = self.fit_project(records)?;

        let points: Vec<Point2> = projected
            .rows()
            .into_iter()
            .map(|row| Point2::new(row[0], row.get(1).copied().unwrap_or(0.0)))
            .collect();
        if points.len() != n || points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(Error::projection(
                "principal components are not finite for this vector set",
            ));
        }
        log::debug!("projected {n} vectors from {dim} dimensions");
        Ok(points)
    }
}

/// Subtracts the mean of one- or two-dimensional vectors.
fn center_planar(vectors: &[Vec<f64>]) -> Vec<Point2> {
    let n = vectors.len() as f64;
    let coord = |v: &Vec<f64>, k: usize| v.get(k).copied().unwrap_or(0.0);
    let mx = vectors.iter().map(|v| coord(v, 0)).sum::<f64>() / n;
    let my = vectors.iter().map(|v| coord(v, 1)).sum::<f64>() / n;
    vectors
        .iter()
        .map(|v| Point2::new(coord(v, 0) - mx, coord(v, 1) - my))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::euclidean;

    fn dist(a: Point2, b: Point2) -> f64 {
        euclidean(&[a.x, a.y], &[b.x, b.y])
    }

    fn shelf_vectors() -> Vec<Vec<f64>> {
        (0..12)
            .map(|i| {
                let t = i as f64;
                vec![t, (t * 1.7).sin() * 3.0, (t * 0.9).cos(), 0.1 * t * t]
            })
            .collect()
    }

    #[test]
    fn test_one_point_per_vector() {
        let points = PcaProjection.project(&shelf_vectors()).unwrap();
        assert_eq!(points.len(), 12);
    }

    #[test]
    fn test_recovers_dominant_axis() {
        // Spread along axis 2, small jitter elsewhere
        let vectors: Vec<Vec<f64>> = (0..10)
            .map(|i| vec![0.01 * (i % 2) as f64, 0.02 * (i % 3) as f64, 10.0 * i as f64])
            .collect();
        let points = PcaProjection.project(&vectors).unwrap();

        let span = (points[9].x - points[0].x).abs();
        assert!((span - 90.0).abs() < 0.05, "span {span}");
        let increasing = points.windows(2).all(|w| w[1].x > w[0].x);
        let decreasing = points.windows(2).all(|w| w[1].x < w[0].x);
        assert!(increasing || decreasing);
    }

    #[test]
    fn test_flat_vectors_keep_their_distances() {
        // Embedded in 3D but lying in the z = 0 plane
        let vectors: Vec<Vec<f64>> = (0..8)
            .map(|i| vec![3.0 * i as f64, ((i * 5) % 7) as f64, 0.0])
            .collect();
        let points = PcaProjection.project(&vectors).unwrap();
        for i in 0..vectors.len() {
            for j in (i + 1)..vectors.len() {
                let native = euclidean(&vectors[i], &vectors[j]);
                assert!((dist(points[i], points[j]) - native).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_repeat_projection_is_stable() {
        let a = PcaProjection.project(&shelf_vectors()).unwrap();
        let b = PcaProjection.project(&shelf_vectors()).unwrap();
        for (p, q) in a.iter().zip(&b) {
            assert!((p.x - q.x).abs() < 1e-9 && (p.y - q.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_planar_input_is_centered() {
        let vectors = vec![vec![1.0, 1.0], vec![3.0, 1.0], vec![2.0, 4.0]];
        let points = PcaProjection.project(&vectors).unwrap();
        assert_eq!(points[0], Point2::new(-1.0, -1.0));
        assert_eq!(points[2], Point2::new(0.0, 2.0));
    }

    #[test]
    fn test_one_dimensional_input_lies_on_x_axis() {
        let vectors = vec![vec![0.0], vec![4.0], vec![2.0]];
        let points = PcaProjection.project(&vectors).unwrap();
        assert!(points.iter().all(|p| p.y == 0.0));
        assert!((dist(points[0], points[1]) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_pair_keeps_its_distance() {
        let vectors = vec![vec![0.0, 0.0, 0.0, 0.0], vec![1.0, 2.0, 2.0, 4.0]];
        let points = PcaProjection.project(&vectors).unwrap();
        assert!((dist(points[0], points[1]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_ragged_and_empty() {
        assert!(matches!(
            PcaProjection.project(&[vec![1.0, 2.0], vec![1.0]]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(PcaProjection.project(&[]), Err(Error::InvalidInput(_))));
    }
}
