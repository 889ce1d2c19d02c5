//! Euclidean distance matrix construction.

use super::matrix::DistanceMatrix;
use crate::error::{Error, Result};
use crate::projection::Point2;

/// Builds a symmetric Euclidean distance matrix from equal-length vectors.
///
/// With `suppress_return`, row 0 and column 0 are zeroed: every edge that
/// touches position 0 becomes free, which lets a closed-cycle solver
/// produce an open path anchored at position 0.
///
/// # Errors
///
/// [`Error::InvalidInput`] when fewer than two vectors are supplied, when
/// vectors are zero-dimensional or of unequal length, or when a component
/// is not finite. Ragged input is never truncated or padded.
///
/// # Examples
///
/// ```
/// use shelf_tour::distance::build;
///
/// let dm = build(&[vec![0.0, 0.0], vec![3.0, 4.0]], false).unwrap();
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-12);
/// ```
pub fn build<V: AsRef<[f64]>>(vectors: &[V], suppress_return: bool) -> Result<DistanceMatrix> {
    let dim = validate(vectors)?;
    let n = vectors.len();

    let mut dm = DistanceMatrix::zeros(n);
    for i in 0..n {
        let a = vectors[i].as_ref();
        for j in (i + 1)..n {
            let b = vectors[j].as_ref();
            dm.set_symmetric(i, j, euclidean(a, b));
        }
    }

    if suppress_return {
        dm.suppress_return();
    }

    log::debug!("built {n}x{n} distance matrix over {dim} dimensions (suppress_return={suppress_return})");
    Ok(dm)
}

/// Builds the matrix over projected 2D coordinates.
pub fn from_points(points: &[Point2], suppress_return: bool) -> Result<DistanceMatrix> {
    let coords: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
    build(&coords, suppress_return)
}

/// Euclidean distance between two equal-length slices.
#[inline]
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Checks the vector set and returns its common dimensionality.
pub(crate) fn validate<V: AsRef<[f64]>>(vectors: &[V]) -> Result<usize> {
    if vectors.is_empty() {
        return Err(Error::invalid_input("vector set is empty"));
    }
    if vectors.len() < 2 {
        return Err(Error::invalid_input(format!(
            "at least 2 vectors are required to form a tour, got {}",
            vectors.len()
        )));
    }

    let dim = vectors[0].as_ref().len();
    if dim == 0 {
        return Err(Error::invalid_input("vectors must have at least one dimension"));
    }

    for (i, v) in vectors.iter().enumerate() {
        let v = v.as_ref();
        if v.len() != dim {
            return Err(Error::invalid_input(format!(
                "vector {i} has {} dimensions, expected {dim}",
                v.len()
            )));
        }
        if let Some(k) = v.iter().position(|x| !x.is_finite()) {
            return Err(Error::invalid_input(format!(
                "vector {i} has a non-finite component at index {k}"
            )));
        }
    }

    Ok(dim)
}
