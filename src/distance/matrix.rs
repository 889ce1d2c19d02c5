//! Dense distance matrix.

use crate::error::{Error, Result};

/// A dense n×n distance matrix stored in row-major order, indexed by
/// item position (not item id).
///
/// Once built the matrix is never mutated; a solver run borrows it
/// immutably for its whole lifetime.
///
/// # Examples
///
/// ```
/// use shelf_tour::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).unwrap();
/// assert_eq!(dm.get(0, 1), 5.0);
/// assert_eq!(dm.size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates an all-zero matrix of the given size.
    pub(crate) fn zeros(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix from an explicit row-major n×n grid.
    ///
    /// The grid must be square, symmetric, non-negative, finite, and have
    /// a zero diagonal.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != size * size {
            return Err(Error::invalid_input(format!(
                "expected {} entries for a {size}x{size} matrix, got {}",
                size * size,
                data.len()
            )));
        }
        let dm = Self { data, size };
        for i in 0..size {
            if dm.get(i, i) != 0.0 {
                return Err(Error::invalid_input(format!(
                    "diagonal entry ({i}, {i}) must be zero"
                )));
            }
            for j in 0..size {
                let d = dm.get(i, j);
                if !d.is_finite() || d < 0.0 {
                    return Err(Error::invalid_input(format!(
                        "entry ({i}, {j}) must be finite and non-negative, got {d}"
                    )));
                }
                if d != dm.get(j, i) {
                    return Err(Error::invalid_input(format!(
                        "matrix is not symmetric at ({i}, {j})"
                    )));
                }
            }
        }
        Ok(dm)
    }

    /// Returns the distance between positions `from` and `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Writes `d` to both `(i, j)` and `(j, i)`.
    pub(crate) fn set_symmetric(&mut self, i: usize, j: usize, d: f64) {
        self.data[i * self.size + j] = d;
        self.data[j * self.size + i] = d;
    }

    /// Zeroes row 0 and column 0 so that every edge touching the start
    /// position is free.
    ///
    /// A closed-cycle objective over such a matrix is the length of an open
    /// path: the edge that closes the cycle back to position 0 costs nothing.
    pub(crate) fn suppress_return(&mut self) {
        for k in 0..self.size {
            self.set_symmetric(0, k, 0.0);
        }
    }

    /// Number of positions in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Borrow one row.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.size..(i + 1) * self.size]
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Sum of consecutive edges along `order`, without a closing edge.
    pub fn path_length(&self, order: &[usize]) -> f64 {
        order.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }

    /// Sum of `D[p[i]][p[(i+1) mod n]]` over the full cycle.
    pub fn cycle_length(&self, order: &[usize]) -> f64 {
        match (order.first(), order.last()) {
            (Some(&first), Some(&last)) if order.len() > 1 => {
                self.path_length(order) + self.get(last, first)
            }
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> DistanceMatrix {
        // 3-4-5 right triangle
        DistanceMatrix::from_data(3, vec![0.0, 3.0, 4.0, 3.0, 0.0, 5.0, 4.0, 5.0, 0.0])
            .expect("valid matrix")
    }

    #[test]
    fn test_from_data() {
        let dm = triangle();
        assert_eq!(dm.size(), 3);
        assert_eq!(dm.get(1, 2), 5.0);
        assert_eq!(dm.row(2), &[4.0, 5.0, 0.0]);
    }

    #[test]
    fn test_from_data_wrong_length() {
        assert!(matches!(
            DistanceMatrix::from_data(2, vec![0.0, 1.0, 1.0]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_data_rejects_asymmetric() {
        let err = DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0, 0.0]);
        assert!(matches!(err, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_from_data_rejects_nonzero_diagonal() {
        let err = DistanceMatrix::from_data(2, vec![1.0, 1.0, 1.0, 0.0]);
        assert!(matches!(err, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_from_data_rejects_negative() {
        let err = DistanceMatrix::from_data(2, vec![0.0, -1.0, -1.0, 0.0]);
        assert!(matches!(err, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_path_and_cycle_length() {
        let dm = triangle();
        assert!((dm.path_length(&[0, 1, 2]) - 8.0).abs() < 1e-12);
        assert!((dm.cycle_length(&[0, 1, 2]) - 12.0).abs() < 1e-12);
        assert_eq!(dm.cycle_length(&[1]), 0.0);
        assert_eq!(dm.cycle_length(&[]), 0.0);
    }

    #[test]
    fn test_suppress_return_zeroes_row_and_column() {
        let mut dm = triangle();
        dm.suppress_return();
        for k in 0..3 {
            assert_eq!(dm.get(0, k), 0.0);
            assert_eq!(dm.get(k, 0), 0.0);
        }
        assert_eq!(dm.get(1, 2), 5.0);
        assert!(dm.is_symmetric(0.0));
        // Only the 1-2 edge remains
        assert!((dm.cycle_length(&[0, 1, 2]) - 5.0).abs() < 1e-12);
    }
}
