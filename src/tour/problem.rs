//! Permutation neighborhood over a distance matrix.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::sa::SaProblem;

/// A candidate or final tour: every position `0..n` exactly once.
pub type Permutation = Vec<usize>;

/// Closed-cycle tour over a distance matrix, with position 0 pinned to the
/// front of every permutation.
///
/// Moves only rearrange indices `1..n`, so a result always reads as a path
/// that starts at position 0.
#[derive(Debug)]
pub struct TourProblem<'a> {
    matrix: &'a DistanceMatrix,
    shuffle_initial: bool,
}

impl<'a> TourProblem<'a> {
    /// Needs at least 4 positions so that `1..n` has room for every move.
    pub fn new(matrix: &'a DistanceMatrix, shuffle_initial: bool) -> Self {
        debug_assert!(matrix.size() >= 4);
        Self {
            matrix,
            shuffle_initial,
        }
    }

    fn n(&self) -> usize {
        self.matrix.size()
    }

    /// Length of the edge leaving index `k`.
    #[inline]
    fn edge(&self, perm: &[usize], k: usize) -> f64 {
        self.matrix.get(perm[k], perm[(k + 1) % perm.len()])
    }

    /// Two distinct free indices in `1..n`, ordered.
    fn pick_pair<R: Rng>(&self, rng: &mut R) -> (usize, usize) {
        let n = self.n();
        let i = rng.random_range(1..n);
        let mut j = rng.random_range(1..n - 1);
        if j >= i {
            j += 1;
        }
        (i.min(j), i.max(j))
    }

    /// Reverses `perm[i..=j]`. Only the two boundary edges change length on
    /// a symmetric matrix.
    pub fn reverse_segment(&self, perm: &[usize], i: usize, j: usize) -> (Permutation, f64) {
        let before = self.edge(perm, i - 1) + self.edge(perm, j);
        let mut next = perm.to_vec();
        next[i..=j].reverse();
        let after = self.edge(&next, i - 1) + self.edge(&next, j);
        (next, after - before)
    }

    /// Swaps `perm[i]` and `perm[j]`.
    pub fn swap(&self, perm: &[usize], i: usize, j: usize) -> (Permutation, f64) {
        let mut touched = [i - 1, i, j - 1, j];
        touched.sort_unstable();
        let mut touched = touched.to_vec();
        touched.dedup();

        let before: f64 = touched.iter().map(|&k| self.edge(perm, k)).sum();
        let mut next = perm.to_vec();
        next.swap(i, j);
        let after: f64 = touched.iter().map(|&k| self.edge(&next, k)).sum();
        (next, after - before)
    }

    /// Moves the element at `from` so that it lands at index `to`.
    pub fn relocate(&self, perm: &[usize], from: usize, to: usize) -> (Permutation, f64) {
        let mut next = perm.to_vec();
        let item = next.remove(from);
        next.insert(to, item);
        let delta = self.matrix.cycle_length(&next) - self.matrix.cycle_length(perm);
        (next, delta)
    }

    /// Draws one random move and returns the candidate with its cost delta.
    pub fn random_move<R: Rng>(&self, perm: &[usize], rng: &mut R) -> (Permutation, f64) {
        let (i, j) = self.pick_pair(rng);
        match rng.random_range(0..4) {
            0 | 1 => self.reverse_segment(perm, i, j),
            2 => self.swap(perm, i, j),
            _ => {
                if rng.random_bool(0.5) {
                    self.relocate(perm, i, j)
                } else {
                    self.relocate(perm, j, i)
                }
            }
        }
    }
}

impl SaProblem for TourProblem<'_> {
    type Solution = Permutation;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Permutation {
        let mut perm: Permutation = (0..self.n()).collect();
        if self.shuffle_initial {
            perm[1..].shuffle(rng);
        }
        perm
    }

    fn cost(&self, perm: &Permutation) -> f64 {
        self.matrix.cycle_length(perm)
    }

    fn neighbor<R: Rng>(&self, perm: &Permutation, rng: &mut R) -> Permutation {
        self.random_move(perm, rng).0
    }

    fn neighbor_with_cost<R: Rng>(
        &self,
        perm: &Permutation,
        cost: f64,
        rng: &mut R,
    ) -> (Permutation, f64) {
        let (next, delta) = self.random_move(perm, rng);
        (next, cost + delta)
    }
}

/// Returns `true` if `perm` holds every position `0..n` exactly once.
pub fn is_permutation(perm: &[usize], n: usize) -> bool {
    if perm.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &p in perm {
        if p >= n || seen[p] {
            return false;
        }
        seen[p] = true;
    }
    true
}
