//! Core trait for Simulated Annealing.

use rand::Rng;

/// Defines a Simulated Annealing problem.
///
/// The implementor supplies neighbor generation and cost evaluation.
/// The runner handles temperature management, the acceptance criterion,
/// cooling, and the deadline.
///
/// SA minimizes the cost function. For maximization, negate the cost.
///
/// # Examples
///
/// ```ignore
/// struct Sphere { dim: usize }
///
/// impl SaProblem for Sphere {
///     type Solution = Vec<f64>;
///
///     fn initial_solution<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
///         (0..self.dim).map(|_| rng.random_range(-5.0..5.0)).collect()
///     }
///
///     fn cost(&self, x: &Vec<f64>) -> f64 {
///         x.iter().map(|v| v * v).sum()
///     }
///
///     fn neighbor<R: Rng>(&self, x: &Vec<f64>, rng: &mut R) -> Vec<f64> {
///         let mut next = x.clone();
///         let i = rng.random_range(0..self.dim);
///         next[i] += rng.random_range(-0.5..0.5);
///         next
///     }
/// }
/// ```
pub trait SaProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Creates the starting solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Computes the cost of a solution. Lower is better.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Generates a neighbor of the current solution.
    ///
    /// The neighborhood must be connected: any solution reachable from any
    /// other via a sequence of moves.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;

    /// Generates a neighbor together with its cost.
    ///
    /// `cost` is the cost of `solution`. Override this when a move's cost
    /// can be computed from the delta instead of a full re-evaluation.
    fn neighbor_with_cost<R: Rng>(
        &self,
        solution: &Self::Solution,
        cost: f64,
        rng: &mut R,
    ) -> (Self::Solution, f64) {
        let _ = cost;
        let next = self.neighbor(solution, rng);
        let next_cost = self.cost(&next);
        (next, next_cost)
    }
}
