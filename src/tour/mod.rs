//! Open-path tours solved by simulated annealing.
//!
//! A [`TourProblem`] pins position 0 to the front of every permutation and
//! minimizes the closed-cycle length over a [`DistanceMatrix`]. When the
//! matrix was built with return suppression, every edge touching position 0
//! is free and the cycle length is the length of the open path that starts
//! there.
//!
//! [`DistanceMatrix`]: crate::distance::DistanceMatrix

mod config;
mod problem;
mod solver;

pub use config::TourConfig;
pub use problem::{is_permutation, Permutation, TourProblem};
pub use solver::{estimate_initial_temperature, solve, Tour};
