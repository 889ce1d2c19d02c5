//! Pairwise distance matrices.
//!
//! Builds the symmetric Euclidean matrix a tour is solved over, either in
//! the native embedding space or over projected 2D coordinates, with an
//! optional policy that makes every edge touching position 0 free.

mod builder;
mod matrix;

pub use builder::{build, euclidean, from_points};
pub(crate) use builder::validate;
pub use matrix::DistanceMatrix;
