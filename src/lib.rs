//! Reading-order tours over embedded book collections.
//!
//! Given items that each carry an embedding vector, this crate computes a
//! pairwise distance matrix and solves an open-path traveling-salesman
//! problem over it with simulated annealing, producing an ordered visiting
//! sequence.
//!
//! - **Vector stores** ([`store`]): supply `{id, label, vector}` items from
//!   memory, a JSON file, or a bookshelf SQLite database.
//! - **Distance matrices** ([`distance`]): symmetric Euclidean matrices with
//!   an optional return-suppression policy that turns a closed-cycle
//!   objective into an open path from the first item.
//! - **Projection** ([`projection`]): maps embeddings to 2D for the visual
//!   tour.
//! - **Simulated Annealing** ([`sa`]): generic annealing engine with
//!   pluggable cooling schedules and a wall-clock budget.
//! - **Tours** ([`tour`]): the permutation neighborhood and solver.
//! - **Formatting** ([`format`]): numbered label lists, text listings, and
//!   SVG overlays.
//! - **Pipeline** ([`pipeline`]): full-space and visual tours end to end.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use shelf_tour::{distance, format, tour};
//!
//! let labels = ["DUNE", "EMMA", "BELOVED", "ULYSSES"];
//! let vectors = vec![
//!     vec![0.0, 0.0],
//!     vec![0.9, 0.1],
//!     vec![0.2, 0.8],
//!     vec![1.0, 1.0],
//! ];
//! let matrix = distance::build(&vectors, true).unwrap();
//! let config = tour::TourConfig::default()
//!     .with_time_budget(Duration::from_secs(2))
//!     .with_seed(42);
//! let solved = tour::solve(&matrix, &config).unwrap();
//! let result = format::format(&solved.permutation, &labels, &matrix).unwrap();
//! assert_eq!(result.numbered()[0], "1. DUNE");
//! ```

pub mod distance;
pub mod error;
pub mod format;
pub mod logging;
pub mod pipeline;
pub mod projection;
pub mod sa;
pub mod store;
pub mod tour;

pub use error::{Error, Result};
