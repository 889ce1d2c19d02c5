//! Tour presentation: numbered label lists and rendered artifacts.

mod artifact;
mod svg;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::tour::is_permutation;

pub use artifact::{artifact_path, timestamp, write_svg_artifact, write_text_artifact};
pub use svg::render_svg;

/// A formatted tour. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourResult {
    /// Labels in visiting order.
    pub entries: Vec<String>,

    /// Closed-cycle length of the tour; with return suppression this is the
    /// open-path length.
    pub total_length: f64,

    /// Rendered artifact, when one was written.
    pub artifact: Option<PathBuf>,
}

impl TourResult {
    /// `"1. First"`, `"2. Second"`, ...
    pub fn numbered(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, label)| format!("{}. {label}", i + 1))
            .collect()
    }

    pub fn with_artifact(mut self, path: impl AsRef<Path>) -> Self {
        self.artifact = Some(path.as_ref().to_path_buf());
        self
    }
}

/// Orders `labels` by `permutation`.
///
/// The permutation is presented as-is. Tours from [`solve`](crate::tour::solve)
/// start at position 0, so the free edge of a return-suppressed matrix is the
/// one from the last entry back to the first.
///
/// # Examples
///
/// ```
/// use shelf_tour::distance::build;
/// use shelf_tour::format::format;
///
/// let matrix = build(&[vec![0.0], vec![1.0], vec![2.0]], false).unwrap();
/// let result = format(&[2, 0, 1], &["A", "B", "C"], &matrix).unwrap();
/// assert_eq!(result.numbered(), ["1. C", "2. A", "3. B"]);
/// ```
pub fn format<L: AsRef<str>>(
    permutation: &[usize],
    labels: &[L],
    matrix: &DistanceMatrix,
) -> Result<TourResult> {
    if labels.len() != matrix.size() {
        return Err(Error::invalid_input(format!(
            "{} labels for a {}-item matrix",
            labels.len(),
            matrix.size()
        )));
    }
    if !is_permutation(permutation, labels.len()) {
        return Err(Error::invalid_input(format!(
            "{permutation:?} is not a permutation of 0..{}",
            labels.len()
        )));
    }

    Ok(TourResult {
        entries: permutation
            .iter()
            .map(|&p| labels[p].as_ref().to_owned())
            .collect(),
        total_length: matrix.cycle_length(permutation),
        artifact: None,
    })
}
