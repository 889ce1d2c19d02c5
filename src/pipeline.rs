//! End-to-end tours: store → (projection) → distances → annealing → artifact.
//!
//! Full-space mode measures distances in the native embedding space and
//! writes a text listing. Visual mode measures distances between projected
//! 2D points and writes an SVG of the tour over the scatter.

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};

use crate::distance;
use crate::error::{Error, Result};
use crate::format::{self, TourResult};
use crate::projection::Projection;
use crate::store::{Item, VectorStore};
use crate::tour::{self, TourConfig};

/// Settings shared by both tour modes.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub tour: TourConfig,

    /// Make edges touching the first item free, so the tour is an open path.
    pub suppress_return: bool,

    /// Directory artifacts are written to.
    pub out_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tour: TourConfig::default(),
            suppress_return: true,
            out_dir: PathBuf::from("."),
        }
    }
}

/// Tours the items in their native embedding space and writes
/// `<timestamp>_tour.txt`.
pub fn full_space_tour<S: VectorStore>(store: S, config: &PipelineConfig) -> Result<TourResult> {
    full_space_tour_at(store, config, Local::now().naive_local())
}

/// [`full_space_tour`] with an explicit artifact timestamp.
pub fn full_space_tour_at<S: VectorStore>(
    store: S,
    config: &PipelineConfig,
    now: NaiveDateTime,
) -> Result<TourResult> {
    let items = store.fetch_all_vectors()?;
    let (labels, vectors) = split(items);
    log::info!("planning full-space tour over {} items", labels.len());

    let matrix = distance::build(&vectors, config.suppress_return)?;
    let solved = tour::solve(&matrix, &config.tour)?;
    let result = format::format(&solved.permutation, &labels, &matrix)?;

    let path = format::write_text_artifact(&result, &config.out_dir, now)?;
    Ok(result.with_artifact(path))
}

/// Projects the items to 2D, tours them in projected space, and writes
/// `<timestamp>_tour.svg`.
pub fn visual_tour<S: VectorStore, P: Projection>(
    store: S,
    projection: &P,
    config: &PipelineConfig,
) -> Result<TourResult> {
    visual_tour_at(store, projection, config, Local::now().naive_local())
}

/// [`visual_tour`] with an explicit artifact timestamp.
pub fn visual_tour_at<S: VectorStore, P: Projection>(
    store: S,
    projection: &P,
    config: &PipelineConfig,
    now: NaiveDateTime,
) -> Result<TourResult> {
    let items = store.fetch_all_vectors()?;
    let (labels, vectors) = split(items);
    distance::validate(&vectors)?;
    log::info!("planning visual tour over {} items", labels.len());

    let points = projection.project(&vectors)?;
    if points.len() != vectors.len() {
        return Err(Error::invalid_input(format!(
            "projection returned {} points for {} vectors",
            points.len(),
            vectors.len()
        )));
    }

    let matrix = distance::from_points(&points, config.suppress_return)?;
    let solved = tour::solve(&matrix, &config.tour)?;
    let result = format::format(&solved.permutation, &labels, &matrix)?;

    let svg = format::render_svg(&points, &labels, &solved.permutation)?;
    let path = format::write_svg_artifact(&svg, &config.out_dir, now)?;
    Ok(result.with_artifact(path))
}

fn split(items: Vec<Item>) -> (Vec<String>, Vec<Vec<f64>>) {
    items.into_iter().map(|item| (item.label, item.vector)).unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{FixedProjection, Point2};
    use crate::store::MemoryStore;
    use std::time::Duration;

    fn config(dir: &std::path::Path) -> PipelineConfig {
        PipelineConfig {
            tour: TourConfig::default()
                .with_time_budget(Duration::from_secs(10))
                .with_seed(7),
            suppress_return: true,
            out_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_empty_store_propagates_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = full_space_tour(MemoryStore::default(), &config(dir.path())).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_single_item_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new(vec![Item::new("1", "DUNE", vec![1.0, 2.0])]);
        let err = full_space_tour(&store, &config(dir.path())).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_visual_rejects_short_projection() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new(vec![
            Item::new("1", "A", vec![1.0]),
            Item::new("2", "B", vec![2.0]),
            Item::new("3", "C", vec![3.0]),
        ]);

        struct Short;
        impl Projection for Short {
            fn project(&self, _vectors: &[Vec<f64>]) -> Result<Vec<Point2>> {
                Ok(vec![Point2::new(0.0, 0.0)])
            }
        }

        let err = visual_tour(&store, &Short, &config(dir.path())).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_visual_uses_projected_distances() {
        let dir = tempfile::tempdir().unwrap();
        // Native vectors say A-B-C-D; the projection reverses B and D.
        let store = MemoryStore::new(vec![
            Item::new("1", "A", vec![0.0]),
            Item::new("2", "B", vec![1.0]),
            Item::new("3", "C", vec![2.0]),
            Item::new("4", "D", vec![3.0]),
            Item::new("5", "E", vec![4.0]),
        ]);
        let projection = FixedProjection::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(4.0, 0.0),
        ]);
        let result = visual_tour(&store, &projection, &config(dir.path())).unwrap();
        // Open path over B..E in projected space has length 3
        assert!((result.total_length - 3.0).abs() < 1e-9);
        assert_eq!(result.entries[0], "A");
        let artifact = result.artifact.as_ref().unwrap();
        assert_eq!(artifact.extension().and_then(|e| e.to_str()), Some("svg"));
    }
}
