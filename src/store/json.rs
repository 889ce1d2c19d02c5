//! JSON file store.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{Item, ItemId, VectorStore};
use crate::error::{Error, Result};

/// A JSON array of `{"id", "label", "vector"}` records.
///
/// `vector` may be `null` or absent for items that were never embedded;
/// those are skipped.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Record {
    id: ItemId,
    label: String,
    #[serde(default)]
    vector: Option<Vec<f64>>,
}

impl JsonStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VectorStore for JsonStore {
    fn fetch_all_vectors(&self) -> Result<Vec<Item>> {
        let text = fs::read_to_string(&self.path)?;
        let records: Vec<Record> = serde_json::from_str(&text)?;
        let total = records.len();

        let items: Vec<Item> = records
            .into_iter()
            .filter_map(|r| {
                r.vector.map(|vector| Item {
                    id: r.id,
                    label: r.label,
                    vector,
                })
            })
            .collect();

        if items.len() < total {
            log::warn!(
                "skipped {} records without embeddings in {}",
                total - items.len(),
                self.path.display()
            );
        }
        if items.is_empty() {
            return Err(Error::no_embeddings(self.path.display()));
        }
        Ok(items)
    }
}
