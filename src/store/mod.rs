//! Vector store adapters.
//!
//! A store supplies every item that has an embedding as an [`Item`]. Items
//! without an embedding are skipped; a store with no embedded items at all
//! reports [`Error::NotFound`] so callers can point the user at embedding
//! generation.

mod json;
mod sqlite;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use json::JsonStore;
pub use sqlite::SqliteStore;

/// Opaque item identifier, as the backing store spells it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// One embedded item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub label: String,
    pub vector: Vec<f64>,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, label: impl Into<String>, vector: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            vector,
        }
    }
}

/// Source of `{id, label, vector}` triples.
pub trait VectorStore {
    /// Every item that has an embedding, in a stable order.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no item has an embedding.
    fn fetch_all_vectors(&self) -> Result<Vec<Item>>;
}

impl<S: VectorStore + ?Sized> VectorStore for &S {
    fn fetch_all_vectors(&self) -> Result<Vec<Item>> {
        (**self).fetch_all_vectors()
    }
}

/// Items held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Vec<Item>,
}

impl MemoryStore {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl VectorStore for MemoryStore {
    fn fetch_all_vectors(&self) -> Result<Vec<Item>> {
        if self.items.is_empty() {
            return Err(Error::no_embeddings("the in-memory store"));
        }
        Ok(self.items.clone())
    }
}
