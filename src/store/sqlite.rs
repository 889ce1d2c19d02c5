//! Bookshelf SQLite store.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use super::{Item, VectorStore};
use crate::error::{Error, Result};

/// Reads embedded books from a bookshelf database.
///
/// Expects a `books` table with `id`, `title`, and an `embedding` TEXT
/// column holding a bracketed list of floats (`[0.12, -0.03, ...]`). Books
/// whose `embedding` is NULL are skipped.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    source: String,
}

impl SqliteStore {
    /// Opens an existing database read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::not_found(format!(
                "bookshelf database {} does not exist",
                path.display()
            )));
        }
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self {
            conn,
            source: path.display().to_string(),
        })
    }

    /// Wraps an already-open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            source: "the bookshelf database".to_owned(),
        }
    }

    fn has_embedding_column(&self) -> Result<bool> {
        let mut stmt = self.conn.prepare("PRAGMA table_info(books)")?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(columns.iter().any(|c| c == "embedding"))
    }
}

impl VectorStore for SqliteStore {
    fn fetch_all_vectors(&self) -> Result<Vec<Item>> {
        if !self.has_embedding_column()? {
            return Err(Error::no_embeddings(&self.source));
        }

        let mut stmt = self.conn.prepare(
            "SELECT id, title, embedding FROM books WHERE embedding IS NOT NULL ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut items = Vec::with_capacity(rows.len());
        for (id, title, embedding) in rows {
            let vector: Vec<f64> = serde_json::from_str(&embedding).map_err(|e| {
                Error::invalid_input(format!("embedding for book {id} is malformed: {e}"))
            })?;
            items.push(Item::new(id, title, vector));
        }

        if items.is_empty() {
            return Err(Error::no_embeddings(&self.source));
        }
        log::info!("loaded {} embedded books from {}", items.len(), self.source);
        Ok(items)
    }
}
