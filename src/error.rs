//! Error taxonomy shared by every stage of the tour pipeline.

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Malformed or insufficient input: empty vector sets, ragged
    /// dimensions, bad configuration, or a sequence that is not a
    /// permutation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Input that is well-formed but too small to form a tour.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// The vector store holds no usable embeddings.
    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Projection backend failures.
    #[error("projection failed: {0}")]
    Projection(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn degenerate_input(message: impl Into<String>) -> Self {
        Self::DegenerateInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn projection(message: impl Into<String>) -> Self {
        Self::Projection(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// The condition callers hit when embeddings were never generated.
    pub fn no_embeddings(source: impl std::fmt::Display) -> Self {
        Self::NotFound(format!(
            "no embeddings found in {source}; did you generate embeddings first?"
        ))
    }
}
