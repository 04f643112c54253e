//! Error types for the Deskmate application
//!
//! All errors use thiserror for structured error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A persisted collection payload that no longer decodes. Callers
    /// presenting data to a user recover by substituting the empty
    /// collection instead of failing.
    #[error("Corrupt data in collection '{collection}': {source}")]
    CorruptData {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u64 },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Generic(String),
}

impl AppError {
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, AppError::CorruptData { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
