//! Error types for keyrate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Failure in the SQLite-backed store.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted value could not be encoded or decoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("logging setup failed: {message}")]
    Logging { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
