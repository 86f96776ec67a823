//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
///
/// Every variant is a storage failure from the caller's point of view: the
/// operation did not happen and nothing was committed.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("entry store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("write rejected: {0}")]
    WriteRejected(String),

    #[error("query rejected: {0}")]
    QueryRejected(String),

    #[error("storage task failed: {0}")]
    TaskFailed(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
