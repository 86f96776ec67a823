//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the board lifecycle and submissions so
//! clients can bubble them up with consistent context.
use thiserror::Error;

use leaderboard_core::{Category, ValidationError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires an entry repository to be configured before building")]
    MissingRepository,

    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Failures of the board lifecycle.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("leaderboard sync is already running")]
    AlreadyRunning,

    #[error("failed to subscribe to {category} entries")]
    Subscribe {
        category: Category,
        #[source]
        source: RepositoryError,
    },

    #[error("{category} board worker join failed")]
    WorkerJoin {
        category: Category,
        #[source]
        source: tokio::task::JoinError,
    },
}

/// Why a submission did not produce an entry.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Required fields were empty. Nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage refused the write. Nothing was committed.
    #[error("failed to store entry: {0}")]
    Storage(#[from] RepositoryError),
}

impl SubmitError {
    pub fn is_validation(&self) -> bool {
        matches!(self, SubmitError::Validation(_))
    }
}
