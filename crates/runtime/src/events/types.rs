//! Event types for different topics.

use leaderboard_core::{Category, Entry, Field};

/// Events about the live boards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardEvent {
    /// A board replaced its entries with a new snapshot.
    Updated {
        category: Category,
        revision: u64,
        entries: usize,
    },

    /// A board's live query failed; it keeps showing its last snapshot.
    SubscriptionFailed { category: Category, error: String },

    /// A board stopped following its collection.
    Closed { category: Category },
}

/// Events about entry submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEvent {
    /// The entry was stored.
    Accepted { category: Category, entry: Entry },

    /// Validation failed; nothing was written.
    Rejected { fields: Vec<Field> },

    /// Storage refused the write.
    Failed { category: Category, error: String },
}
