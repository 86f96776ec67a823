//! Repository contract for the two entry collections.

use async_trait::async_trait;

use leaderboard_core::{Category, Entry, EntryRecord, OrderBy};

use super::Result;
use super::subscription::Subscription;

/// Storage for lap-time entries with live, ordered queries.
///
/// Each [`Category`] maps to one independent collection. Implementations must
/// deliver snapshots for a collection in the order its changes were applied,
/// and must never notify a collection's subscribers about another
/// collection's writes.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Append one document to `collection`.
    ///
    /// Returns the stored entry with its assigned id. On error nothing was
    /// committed and no subscriber was notified.
    async fn create(&self, collection: Category, record: EntryRecord) -> Result<Entry>;

    /// Open a live query over `collection`.
    ///
    /// The returned subscription already holds the current snapshot, sorted by
    /// `order`. A new full snapshot follows every change to the collection.
    fn subscribe(&self, collection: Category, order: OrderBy) -> Result<Subscription>;
}
