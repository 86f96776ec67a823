//! In-memory entry collections.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use leaderboard_core::{Category, Entry, EntryId, EntryRecord, OrderBy};

use crate::repository::store::ObservableStore;
use crate::repository::{EntryRepository, RepositoryError, Result, Subscription};

/// In-memory entry repository for testing and development.
///
/// Thread-safe but not persistent across process restarts. Besides the
/// [`EntryRepository`] contract it can simulate storage misbehaviour: rejected
/// writes, refused or dropped live queries, and documents removed by someone
/// else.
pub struct InMemoryEntryRepository {
    store: Arc<ObservableStore>,
    write_failures: Mutex<VecDeque<String>>,
    subscribe_failures: Mutex<HashMap<Category, VecDeque<String>>>,
    writes_attempted: AtomicUsize,
}

impl InMemoryEntryRepository {
    /// Create a repository with two empty collections.
    pub fn new() -> Self {
        Self {
            store: ObservableStore::new(),
            write_failures: Mutex::new(VecDeque::new()),
            subscribe_failures: Mutex::new(HashMap::new()),
            writes_attempted: AtomicUsize::new(0),
        }
    }

    /// Reject the next `create` call with `reason`.
    ///
    /// Calls queue up: each one rejects one further write.
    pub fn fail_next_write(&self, reason: impl Into<String>) -> Result<()> {
        self.write_failures
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .push_back(reason.into());
        Ok(())
    }

    /// Refuse the next `subscribe` call on `collection` with `reason`.
    ///
    /// Queues per collection like [`fail_next_write`](Self::fail_next_write).
    pub fn fail_next_subscribe(
        &self,
        collection: Category,
        reason: impl Into<String>,
    ) -> Result<()> {
        self.subscribe_failures
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .entry(collection)
            .or_default()
            .push_back(reason.into());
        Ok(())
    }

    /// Drop every open live query on `collection` with a failure event.
    ///
    /// Returns how many queries were failed.
    pub fn fail_subscriptions(&self, collection: Category, reason: &str) -> Result<usize> {
        self.store.fail_listeners(collection, reason)
    }

    /// Remove a document as if another client had deleted it.
    pub fn remove_external(&self, collection: Category, id: &EntryId) -> Result<bool> {
        self.store.remove_with(collection, id, |_| Ok(()))
    }

    /// Documents of `collection` in insertion order.
    pub fn entries(&self, collection: Category) -> Result<Vec<Entry>> {
        self.store.entries(collection)
    }

    /// Number of `create` calls seen, successful or not.
    pub fn writes_attempted(&self) -> usize {
        self.writes_attempted.load(Ordering::SeqCst)
    }

    /// Number of live queries currently open on `collection`.
    pub fn subscriber_count(&self, collection: Category) -> usize {
        self.store.listener_count(collection)
    }

    fn take_write_failure(&self) -> Result<Option<String>> {
        Ok(self
            .write_failures
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .pop_front())
    }

    fn take_subscribe_failure(&self, collection: Category) -> Result<Option<String>> {
        Ok(self
            .subscribe_failures
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .get_mut(&collection)
            .and_then(VecDeque::pop_front))
    }
}

impl Default for InMemoryEntryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntryRepository for InMemoryEntryRepository {
    async fn create(&self, collection: Category, record: EntryRecord) -> Result<Entry> {
        self.writes_attempted.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = self.take_write_failure()? {
            tracing::debug!(
                collection = collection.collection(),
                "Rejecting write: {}",
                reason
            );
            return Err(RepositoryError::WriteRejected(reason));
        }

        self.store.insert_with(collection, record, |_| Ok(()))
    }

    fn subscribe(&self, collection: Category, order: OrderBy) -> Result<Subscription> {
        if let Some(reason) = self.take_subscribe_failure(collection)? {
            tracing::debug!(
                collection = collection.collection(),
                "Rejecting subscription: {}",
                reason
            );
            return Err(RepositoryError::QueryRejected(reason));
        }

        self.store.subscribe(collection, order)
    }
}
