//! In-process collection state with live snapshot delivery.
//!
//! Both repository implementations keep their documents here; they differ
//! only in what happens to a collection after it changes. Each collection has
//! its own lock. Listeners are notified while it is held, so snapshots for one
//! collection reach every subscriber in the order the changes were applied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::{Rng, distr::Alphanumeric};
use tokio::sync::mpsc;

use leaderboard_core::{Category, Entry, EntryId, EntryRecord, OrderBy};

use super::subscription::{Snapshot, Subscription, SubscriptionEvent, SubscriptionId};
use super::{RepositoryError, Result};

/// Length of generated document ids.
const AUTO_ID_LEN: usize = 20;

struct Listener {
    id: SubscriptionId,
    order: OrderBy,
    tx: mpsc::UnboundedSender<SubscriptionEvent>,
}

#[derive(Default)]
struct CollectionState {
    /// Documents in insertion order.
    entries: Vec<Entry>,
    listeners: Vec<Listener>,
    sequence: u64,
}

impl CollectionState {
    fn snapshot(&self, collection: Category, order: &OrderBy) -> Snapshot {
        let mut entries = self.entries.clone();
        order.sort(&mut entries);
        Snapshot {
            collection,
            entries,
            sequence: self.sequence,
        }
    }

    fn notify(&mut self, collection: Category) {
        let entries = &self.entries;
        let sequence = self.sequence;

        self.listeners.retain(|listener| {
            let mut sorted = entries.clone();
            listener.order.sort(&mut sorted);
            listener
                .tx
                .send(SubscriptionEvent::Snapshot(Snapshot {
                    collection,
                    entries: sorted,
                    sequence,
                }))
                .is_ok()
        });
    }
}

pub(crate) struct ObservableStore {
    staff: Mutex<CollectionState>,
    clients: Mutex<CollectionState>,
    next_listener: AtomicU64,
}

impl ObservableStore {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            staff: Mutex::default(),
            clients: Mutex::default(),
            next_listener: AtomicU64::new(1),
        })
    }

    fn collection(&self, collection: Category) -> &Mutex<CollectionState> {
        match collection {
            Category::Staff => &self.staff,
            Category::Clients => &self.clients,
        }
    }

    fn lock(&self, collection: Category) -> Result<MutexGuard<'_, CollectionState>> {
        self.collection(collection)
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)
    }

    /// Replace a collection's documents without notifying anyone.
    pub(crate) fn load(&self, collection: Category, entries: Vec<Entry>) -> Result<()> {
        self.lock(collection)?.entries = entries;
        Ok(())
    }

    /// Documents of a collection in insertion order.
    pub(crate) fn entries(&self, collection: Category) -> Result<Vec<Entry>> {
        Ok(self.lock(collection)?.entries.clone())
    }

    pub(crate) fn subscribe(
        self: &Arc<Self>,
        collection: Category,
        order: OrderBy,
    ) -> Result<Subscription> {
        let mut state = self.lock(collection)?;

        let id = SubscriptionId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::unbounded_channel();

        // The receiver is alive, so the initial snapshot cannot be refused.
        let _ = tx.send(SubscriptionEvent::Snapshot(
            state.snapshot(collection, &order),
        ));
        state.listeners.push(Listener { id, order, tx });

        tracing::debug!(
            collection = collection.collection(),
            id = id.0,
            entries = state.entries.len(),
            "Subscription opened"
        );

        Ok(Subscription::new(id, collection, rx, Arc::downgrade(self)))
    }

    /// Append a document, run `persist` over the new contents, then notify.
    ///
    /// If `persist` fails the document is taken back out and the error is
    /// returned; subscribers never see it.
    pub(crate) fn insert_with<F>(
        &self,
        collection: Category,
        record: EntryRecord,
        persist: F,
    ) -> Result<Entry>
    where
        F: FnOnce(&[Entry]) -> Result<()>,
    {
        let mut state = self.lock(collection)?;

        let entry = Entry::new(generate_id(&state.entries), record);
        state.entries.push(entry.clone());

        if let Err(err) = persist(&state.entries) {
            state.entries.pop();
            return Err(err);
        }

        state.sequence += 1;
        state.notify(collection);

        Ok(entry)
    }

    /// Remove a document, run `persist`, then notify.
    ///
    /// Returns `false` if no document had that id.
    pub(crate) fn remove_with<F>(
        &self,
        collection: Category,
        id: &EntryId,
        persist: F,
    ) -> Result<bool>
    where
        F: FnOnce(&[Entry]) -> Result<()>,
    {
        let mut state = self.lock(collection)?;

        let Some(index) = state.entries.iter().position(|entry| &entry.id == id) else {
            return Ok(false);
        };
        let removed = state.entries.remove(index);

        if let Err(err) = persist(&state.entries) {
            state.entries.insert(index, removed);
            return Err(err);
        }

        state.sequence += 1;
        state.notify(collection);

        Ok(true)
    }

    /// Deliver a failure to every open query on `collection` and drop them.
    ///
    /// Returns how many queries were failed.
    pub(crate) fn fail_listeners(&self, collection: Category, reason: &str) -> Result<usize> {
        let mut state = self.lock(collection)?;

        let listeners = std::mem::take(&mut state.listeners);
        let count = listeners.len();
        for listener in listeners {
            let _ = listener
                .tx
                .send(SubscriptionEvent::Failed(reason.to_string()));
        }

        Ok(count)
    }

    /// Forget a listener. Never fails, so it is usable from `Drop`.
    pub(crate) fn remove_listener(&self, collection: Category, id: SubscriptionId) {
        self.collection(collection)
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .retain(|listener| listener.id != id);
    }

    pub(crate) fn listener_count(&self, collection: Category) -> usize {
        self.collection(collection)
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .len()
    }
}

fn generate_id(existing: &[Entry]) -> EntryId {
    let mut rng = rand::rng();
    loop {
        let id: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(AUTO_ID_LEN)
            .map(char::from)
            .collect();

        if !existing.iter().any(|entry| entry.id.as_str() == id) {
            return EntryId::new(id);
        }
    }
}
