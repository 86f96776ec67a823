//! Live query handles.

use std::sync::Weak;

use tokio::sync::mpsc;

use leaderboard_core::{Category, Entry};

use super::store::ObservableStore;

/// Identifier of one live query within a store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct SubscriptionId(pub(crate) u64);

/// Complete, ordered contents of a collection at one point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub collection: Category,
    pub entries: Vec<Entry>,
    /// Number of changes applied to the collection when this was taken.
    pub sequence: u64,
}

/// Item delivered on a live query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubscriptionEvent {
    Snapshot(Snapshot),
    /// The query was dropped by storage. Nothing follows a failure.
    Failed(String),
}

/// Handle to a live query opened with
/// [`EntryRepository::subscribe`](super::EntryRepository::subscribe).
///
/// Dropping the handle unsubscribes it.
pub struct Subscription {
    id: SubscriptionId,
    collection: Category,
    rx: mpsc::UnboundedReceiver<SubscriptionEvent>,
    store: Weak<ObservableStore>,
    closed: bool,
}

impl Subscription {
    pub(crate) fn new(
        id: SubscriptionId,
        collection: Category,
        rx: mpsc::UnboundedReceiver<SubscriptionEvent>,
        store: Weak<ObservableStore>,
    ) -> Self {
        Self {
            id,
            collection,
            rx,
            store,
            closed: false,
        }
    }

    pub fn collection(&self) -> Category {
        self.collection
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Wait for the next event.
    ///
    /// Returns `None` once the subscription is closed or the stream ended.
    pub async fn recv(&mut self) -> Option<SubscriptionEvent> {
        if self.closed {
            return None;
        }
        self.rx.recv().await
    }

    /// Take the next already-delivered event without waiting.
    pub fn try_recv(&mut self) -> Option<SubscriptionEvent> {
        if self.closed {
            return None;
        }
        self.rx.try_recv().ok()
    }

    /// Stop the query.
    ///
    /// Safe to call any number of times. Once this returns, no further event
    /// is handed out, including ones that were queued but not yet read.
    pub fn unsubscribe(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Some(store) = self.store.upgrade() {
            store.remove_listener(self.collection, self.id);
        }

        self.rx.close();
        while self.rx.try_recv().is_ok() {}

        tracing::debug!(
            collection = self.collection.collection(),
            id = self.id.0,
            "Subscription closed"
        );
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("collection", &self.collection)
            .field("closed", &self.closed)
            .finish()
    }
}
