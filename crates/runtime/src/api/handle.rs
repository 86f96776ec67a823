//! Cloneable façade for talking to the runtime.
//!
//! [`LeaderboardHandle`] hides the sync engine and storage behind a few async
//! helpers: submit a draft, read or watch a board, stream events by topic.
use std::collections::HashMap;

use tokio::sync::{broadcast, watch};

use leaderboard_core::{Category, Entry, EntryDraft};

use super::errors::SubmitError;
use crate::events::{Event, EventBus, Topic};
use crate::submission::EntrySubmitter;
use crate::sync::Leaderboard;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct LeaderboardHandle {
    submitter: EntrySubmitter,
    staff: watch::Receiver<Leaderboard>,
    clients: watch::Receiver<Leaderboard>,
    event_bus: EventBus,
}

impl LeaderboardHandle {
    pub(crate) fn new(
        submitter: EntrySubmitter,
        staff: watch::Receiver<Leaderboard>,
        clients: watch::Receiver<Leaderboard>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            submitter,
            staff,
            clients,
            event_bus,
        }
    }

    /// Validate a draft and store it in its category.
    ///
    /// The new entry shows up on the board once storage delivers the next
    /// snapshot, not when this returns.
    pub async fn submit(&self, draft: &EntryDraft) -> Result<Entry, SubmitError> {
        self.submitter.submit(draft).await
    }

    /// Current contents of a board.
    pub fn board(&self, category: Category) -> Leaderboard {
        self.receiver(category).borrow().clone()
    }

    /// Receiver notified on every change of a board.
    pub fn watch(&self, category: Category) -> watch::Receiver<Leaderboard> {
        self.receiver(category).clone()
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Leaderboard` - Board updates and live query failures
    /// - `Topic::Submission` - Accepted, rejected, and failed submissions
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use leaderboard_runtime::Topic;
    ///
    /// let mut rx = handle.subscribe(Topic::Submission);
    /// while let Ok(event) = rx.recv().await {
    ///     // React to submission outcomes
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    fn receiver(&self, category: Category) -> &watch::Receiver<Leaderboard> {
        match category {
            Category::Staff => &self.staff,
            Category::Clients => &self.clients,
        }
    }
}
