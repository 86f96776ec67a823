//! Board state published to readers.

use leaderboard_core::{Category, Entry};

/// Connection state of one board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardStatus {
    /// Waiting for the first snapshot.
    Connecting,
    /// Following the collection.
    Live,
    /// The live query failed or ended; `entries` is the last known snapshot.
    Stale { reason: String },
    /// The sync engine was stopped.
    Closed,
}

/// Ranked entries of one category, as last delivered by storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaderboard {
    pub category: Category,
    /// Entries in ranking order.
    pub entries: Vec<Entry>,
    /// Number of snapshots applied so far.
    pub revision: u64,
    pub status: BoardStatus,
}

impl Leaderboard {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            entries: Vec::new(),
            revision: 0,
            status: BoardStatus::Connecting,
        }
    }

    pub fn is_live(&self) -> bool {
        self.status == BoardStatus::Live
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries paired with their 1-based rank.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &Entry)> {
        self.entries.iter().enumerate().map(|(i, entry)| (i + 1, entry))
    }

    /// Lap-time strings in ranking order.
    pub fn lap_times(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.lap_time.as_str())
            .collect()
    }

    pub(crate) fn replace(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.revision += 1;
        self.status = BoardStatus::Live;
    }

    pub(crate) fn mark_stale(&mut self, reason: impl Into<String>) {
        self.status = BoardStatus::Stale {
            reason: reason.into(),
        };
    }

    pub(crate) fn mark_connecting(&mut self) {
        self.status = BoardStatus::Connecting;
    }

    pub(crate) fn mark_closed(&mut self) {
        self.status = BoardStatus::Closed;
    }
}
