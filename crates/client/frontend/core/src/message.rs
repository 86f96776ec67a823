//! Shared message log primitives for CLI and future UIs.
use std::collections::VecDeque;

/// Severity level for notices shown to the user.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// Snapshot of a single message entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageEntry {
    pub text: String,
    pub level: MessageLevel,
}

impl MessageEntry {
    pub fn new(text: impl Into<String>, level: MessageLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, MessageLevel::Info)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, MessageLevel::Warning)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, MessageLevel::Error)
    }
}

/// Circular buffer of notices displayed to the user.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
    /// Entries pushed since creation, including evicted ones.
    pushed: u64,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
            pushed: 0,
        }
    }

    pub fn push(&mut self, entry: MessageEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        self.pushed += 1;
    }

    pub fn push_text(&mut self, message: impl Into<String>) {
        self.push(MessageEntry::info(message));
    }

    /// Most recent entry, if any.
    pub fn last(&self) -> Option<&MessageEntry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter()
    }

    /// Position to pass to [`MessageLog::since`] later.
    pub fn mark(&self) -> u64 {
        self.pushed
    }

    /// Entries pushed after `mark` that are still retained, oldest first.
    pub fn since(&self, mark: u64) -> impl Iterator<Item = &MessageEntry> {
        let fresh = usize::try_from(self.pushed.saturating_sub(mark)).unwrap_or(usize::MAX);
        let skip = self.entries.len().saturating_sub(fresh);
        self.entries.iter().skip(skip)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
