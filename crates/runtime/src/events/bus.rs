//! Topic-based event bus implementation.

use std::collections::HashMap;

use tokio::sync::broadcast;

use super::types::{LeaderboardEvent, SubmissionEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Board updates and live query failures
    Leaderboard,
    /// Entry submission outcomes
    Submission,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Leaderboard(LeaderboardEvent),
    Submission(SubmissionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Leaderboard(_) => Topic::Leaderboard,
            Event::Submission(_) => Topic::Submission,
        }
    }
}

impl From<LeaderboardEvent> for Event {
    fn from(event: LeaderboardEvent) -> Self {
        Event::Leaderboard(event)
    }
}

impl From<SubmissionEvent> for Event {
    fn from(event: SubmissionEvent) -> Self {
        Event::Submission(event)
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Clones share the same channels.
#[derive(Clone)]
pub struct EventBus {
    leaderboard: broadcast::Sender<Event>,
    submission: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            leaderboard: broadcast::channel(capacity).0,
            submission: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Leaderboard => &self.leaderboard,
            Topic::Submission => &self.submission,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();

        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
