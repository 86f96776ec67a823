//! Utilities for reacting to runtime events inside UI layers.
use leaderboard_runtime::{Event, LeaderboardEvent};

use crate::message::{MessageEntry, MessageLog};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventImpact {
    pub requires_redraw: bool,
}

impl EventImpact {
    pub const fn none() -> Self {
        Self {
            requires_redraw: false,
        }
    }

    pub const fn redraw() -> Self {
        Self {
            requires_redraw: true,
        }
    }

    pub fn combine(self, other: Self) -> Self {
        Self {
            requires_redraw: self.requires_redraw || other.requires_redraw,
        }
    }
}

pub trait EventConsumer {
    fn message_log(&self) -> &MessageLog;
    fn message_log_mut(&mut self) -> &mut MessageLog;

    /// Default handling: board changes redraw, lost live queries post a
    /// warning. Submission outcomes are left to [`crate::SubmissionFlow`].
    fn on_event(&mut self, event: &Event) -> EventImpact {
        match event {
            Event::Leaderboard(LeaderboardEvent::Updated { .. }) => EventImpact::redraw(),
            Event::Leaderboard(LeaderboardEvent::SubscriptionFailed { category, error }) => {
                self.message_log_mut().push(MessageEntry::warning(format!(
                    "{} is no longer updating: {}",
                    category.title(),
                    error
                )));
                EventImpact::redraw()
            }
            Event::Leaderboard(LeaderboardEvent::Closed { .. }) => EventImpact::redraw(),
            Event::Submission(_) => EventImpact::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageLevel;
    use leaderboard_core::Category;
    use leaderboard_runtime::SubmissionEvent;

    struct Log(MessageLog);

    impl EventConsumer for Log {
        fn message_log(&self) -> &MessageLog {
            &self.0
        }

        fn message_log_mut(&mut self) -> &mut MessageLog {
            &mut self.0
        }
    }

    #[test]
    fn failed_live_query_posts_warning() {
        let mut log = Log(MessageLog::new(4));
        let impact = log.on_event(&Event::Leaderboard(LeaderboardEvent::SubscriptionFailed {
            category: Category::Clients,
            error: "offline".into(),
        }));

        assert!(impact.requires_redraw);
        let last = log.message_log().last().unwrap();
        assert_eq!(last.level, MessageLevel::Warning);
        assert_eq!(
            last.text,
            "Client & Supplier Leaderboard is no longer updating: offline"
        );
    }

    #[test]
    fn submission_events_are_ignored() {
        let mut log = Log(MessageLog::new(4));
        let impact = log.on_event(&Event::Submission(SubmissionEvent::Rejected {
            fields: vec![],
        }));

        assert_eq!(impact, EventImpact::none());
        assert!(log.message_log().is_empty());
        assert!(EventImpact::none().combine(EventImpact::redraw()).requires_redraw);
    }
}
