//! Board worker: applies one collection's snapshots to its board.
//!
//! Design principles:
//! - Every snapshot replaces the board wholesale; nothing is patched
//! - A failed or ended live query leaves the last snapshot in place
//! - Shutdown closes the subscription before the worker returns

use std::sync::Arc;

use tokio::sync::{oneshot, watch};
use tracing::{debug, info, warn};

use leaderboard_core::Category;

use crate::events::{EventBus, LeaderboardEvent};
use crate::repository::{Snapshot, Subscription, SubscriptionEvent};
use crate::sync::Leaderboard;

/// Background worker that keeps one board in step with its collection.
pub(crate) struct BoardWorker {
    category: Category,
    subscription: Subscription,
    board: Arc<watch::Sender<Leaderboard>>,
    event_bus: EventBus,
    shutdown: oneshot::Receiver<()>,
}

impl BoardWorker {
    pub(crate) fn new(
        subscription: Subscription,
        board: Arc<watch::Sender<Leaderboard>>,
        event_bus: EventBus,
        shutdown: oneshot::Receiver<()>,
    ) -> Self {
        Self {
            category: subscription.collection(),
            subscription,
            board,
            event_bus,
            shutdown,
        }
    }

    /// Main worker loop.
    ///
    /// Runs until a shutdown signal arrives or its sender is dropped.
    pub(crate) async fn run(mut self) {
        info!("{} board worker started", self.category);

        loop {
            tokio::select! {
                biased;
                _ = &mut self.shutdown => break,
                event = self.subscription.recv() => match event {
                    Some(SubscriptionEvent::Snapshot(snapshot)) => self.apply(snapshot),
                    Some(SubscriptionEvent::Failed(error)) => self.fail(error),
                    None => {
                        self.ended();
                        // Nothing more can arrive; wait to be told to stop.
                        let _ = (&mut self.shutdown).await;
                        break;
                    }
                },
            }
        }

        self.subscription.unsubscribe();
        self.board.send_modify(Leaderboard::mark_closed);
        self.event_bus.publish(LeaderboardEvent::Closed {
            category: self.category,
        });

        info!("{} board worker stopped", self.category);
    }

    fn apply(&mut self, snapshot: Snapshot) {
        let entries = snapshot.entries.len();
        let mut revision = 0;

        self.board.send_modify(|board| {
            board.replace(snapshot.entries);
            revision = board.revision;
        });

        debug!(
            category = %self.category,
            sequence = snapshot.sequence,
            revision,
            entries,
            "Applied snapshot"
        );

        self.event_bus.publish(LeaderboardEvent::Updated {
            category: self.category,
            revision,
            entries,
        });
    }

    fn fail(&mut self, error: String) {
        warn!(
            "{} subscription failed, keeping last snapshot: {}",
            self.category, error
        );

        self.board.send_modify(|board| board.mark_stale(error.clone()));
        self.event_bus.publish(LeaderboardEvent::SubscriptionFailed {
            category: self.category,
            error,
        });
    }

    fn ended(&mut self) {
        let already_stale = matches!(
            self.board.borrow().status,
            crate::sync::BoardStatus::Stale { .. }
        );

        if !already_stale {
            warn!("{} subscription ended, keeping last snapshot", self.category);
            self.board
                .send_modify(|board| board.mark_stale("subscription ended"));
        }
    }
}
