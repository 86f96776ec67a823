//! Live leaderboards for both categories.
//!
//! [`LeaderboardSync`] opens one ordered live query per category and hands
//! each to a board worker. Readers observe the boards through `watch`
//! channels, so they always see a complete snapshot, never a partial one.

mod board;

pub use board::{BoardStatus, Leaderboard};

use std::sync::Arc;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use leaderboard_core::{Category, OrderBy};

use crate::api::SyncError;
use crate::events::EventBus;
use crate::repository::EntryRepository;
use crate::workers::BoardWorker;

struct RunningBoard {
    category: Category,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// Keeps the staff and clients boards in step with storage.
///
/// Boards are created empty and in [`BoardStatus::Connecting`]; they outlive
/// start/stop cycles so readers can hold their `watch` receivers throughout.
pub struct LeaderboardSync {
    repository: Arc<dyn EntryRepository>,
    order: OrderBy,
    event_bus: EventBus,
    staff: Arc<watch::Sender<Leaderboard>>,
    clients: Arc<watch::Sender<Leaderboard>>,
    running: Vec<RunningBoard>,
}

impl LeaderboardSync {
    pub fn new(repository: Arc<dyn EntryRepository>, order: OrderBy, event_bus: EventBus) -> Self {
        let (staff, _) = watch::channel(Leaderboard::new(Category::Staff));
        let (clients, _) = watch::channel(Leaderboard::new(Category::Clients));

        Self {
            repository,
            order,
            event_bus,
            staff: Arc::new(staff),
            clients: Arc::new(clients),
            running: Vec::new(),
        }
    }

    pub fn order(&self) -> OrderBy {
        self.order
    }

    pub fn is_running(&self) -> bool {
        !self.running.is_empty()
    }

    /// Open both live queries and start applying their snapshots.
    ///
    /// Both subscriptions are opened before any worker starts; if the second
    /// one fails the first is closed again and nothing keeps running.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self) -> Result<(), SyncError> {
        if self.is_running() {
            return Err(SyncError::AlreadyRunning);
        }

        let mut subscriptions = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let subscription = self
                .repository
                .subscribe(category, self.order)
                .map_err(|source| SyncError::Subscribe { category, source })?;
            subscriptions.push(subscription);
        }

        for subscription in subscriptions {
            let category = subscription.collection();
            let board = Arc::clone(self.sender(category));
            board.send_modify(Leaderboard::mark_connecting);

            let (shutdown_tx, shutdown_rx) = oneshot::channel();
            let worker = BoardWorker::new(subscription, board, self.event_bus.clone(), shutdown_rx);
            let handle = tokio::spawn(worker.run());

            self.running.push(RunningBoard {
                category,
                shutdown: shutdown_tx,
                handle,
            });
        }

        info!(
            "Leaderboard sync started (order: {} {}, {})",
            self.order.field, self.order.direction, self.order.comparison
        );

        Ok(())
    }

    /// Close both live queries and wait for the workers to finish.
    ///
    /// Calling this when nothing is running is a no-op. Boards keep their
    /// last entries and end up in [`BoardStatus::Closed`].
    pub async fn stop(&mut self) -> Result<(), SyncError> {
        if !self.is_running() {
            debug!("Leaderboard sync already stopped");
            return Ok(());
        }

        let mut result = Ok(());
        for board in std::mem::take(&mut self.running) {
            // The worker may already be gone; joining reports why.
            let _ = board.shutdown.send(());

            if let Err(source) = board.handle.await
                && result.is_ok()
            {
                result = Err(SyncError::WorkerJoin {
                    category: board.category,
                    source,
                });
            }
        }

        info!("Leaderboard sync stopped");
        result
    }

    /// Current contents of a board.
    pub fn board(&self, category: Category) -> Leaderboard {
        self.sender(category).borrow().clone()
    }

    /// Receiver that is notified every time a board changes.
    pub fn watch(&self, category: Category) -> watch::Receiver<Leaderboard> {
        self.sender(category).subscribe()
    }

    fn sender(&self, category: Category) -> &Arc<watch::Sender<Leaderboard>> {
        match category {
            Category::Staff => &self.staff,
            Category::Clients => &self.clients,
        }
    }
}
