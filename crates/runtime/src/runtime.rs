//! High-level runtime orchestrator.
//!
//! The runtime owns the sync engine and its board workers, wires storage to
//! the submission path, and exposes a builder-based API for clients.

use std::sync::Arc;

use leaderboard_core::Category;

use crate::api::{LeaderboardHandle, Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::events::EventBus;
use crate::repository::EntryRepository;
use crate::submission::EntrySubmitter;
use crate::sync::LeaderboardSync;

/// Main runtime that keeps both boards live
///
/// Design: Runtime owns the workers and their lifecycle.
/// [`LeaderboardHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: LeaderboardHandle,
    sync: LeaderboardSync,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> LeaderboardHandle {
        self.handle.clone()
    }

    /// Re-open both live queries after [`Runtime::pause`].
    pub fn resume(&mut self) -> Result<()> {
        self.sync.start()?;
        Ok(())
    }

    /// Stop following storage; boards keep their last entries.
    pub async fn pause(&mut self) -> Result<()> {
        self.sync.stop().await?;
        Ok(())
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(mut self) -> Result<()> {
        self.sync.stop().await?;
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    repository: Option<Arc<dyn EntryRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            repository: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the entry repository (required)
    pub fn repository(mut self, repository: impl EntryRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Set a repository that is also used elsewhere
    pub fn shared_repository(mut self, repository: Arc<dyn EntryRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Build the runtime and start following both collections
    ///
    /// Must be awaited from within a Tokio runtime.
    pub async fn build(self) -> Result<Runtime> {
        let repository = self.repository.ok_or(RuntimeError::MissingRepository)?;

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let mut sync = LeaderboardSync::new(
            Arc::clone(&repository),
            self.config.order(),
            event_bus.clone(),
        );
        sync.start()?;

        let submitter = EntrySubmitter::new(repository, event_bus.clone());
        let handle = LeaderboardHandle::new(
            submitter,
            sync.watch(Category::Staff),
            sync.watch(Category::Clients),
            event_bus,
        );

        Ok(Runtime { handle, sync })
    }
}
