//! Runtime for the lap-time leaderboard.
//!
//! This crate wires storage, live queries, and background workers into a
//! runtime API. Consumers embed [`Runtime`] to keep the staff and clients
//! boards live and submit new entries through [`LeaderboardHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`sync`] keeps the boards in step with storage
//! - [`repository`] stores entries and serves ordered live queries
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod config;
pub mod events;
pub mod repository;
pub mod runtime;
pub mod submission;
pub mod sync;

mod workers;

pub use api::{LeaderboardHandle, Result, RuntimeError, SubmitError, SyncError};
pub use config::{RuntimeConfig, StorageBackend, StorageConfig};
pub use events::{Event, EventBus, LeaderboardEvent, SubmissionEvent, Topic};
pub use repository::{
    EntryRepository, FileEntryRepository, InMemoryEntryRepository, RepositoryError, Snapshot,
    Subscription, SubscriptionEvent,
};
pub use runtime::{Runtime, RuntimeBuilder};
pub use submission::EntrySubmitter;
pub use sync::{BoardStatus, Leaderboard, LeaderboardSync};
