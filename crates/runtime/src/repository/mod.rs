//! Repository layer for lap-time entries.
//!
//! Two independent collections (`staff`, `clients`) with create and live
//! ordered queries. [`InMemoryEntryRepository`] backs tests and throwaway
//! sessions; [`FileEntryRepository`] keeps each collection in a JSON file.

mod error;
mod file;
mod memory;
mod store;
mod subscription;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileEntryRepository;
pub use memory::InMemoryEntryRepository;
pub use subscription::{Snapshot, Subscription, SubscriptionEvent};
pub use traits::EntryRepository;
