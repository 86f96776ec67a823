//! In-memory repository implementations for testing and development.

mod entries;

pub use entries::InMemoryEntryRepository;
