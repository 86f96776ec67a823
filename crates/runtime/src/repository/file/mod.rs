//! File-based repository implementations.

mod entries;

pub use entries::FileEntryRepository;
