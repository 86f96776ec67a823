//! Domain types shared by the leaderboard runtime and its front-ends.
//!
//! `leaderboard-core` defines what a lap-time entry is, how a submission is
//! validated before anything is written, and how a collection of entries is
//! ranked. It performs no I/O; storage and live queries live in
//! `leaderboard-runtime`.
pub mod category;
pub mod draft;
pub mod entry;
pub mod error;
pub mod lap_time;
pub mod order;

pub use category::Category;
pub use draft::{EntryDraft, InputMode, LapTimeInput};
pub use entry::{Entry, EntryId, EntryRecord};
pub use error::{Field, ValidationError};
pub use lap_time::LapTime;
pub use order::{LapTimeComparison, OrderBy, OrderField, SortDirection};
