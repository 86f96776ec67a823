//! Cross-frontend primitives for presenting the leaderboard.
//!
//! Houses the entry form, the submission flow, message logging, and
//! view-model types that the terminal client and future graphical clients
//! can reuse.
pub mod config;
pub mod event;
pub mod flow;
pub mod form;
pub mod frontend;
pub mod message;
pub mod view_model;

pub use config::{FrontendConfig, MessageConfig};
pub use event::{EventConsumer, EventImpact};
pub use flow::{EntrySink, SubmissionFlow, SubmitOutcome};
pub use form::{EntryForm, FormField};
pub use frontend::Frontend;
pub use message::{MessageEntry, MessageLevel, MessageLog};
pub use view_model::{BoardRow, BoardView};
