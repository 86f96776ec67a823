//! Entry submission.
//!
//! A draft is validated before storage is touched: an incomplete draft never
//! reaches the repository. A valid draft becomes exactly one `create` call.
//! Accepted entries reach the boards through the live queries, not through
//! this path.

use std::sync::Arc;

use tracing::{info, warn};

use leaderboard_core::{Entry, EntryDraft};

use crate::api::SubmitError;
use crate::events::{EventBus, SubmissionEvent};
use crate::repository::EntryRepository;

/// Writes validated drafts into their category's collection.
#[derive(Clone)]
pub struct EntrySubmitter {
    repository: Arc<dyn EntryRepository>,
    event_bus: EventBus,
}

impl EntrySubmitter {
    pub fn new(repository: Arc<dyn EntryRepository>, event_bus: EventBus) -> Self {
        Self {
            repository,
            event_bus,
        }
    }

    pub async fn submit(&self, draft: &EntryDraft) -> Result<Entry, SubmitError> {
        let record = match draft.validate() {
            Ok(record) => record,
            Err(err) => {
                info!("Rejected draft: {}", err);
                self.event_bus.publish(SubmissionEvent::Rejected {
                    fields: err.fields().to_vec(),
                });
                return Err(err.into());
            }
        };

        let category = draft.category;
        match self.repository.create(category, record).await {
            Ok(entry) => {
                info!(
                    "Stored {} entry[{}] ({})",
                    category, entry.id, entry.lap_time
                );
                self.event_bus.publish(SubmissionEvent::Accepted {
                    category,
                    entry: entry.clone(),
                });
                Ok(entry)
            }
            Err(err) => {
                warn!("Failed to store {} entry: {}", category, err);
                self.event_bus.publish(SubmissionEvent::Failed {
                    category,
                    error: err.to_string(),
                });
                Err(err.into())
            }
        }
    }
}
