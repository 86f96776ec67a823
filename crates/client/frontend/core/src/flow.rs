//! Submission flow shared by every frontend.
//!
//! Drives one form through a submit attempt and turns the outcome into a
//! user notice. On success the form is cleared and closed; on any failure
//! it is left exactly as typed so the user can correct it and retry.
use async_trait::async_trait;

use leaderboard_core::{Entry, EntryDraft, Field, InputMode};
use leaderboard_runtime::{EntrySubmitter, LeaderboardHandle, SubmitError};

use crate::form::EntryForm;
use crate::message::{MessageEntry, MessageLog};

pub const SUCCESS_NOTICE: &str = "Lap time added successfully!";
pub const MISSING_FIELDS_NOTICE: &str = "All fields are required!";
pub const FAILURE_NOTICE: &str = "Failed to add lap time. Please try again.";

/// Anything that can store a draft.
#[async_trait]
pub trait EntrySink: Send + Sync {
    async fn submit_entry(&self, draft: &EntryDraft) -> Result<Entry, SubmitError>;
}

#[async_trait]
impl EntrySink for LeaderboardHandle {
    async fn submit_entry(&self, draft: &EntryDraft) -> Result<Entry, SubmitError> {
        self.submit(draft).await
    }
}

#[async_trait]
impl EntrySink for EntrySubmitter {
    async fn submit_entry(&self, draft: &EntryDraft) -> Result<Entry, SubmitError> {
        self.submit(draft).await
    }
}

/// Result of one submit attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Stored(Entry),
    MissingFields(Vec<Field>),
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, SubmitOutcome::Stored(_))
    }
}

#[derive(Clone, Debug)]
pub struct SubmissionFlow {
    form: EntryForm,
}

impl SubmissionFlow {
    pub fn new(mode: InputMode) -> Self {
        Self {
            form: EntryForm::new(mode),
        }
    }

    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EntryForm {
        &mut self.form
    }

    /// Open the form, optionally preselecting a category.
    pub fn open(&mut self, category: Option<&str>) {
        if let Some(category) = category {
            self.form.category = category.to_string();
        }
        self.form.open();
    }

    /// Hide the form without clearing it.
    pub fn cancel(&mut self) {
        self.form.close();
    }

    /// Submit the form and post the matching notice to `messages`.
    pub async fn submit<S>(&mut self, sink: &S, messages: &mut MessageLog) -> SubmitOutcome
    where
        S: EntrySink + ?Sized,
    {
        let draft = self.form.to_draft();

        match sink.submit_entry(&draft).await {
            Ok(entry) => {
                self.form.reset();
                self.form.close();
                messages.push(MessageEntry::info(SUCCESS_NOTICE));
                SubmitOutcome::Stored(entry)
            }
            Err(SubmitError::Validation(err)) => {
                messages.push(MessageEntry::warning(MISSING_FIELDS_NOTICE));
                SubmitOutcome::MissingFields(err.fields().to_vec())
            }
            Err(err) => {
                tracing::warn!("Submission failed: {}", err);
                messages.push(MessageEntry::error(FAILURE_NOTICE));
                SubmitOutcome::Failed(err.to_string())
            }
        }
    }
}
