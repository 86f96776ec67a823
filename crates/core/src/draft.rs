//! Unvalidated submissions and their validation.
use crate::category::Category;
use crate::entry::EntryRecord;
use crate::error::{Field, ValidationError};
use crate::lap_time::LapTime;

/// How the lap time is typed in.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum InputMode {
    /// Three sub-fields: minutes, seconds, milliseconds.
    #[default]
    #[strum(to_string = "split", serialize = "structured")]
    Structured,
    /// One free-text field.
    #[strum(to_string = "text", serialize = "free_text")]
    FreeText,
}

/// Raw lap-time input in one of the two supported modes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LapTimeInput {
    Structured {
        minutes: String,
        seconds: String,
        milliseconds: String,
    },
    FreeText(String),
}

impl LapTimeInput {
    pub fn mode(&self) -> InputMode {
        match self {
            Self::Structured { .. } => InputMode::Structured,
            Self::FreeText(_) => InputMode::FreeText,
        }
    }

    pub fn to_lap_time(&self) -> Result<LapTime, ValidationError> {
        match self {
            Self::Structured {
                minutes,
                seconds,
                milliseconds,
            } => LapTime::from_parts(minutes, seconds, milliseconds),
            Self::FreeText(text) => LapTime::from_text(text.as_str()),
        }
    }
}

/// A submission as typed by the user, before any check has run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryDraft {
    pub name: String,
    pub company: String,
    pub lap_time: LapTimeInput,
    pub date: String,
    pub category: Category,
}

impl EntryDraft {
    /// Checks every required field and builds the document to store.
    ///
    /// Required: name, company, date, and the lap time of the active input
    /// mode. All empty fields are reported at once, in form order.
    pub fn validate(&self) -> Result<EntryRecord, ValidationError> {
        let mut missing = Vec::new();

        if self.name.is_empty() {
            missing.push(Field::Name);
        }
        if self.company.is_empty() {
            missing.push(Field::Company);
        }

        let lap_time = match self.lap_time.to_lap_time() {
            Ok(lap_time) => Some(lap_time),
            Err(err) => {
                missing.extend_from_slice(err.fields());
                None
            }
        };

        if self.date.is_empty() {
            missing.push(Field::Date);
        }

        match lap_time {
            Some(lap_time) if missing.is_empty() => Ok(EntryRecord {
                name: self.name.clone(),
                company: self.company.clone(),
                lap_time,
                date: self.date.clone(),
            }),
            _ => Err(ValidationError::MissingFields { fields: missing }),
        }
    }
}
