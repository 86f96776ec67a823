//! Stored lap-time entries.
use std::fmt;

use crate::lap_time::LapTime;

/// Identifier assigned by storage when an entry is created.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Document fields written to a collection.
///
/// Serialized as `{"name", "company", "lapTime", "date"}`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EntryRecord {
    pub name: String,
    pub company: String,
    pub lap_time: LapTime,
    /// Free-form date text, only checked for presence.
    pub date: String,
}

/// An entry as read back from a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    pub company: String,
    pub lap_time: LapTime,
    pub date: String,
}

impl Entry {
    pub fn new(id: EntryId, record: EntryRecord) -> Self {
        let EntryRecord {
            name,
            company,
            lap_time,
            date,
        } = record;

        Self {
            id,
            name,
            company,
            lap_time,
            date,
        }
    }

    /// Document fields without the identifier.
    pub fn record(&self) -> EntryRecord {
        EntryRecord {
            name: self.name.clone(),
            company: self.company.clone(),
            lap_time: self.lap_time.clone(),
            date: self.date.clone(),
        }
    }
}
