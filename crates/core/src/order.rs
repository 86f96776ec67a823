//! Ranking order for a collection of entries.
//!
//! The default comparison is ordinal string order on the lap-time text, which
//! is what the hosted document store does for an `orderBy("lapTime")` query.
//! That order stops matching elapsed time once minutes reach two digits
//! (`"10:00.000"` sorts before `"2:00.000"`). [`LapTimeComparison::Numeric`]
//! is the opt-in alternative that compares elapsed milliseconds instead.
use std::cmp::Ordering;

use crate::entry::Entry;

/// Field a query is ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "camelCase")]
pub enum OrderField {
    #[default]
    LapTime,
}

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
)]
#[strum(ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    #[strum(to_string = "asc", serialize = "ascending")]
    Ascending,
    #[strum(to_string = "desc", serialize = "descending")]
    Descending,
}

/// How two lap times are compared.
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
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LapTimeComparison {
    /// Ordinal string comparison of the lap-time text.
    #[default]
    Lexicographic,
    /// Elapsed milliseconds; text without an `M:SS.fff` shape sorts last.
    Numeric,
}

/// Ordering applied to every snapshot of a live query.
///
/// Equal keys fall back to the entry id, the same implicit tie-break the
/// hosted store applies. Descending order reverses both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OrderBy {
    pub field: OrderField,
    pub direction: SortDirection,
    pub comparison: LapTimeComparison,
}

impl OrderBy {
    /// `orderBy("lapTime", "asc")` with string comparison.
    pub const fn lap_time_ascending() -> Self {
        Self {
            field: OrderField::LapTime,
            direction: SortDirection::Ascending,
            comparison: LapTimeComparison::Lexicographic,
        }
    }

    pub const fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    pub const fn with_comparison(mut self, comparison: LapTimeComparison) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        let ordering = match self.field {
            OrderField::LapTime => self.compare_lap_times(a, b),
        }
        .then_with(|| a.id.cmp(&b.id));

        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Sorts `entries` in place.
    pub fn sort(&self, entries: &mut [Entry]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }

    fn compare_lap_times(&self, a: &Entry, b: &Entry) -> Ordering {
        let (a, b) = (&a.lap_time, &b.lap_time);
        match self.comparison {
            LapTimeComparison::Lexicographic => a.as_str().cmp(b.as_str()),
            LapTimeComparison::Numeric => match (a.to_millis(), b.to_millis()) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
            .then_with(|| a.as_str().cmp(b.as_str())),
        }
    }
}
