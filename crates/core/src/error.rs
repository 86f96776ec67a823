//! Validation errors raised before an entry is written.

/// Form fields that take part in validation.
///
/// Parsing is case-insensitive and accepts the snake_case names, so
/// front-ends can map user input (`set lap_time 1:02.3`) straight onto a field.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Field {
    Name,
    Company,
    /// Single free-text lap time.
    LapTime,
    Minutes,
    Seconds,
    Milliseconds,
    Date,
}

/// A submission was rejected before reaching storage.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more required fields were empty.
    ///
    /// Fields are listed in form order.
    #[error("required fields missing: {}", join_fields(.fields))]
    MissingFields { fields: Vec<Field> },
}

impl ValidationError {
    pub fn missing(field: Field) -> Self {
        Self::MissingFields {
            fields: vec![field],
        }
    }

    /// Fields that caused the rejection.
    pub fn fields(&self) -> &[Field] {
        match self {
            Self::MissingFields { fields } => fields,
        }
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}
