//! Lap-time values as entered by a user.
use std::fmt;

use crate::error::{Field, ValidationError};

/// Canonical lap-time text such as `1:23.456`.
///
/// The text is kept exactly as entered: no padding, trimming or range checks.
/// Ranking compares it as a string unless the numeric override is selected,
/// which goes through [`LapTime::to_millis`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LapTime(String);

impl LapTime {
    /// Builds `"{minutes}:{seconds}.{milliseconds}"` from three sub-fields.
    ///
    /// Every empty part is reported, in the order the parts are given.
    pub fn from_parts(
        minutes: &str,
        seconds: &str,
        milliseconds: &str,
    ) -> Result<Self, ValidationError> {
        let fields: Vec<Field> = [
            (Field::Minutes, minutes),
            (Field::Seconds, seconds),
            (Field::Milliseconds, milliseconds),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if !fields.is_empty() {
            return Err(ValidationError::MissingFields { fields });
        }

        Ok(Self(format!("{minutes}:{seconds}.{milliseconds}")))
    }

    /// Accepts any non-empty text verbatim.
    pub fn from_text(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.is_empty() {
            return Err(ValidationError::missing(Field::LapTime));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Elapsed time in milliseconds for text shaped like `M:SS.fff`.
    ///
    /// The fraction is read as a decimal fraction of a second, so `1:02.5` is
    /// 62 500 ms and digits past the third are truncated. The fraction may be
    /// omitted (`1:02`). Returns `None` for anything else.
    pub fn to_millis(&self) -> Option<u64> {
        let (minutes, rest) = self.0.split_once(':')?;
        let (seconds, fraction) = match rest.split_once('.') {
            Some((seconds, fraction)) => (seconds, Some(fraction)),
            None => (rest, None),
        };

        let minutes = parse_digits(minutes)?;
        let seconds = parse_digits(seconds)?;
        let millis = match fraction {
            Some(fraction) => fraction_to_millis(fraction)?,
            None => 0,
        };

        minutes
            .checked_mul(60_000)?
            .checked_add(seconds.checked_mul(1_000)?)?
            .checked_add(millis)
    }
}

impl fmt::Display for LapTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LapTime {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn parse_digits(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn fraction_to_millis(fraction: &str) -> Option<u64> {
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut millis = 0u64;
    let mut digits = 0u32;
    for b in fraction.bytes().take(3) {
        millis = millis * 10 + u64::from(b - b'0');
        digits += 1;
    }

    Some(millis * 10u64.pow(3 - digits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_are_joined_without_padding() {
        let lap = LapTime::from_parts("1", "23", "456").unwrap();
        assert_eq!(lap.as_str(), "1:23.456");

        let lap = LapTime::from_parts("0", "5", "7").unwrap();
        assert_eq!(lap.as_str(), "0:5.7");
    }

    #[test]
    fn parts_keep_whitespace_and_non_digits() {
        let lap = LapTime::from_parts(" 1", "xx", "0").unwrap();
        assert_eq!(lap.as_str(), " 1:xx.0");
    }

    #[test]
    fn empty_parts_are_all_reported() {
        let err = LapTime::from_parts("", "23", "").unwrap_err();
        assert_eq!(err.fields(), &[Field::Minutes, Field::Milliseconds]);
    }

    #[test]
    fn free_text_is_kept_verbatim() {
        let lap = LapTime::from_text("about a minute").unwrap();
        assert_eq!(lap.to_string(), "about a minute");

        let err = LapTime::from_text("").unwrap_err();
        assert_eq!(err.fields(), &[Field::LapTime]);
    }

    #[test]
    fn millis_reads_fraction_as_decimal() {
        let millis = |text: &str| LapTime::from_text(text).unwrap().to_millis();

        assert_eq!(millis("1:23.456"), Some(83_456));
        assert_eq!(millis("1:02.5"), Some(62_500));
        assert_eq!(millis("1:02.05"), Some(62_050));
        assert_eq!(millis("0:59.9999"), Some(59_999));
        assert_eq!(millis("10:00"), Some(600_000));
    }

    #[test]
    fn millis_rejects_other_shapes() {
        let millis = |text: &str| LapTime::from_text(text).unwrap().to_millis();

        assert_eq!(millis("83.456"), None);
        assert_eq!(millis("1:2x.000"), None);
        assert_eq!(millis("1:23."), None);
        assert_eq!(millis(":23.456"), None);
        assert_eq!(millis("-1:23.456"), None);
    }
}
