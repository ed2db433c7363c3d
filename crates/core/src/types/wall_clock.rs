//! Wall-clock time-of-day in the store's local time.

use core::fmt;

use chrono::Timelike;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Errors that can occur when parsing a [`WallClockTime`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    /// The input is not five characters shaped like `HH:MM`.
    #[error("time must be in HH:MM form (got {0:?})")]
    Malformed(String),
    /// The hour is above 23.
    #[error("hour must be between 00 and 23 (got {0})")]
    HourOutOfRange(u8),
    /// The minute is above 59.
    #[error("minute must be between 00 and 59 (got {0})")]
    MinuteOutOfRange(u8),
}

/// A time of day in 24-hour, zero-padded `HH:MM` form.
///
/// Ordering is the lexicographic ordering of the `HH:MM` text, which for
/// zero-padded values is the same as chronological ordering within a day.
///
/// ## Constraints
///
/// - Exactly two hour digits, a colon, two minute digits
/// - Hour `00`-`23`, minute `00`-`59`
///
/// ## Examples
///
/// ```
/// use ipizza_core::WallClockTime;
///
/// assert!(WallClockTime::parse("18:00").is_ok());
/// assert!(WallClockTime::parse("8:00").is_err());
/// assert!(WallClockTime::parse("24:00").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WallClockTime(String);

impl WallClockTime {
    /// Parses and validates a `HH:MM` string.
    ///
    /// # Errors
    ///
    /// Returns [`TimeParseError`] if the input is not a valid 24-hour time.
    pub fn parse(s: &str) -> Result<Self, TimeParseError> {
        let malformed = || TimeParseError::Malformed(s.to_owned());

        let (hours, minutes) = s.split_once(':').ok_or_else(malformed)?;
        if hours.len() != 2 || minutes.len() != 2 {
            return Err(malformed());
        }
        let hour: u8 = parse_digits(hours).ok_or_else(malformed)?;
        let minute: u8 = parse_digits(minutes).ok_or_else(malformed)?;

        if hour > 23 {
            return Err(TimeParseError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(TimeParseError::MinuteOutOfRange(minute));
        }

        Ok(Self(s.to_owned()))
    }

    /// Formats the hour and minute of any clock reading.
    #[must_use]
    pub fn of<T: Timelike>(time: &T) -> Self {
        Self(format!("{:02}:{:02}", time.hour(), time.minute()))
    }

    /// Returns the time as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse_digits(s: &str) -> Option<u8> {
    if s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

impl fmt::Display for WallClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for WallClockTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WallClockTime {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WallClockTime> for String {
    fn from(time: WallClockTime) -> Self {
        time.0
    }
}

/// A stored value that is kept only when it has the expected shape.
///
/// Anything else (wrong type, out of range) is swallowed as `Invalid`, so a
/// single bad field never fails the document it sits in.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Loose<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

impl<T> Loose<T> {
    pub(crate) fn valid(self) -> Option<T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }
}

/// Deserializes an optional time, treating malformed values as absent.
///
/// Stored catalogs are not validated on load; a bad value must close the
/// store rather than fail the whole profile. Numbers, objects and strings
/// that are not `HH:MM` all read as `None`.
///
/// # Errors
///
/// Only fails when the underlying input itself is unreadable.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<WallClockTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Loose<String>>::deserialize(deserializer)?;
    Ok(raw
        .and_then(Loose::valid)
        .and_then(|s| WallClockTime::parse(&s).ok()))
}
