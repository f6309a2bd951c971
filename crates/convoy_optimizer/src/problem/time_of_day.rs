use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Minutes elapsed since midnight, the unit of every time value in the model.
pub type Minutes = i64;

pub const MINUTES_PER_DAY: Minutes = 24 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeOfDayError {
    #[error("'{0}' is not a HH:MM time of day")]
    Format(String),

    #[error("'{0}' is out of range, expected 00:00 to 24:00")]
    OutOfRange(String),
}

/// A clock time `HH:MM`, stored as minutes since midnight.
///
/// `24:00` is accepted as the end of the day so that windows can close at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay(Minutes);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    pub const fn from_minutes(minutes: Minutes) -> Self {
        TimeOfDay(minutes)
    }

    pub const fn minutes(&self) -> Minutes {
        self.0
    }

    pub fn parse(input: &str) -> Result<Self, TimeOfDayError> {
        let trimmed = input.trim();
        let (hours, minutes) = trimmed
            .split_once(':')
            .ok_or_else(|| TimeOfDayError::Format(input.to_owned()))?;

        let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(hours) || hours.len() > 2 || !is_digits(minutes) || minutes.len() != 2 {
            return Err(TimeOfDayError::Format(input.to_owned()));
        }

        let hours: Minutes = hours
            .parse()
            .map_err(|_| TimeOfDayError::Format(input.to_owned()))?;
        let minutes: Minutes = minutes
            .parse()
            .map_err(|_| TimeOfDayError::Format(input.to_owned()))?;

        if minutes >= 60 || hours > 24 || (hours == 24 && minutes > 0) {
            return Err(TimeOfDayError::OutOfRange(input.to_owned()));
        }

        Ok(TimeOfDay(hours * 60 + minutes))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeOfDay::parse(s)
    }
}

impl From<TimeOfDay> for Minutes {
    fn from(value: TimeOfDay) -> Self {
        value.0
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        TimeOfDay::parse(&value).map_err(serde::de::Error::custom)
    }
}

impl JsonSchema for TimeOfDay {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "TimeOfDay".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "pattern": "^([01]?[0-9]|2[0-3]):[0-5][0-9]$|^24:00$"
        })
    }
}
