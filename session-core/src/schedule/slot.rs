//! Daily decision slots

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::{ScheduleError, ScheduleResult};

/// A fixed wall-clock (hour, minute) at which a trading decision is taken.
///
/// Ordering follows the time of day, so a sorted `Vec<TradingSlot>` is a
/// chronological schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TradingSlot {
    time: NaiveTime,
}

impl TradingSlot {
    /// Create a slot from a 24-hour clock reading.
    pub fn new(hour: u32, minute: u32) -> ScheduleResult<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(|time| Self { time })
            .ok_or(ScheduleError::InvalidSlot { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    /// Slot as a time of day with zero seconds.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// The slot on a given calendar day.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.time)
    }

    /// True when `t` reads the same hour and minute, whatever its seconds.
    pub fn matches<T: Timelike>(&self, t: &T) -> bool {
        t.hour() == self.hour() && t.minute() == self.minute()
    }
}

impl fmt::Display for TradingSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TradingSlot {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parse_err = || ScheduleError::Parse(trimmed.to_string());

        let (hour, minute) = trimmed.split_once(':').ok_or_else(parse_err)?;
        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(hour) || hour.len() > 2 || !all_digits(minute) || minute.len() != 2 {
            return Err(parse_err());
        }

        let hour: u32 = hour.parse().map_err(|_| parse_err())?;
        let minute: u32 = minute.parse().map_err(|_| parse_err())?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for TradingSlot {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TradingSlot> for String {
    fn from(slot: TradingSlot) -> Self {
        slot.to_string()
    }
}
