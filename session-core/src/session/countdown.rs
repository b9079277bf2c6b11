use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole seconds remaining until an instant, rendered the way the status
/// bar shows it: `H:MM:SS` once an hour or more remains, `M:SS` below that.
///
/// Serialised as the bare number of seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct Countdown {
    total_seconds: i64,
}

impl Countdown {
    /// Floors to whole seconds; a negative delta counts as elapsed.
    pub fn from_delta(delta: TimeDelta) -> Self {
        Self::from(delta.num_seconds())
    }

    pub fn total_seconds(&self) -> i64 {
        self.total_seconds
    }

    pub fn hours(&self) -> i64 {
        self.total_seconds / 3600
    }

    pub fn minutes(&self) -> i64 {
        (self.total_seconds % 3600) / 60
    }

    pub fn seconds(&self) -> i64 {
        self.total_seconds % 60
    }

    pub fn is_elapsed(&self) -> bool {
        self.total_seconds == 0
    }
}

/// Negative counts clamp to zero.
impl From<i64> for Countdown {
    fn from(total_seconds: i64) -> Self {
        Self {
            total_seconds: total_seconds.max(0),
        }
    }
}

impl From<Countdown> for i64 {
    fn from(countdown: Countdown) -> Self {
        countdown.total_seconds
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours() > 0 {
            write!(f, "{}:{:02}:{:02}", self.hours(), self.minutes(), self.seconds())
        } else {
            write!(f, "{}:{:02}", self.minutes(), self.seconds())
        }
    }
}
