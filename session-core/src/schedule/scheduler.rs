//! Daily decision schedule and next-slot computation
//!
//! All queries are pure functions of their arguments. A `Schedule` carries no
//! clock and no cache; callers poll it with the current instant and decide for
//! themselves when a previously computed slot has gone stale.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::{ScheduleError, ScheduleResult};
use super::slot::TradingSlot;

/// Non-empty, strictly ascending list of daily decision slots.
///
/// The invariant is enforced at construction (including deserialisation), so
/// every query below is total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TradingSlot>", into = "Vec<TradingSlot>")]
pub struct Schedule {
    slots: Vec<TradingSlot>,
}

impl Schedule {
    /// Validate and build a schedule.
    pub fn new(slots: Vec<TradingSlot>) -> ScheduleResult<Self> {
        if slots.is_empty() {
            return Err(ScheduleError::Empty);
        }

        for (index, pair) in slots.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ScheduleError::OutOfOrder {
                    index: index + 1,
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }

        Ok(Self { slots })
    }

    pub fn slots(&self) -> &[TradingSlot] {
        &self.slots
    }

    /// Earliest slot of the day.
    pub fn first(&self) -> TradingSlot {
        // Non-empty by construction
        self.slots[0]
    }

    /// Next decision instant strictly after `now`.
    ///
    /// Scans today's slots for the first one later than `now`'s time of day
    /// (seconds and sub-seconds included, so a call made exactly at a slot
    /// moves on to the following slot). When today is exhausted the result is
    /// the first slot of the next calendar day. Weekends and holidays are not
    /// special.
    ///
    /// # Panics
    ///
    /// Panics only if `now` falls after the last slot of the final day
    /// representable by `NaiveDate`; use [`Schedule::checked_next_slot_after`]
    /// to handle that case.
    pub fn next_slot_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.checked_next_slot_after(now)
            .expect("next decision day is outside the supported calendar range")
    }

    /// Like [`Schedule::next_slot_after`], returning `None` when the next
    /// calendar day cannot be represented.
    pub fn checked_next_slot_after(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let today = now.date();
        let time_of_day = now.time();

        if let Some(slot) = self.slots.iter().find(|slot| slot.time() > time_of_day) {
            return Some(slot.on(today));
        }

        today.succ_opt().map(|tomorrow| self.first().on(tomorrow))
    }

    /// Zone-aware form of [`Schedule::next_slot_after`].
    ///
    /// Slots are wall-clock times in `now`'s zone. A slot that does not exist
    /// on a given day (DST gap) is skipped; an ambiguous one (DST overlap)
    /// resolves to the earliest reading still later than `now`.
    pub fn next_slot_after_in<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Tz> {
        let tz = now.timezone();
        let mut candidate = self.next_slot_after(now.naive_local());

        loop {
            let resolved = match tz.from_local_datetime(&candidate) {
                LocalResult::Single(dt) => Some(dt),
                LocalResult::Ambiguous(earliest, latest) => {
                    if earliest > *now {
                        Some(earliest)
                    } else {
                        Some(latest)
                    }
                }
                LocalResult::None => None,
            };

            if let Some(dt) = resolved {
                if dt > *now {
                    return dt;
                }
            }

            candidate = self.next_slot_after(candidate);
        }
    }

    /// True when `now` reads exactly the hour and minute of some slot.
    /// Date, seconds and weekday are ignored.
    pub fn is_exactly_at_slot<T: Timelike>(&self, now: &T) -> bool {
        self.current_slot_index(now).is_some()
    }

    /// Zero-based index of the slot whose hour and minute match `now`.
    pub fn current_slot_index<T: Timelike>(&self, now: &T) -> Option<usize> {
        self.slots.iter().position(|slot| slot.matches(now))
    }
}

impl Default for Schedule {
    /// 09:00, 11:00 and 14:30.
    fn default() -> Self {
        let slots = [(9, 0), (11, 0), (14, 30)]
            .into_iter()
            .map(|(hour, minute)| TradingSlot::new(hour, minute))
            .collect::<ScheduleResult<Vec<_>>>()
            .and_then(Self::new);

        slots.expect("built-in decision schedule is valid")
    }
}

impl TryFrom<Vec<TradingSlot>> for Schedule {
    type Error = ScheduleError;

    fn try_from(slots: Vec<TradingSlot>) -> Result<Self, Self::Error> {
        Self::new(slots)
    }
}

impl From<Schedule> for Vec<TradingSlot> {
    fn from(schedule: Schedule) -> Self {
        schedule.slots
    }
}

/// Parses a comma-separated slot list such as `09:00,11:00,14:30`.
impl FromStr for Schedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slots = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<ScheduleResult<Vec<TradingSlot>>>()?;
        Self::new(slots)
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", slot)?;
        }
        Ok(())
    }
}
