//! Caller-side cache of the next decision instant
//!
//! The scheduler is stateless; a polling caller keeps the last answer here and
//! only asks again once that instant has been reached.

use chrono::{DateTime, TimeZone};
use tracing::debug;

use super::countdown::Countdown;
use crate::schedule::Schedule;

/// Result of one tracker poll
#[derive(Clone, Debug)]
pub struct DecisionTick<Tz: TimeZone> {
    pub next_decision: DateTime<Tz>,
    pub countdown: Countdown,
    /// The cached instant had been reached and was recomputed on this poll
    pub rolled_over: bool,
}

pub struct DecisionTracker<Tz: TimeZone> {
    schedule: Schedule,
    next_decision: DateTime<Tz>,
    recomputations: u64,
}

impl<Tz: TimeZone> DecisionTracker<Tz> {
    pub fn new(schedule: Schedule, now: &DateTime<Tz>) -> Self {
        let next_decision = schedule.next_slot_after_in(now);
        Self {
            schedule,
            next_decision,
            recomputations: 0,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Cached next decision instant, as of the last poll.
    pub fn next_decision(&self) -> &DateTime<Tz> {
        &self.next_decision
    }

    /// Number of times the cached instant went stale and was replaced.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn poll(&mut self, now: &DateTime<Tz>) -> DecisionTick<Tz> {
        let rolled_over = *now >= self.next_decision;
        if rolled_over {
            let next = self.schedule.next_slot_after_in(now);
            debug!(
                reached = %self.next_decision.naive_local(),
                next = %next.naive_local(),
                "Decision slot reached, advancing"
            );
            self.next_decision = next;
            self.recomputations += 1;
        }

        let countdown = Countdown::from_delta(self.next_decision.clone() - now.clone());

        DecisionTick {
            next_decision: self.next_decision.clone(),
            countdown,
            rolled_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn utc(d: u32, h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(2024, 3, d)
                .unwrap()
                .and_hms_opt(h, m, s)
                .unwrap(),
        )
    }

    #[test]
    fn test_initial_next_decision() {
        let tracker = DecisionTracker::new(Schedule::default(), &utc(15, 8, 0, 0));
        assert_eq!(*tracker.next_decision(), utc(15, 9, 0, 0));
        assert_eq!(tracker.recomputations(), 0);
    }

    #[test]
    fn test_cache_held_until_stale() {
        let mut tracker = DecisionTracker::new(Schedule::default(), &utc(15, 8, 0, 0));

        let tick = tracker.poll(&utc(15, 8, 59, 30));
        assert!(!tick.rolled_over);
        assert_eq!(tick.next_decision, utc(15, 9, 0, 0));
        assert_eq!(tick.countdown.to_string(), "0:30");

        let tick = tracker.poll(&utc(15, 9, 0, 0));
        assert!(tick.rolled_over);
        assert_eq!(tick.next_decision, utc(15, 11, 0, 0));
        assert_eq!(tick.countdown.to_string(), "2:00:00");
        assert_eq!(tracker.recomputations(), 1);

        let tick = tracker.poll(&utc(15, 9, 0, 1));
        assert!(!tick.rolled_over);
        assert_eq!(tracker.recomputations(), 1);
    }

    #[test]
    fn test_missed_polls_catch_up_in_one_step() {
        let mut tracker = DecisionTracker::new(Schedule::default(), &utc(15, 8, 0, 0));

        // Caller slept through every slot of the day
        let tick = tracker.poll(&utc(15, 20, 0, 0));
        assert!(tick.rolled_over);
        assert_eq!(tick.next_decision, utc(16, 9, 0, 0));
        assert_eq!(tick.countdown.to_string(), "13:00:00");
        assert_eq!(tracker.recomputations(), 1);
    }
}
