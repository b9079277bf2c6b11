//! Status board: one snapshot per poll for a status bar

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use super::countdown::Countdown;
use super::phase::{MarketPhase, SessionHours};
use super::tracker::DecisionTracker;
use crate::schedule::Schedule;

/// Everything a status bar shows for one instant
#[derive(Clone, Debug, Serialize)]
#[serde(bound(serialize = ""))]
pub struct StatusSnapshot<Tz: TimeZone> {
    pub at: DateTime<Tz>,
    pub phase: MarketPhase,
    pub next_decision: DateTime<Tz>,
    pub countdown: Countdown,
    /// Index of the decision slot `at` falls in, if any
    pub slot_index: Option<usize>,
    pub rolled_over: bool,
}

/// Combines the decision tracker with the exchange session layout.
pub struct StatusBoard<Tz: TimeZone> {
    tracker: DecisionTracker<Tz>,
    hours: SessionHours,
}

impl<Tz: TimeZone> StatusBoard<Tz> {
    pub fn new(schedule: Schedule, hours: SessionHours, now: &DateTime<Tz>) -> Self {
        Self {
            tracker: DecisionTracker::new(schedule, now),
            hours,
        }
    }

    pub fn tracker(&self) -> &DecisionTracker<Tz> {
        &self.tracker
    }

    pub fn session_hours(&self) -> &SessionHours {
        &self.hours
    }

    pub fn tick(&mut self, now: &DateTime<Tz>) -> StatusSnapshot<Tz> {
        let decision = self.tracker.poll(now);
        let local = now.naive_local();

        StatusSnapshot {
            at: now.clone(),
            phase: self.hours.phase_at(local),
            next_decision: decision.next_decision,
            countdown: decision.countdown,
            slot_index: self.tracker.schedule().current_slot_index(&local),
            rolled_over: decision.rolled_over,
        }
    }
}
