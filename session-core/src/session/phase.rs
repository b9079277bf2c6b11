//! Market phase classification

use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exchange phase at a given wall-clock instant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketPhase {
    Closed,
    CallAuction,
    Continuous,
}

impl MarketPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketPhase::Closed => "closed",
            MarketPhase::CallAuction => "call_auction",
            MarketPhase::Continuous => "continuous",
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, MarketPhase::Closed)
    }
}

impl fmt::Display for MarketPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open `[start, end)` interval of wall-clock time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, t: NaiveTime) -> bool {
        t >= self.start && t < self.end
    }
}

/// Daily session layout of the exchange
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHours {
    /// Opening call auction
    pub auction: TimeWindow,
    /// Continuous trading windows
    pub continuous: Vec<TimeWindow>,
    /// Whether Saturday and Sunday are closed
    pub weekend_closed: bool,
}

impl Default for SessionHours {
    /// Shanghai STAR market: auction 09:15-09:25, trading 09:30-11:30 and
    /// 13:00-15:00, weekends closed.
    fn default() -> Self {
        Self {
            auction: TimeWindow::new(clock(9, 15), clock(9, 25)),
            continuous: vec![
                TimeWindow::new(clock(9, 30), clock(11, 30)),
                TimeWindow::new(clock(13, 0), clock(15, 0)),
            ],
            weekend_closed: true,
        }
    }
}

impl SessionHours {
    pub fn phase_at(&self, at: NaiveDateTime) -> MarketPhase {
        if self.weekend_closed && matches!(at.weekday(), Weekday::Sat | Weekday::Sun) {
            return MarketPhase::Closed;
        }

        let t = at.time();
        if self.continuous.iter().any(|window| window.contains(t)) {
            MarketPhase::Continuous
        } else if self.auction.contains(t) {
            MarketPhase::CallAuction
        } else {
            MarketPhase::Closed
        }
    }
}

fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("session boundary is a valid clock time")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // 2024-03-15 is a Friday
    fn friday(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_weekday_boundaries() {
        let hours = SessionHours::default();

        assert_eq!(hours.phase_at(friday(9, 14, 59)), MarketPhase::Closed);
        assert_eq!(hours.phase_at(friday(9, 15, 0)), MarketPhase::CallAuction);
        assert_eq!(hours.phase_at(friday(9, 24, 59)), MarketPhase::CallAuction);
        assert_eq!(hours.phase_at(friday(9, 25, 0)), MarketPhase::Closed);
        assert_eq!(hours.phase_at(friday(9, 30, 0)), MarketPhase::Continuous);
        assert_eq!(hours.phase_at(friday(11, 29, 59)), MarketPhase::Continuous);
        assert_eq!(hours.phase_at(friday(11, 30, 0)), MarketPhase::Closed);
        assert_eq!(hours.phase_at(friday(12, 0, 0)), MarketPhase::Closed);
        assert_eq!(hours.phase_at(friday(13, 0, 0)), MarketPhase::Continuous);
        assert_eq!(hours.phase_at(friday(14, 59, 59)), MarketPhase::Continuous);
        assert_eq!(hours.phase_at(friday(15, 0, 0)), MarketPhase::Closed);
    }

    #[test]
    fn test_weekend_closed() {
        let hours = SessionHours::default();
        let saturday = NaiveDate::from_ymd_opt(2024, 3, 16)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let sunday = saturday + chrono::Duration::days(1);

        assert_eq!(hours.phase_at(saturday), MarketPhase::Closed);
        assert_eq!(hours.phase_at(sunday), MarketPhase::Closed);

        let always_on = SessionHours {
            weekend_closed: false,
            ..SessionHours::default()
        };
        assert_eq!(always_on.phase_at(saturday), MarketPhase::Continuous);
    }

    #[test]
    fn test_phase_labels() {
        assert_eq!(MarketPhase::CallAuction.to_string(), "call_auction");
        assert!(MarketPhase::Continuous.is_open());
        assert!(!MarketPhase::Closed.is_open());
    }
}
