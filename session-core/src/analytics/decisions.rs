//! Decision feed: the most recent model decisions, newest first

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Entries kept by the dashboard feed
pub const DECISION_FEED_CAPACITY: usize = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionAction {
    Buy,
    Sell,
    Hold,
}

impl DecisionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionAction::Buy => "buy",
            DecisionAction::Sell => "sell",
            DecisionAction::Hold => "hold",
        }
    }
}

impl fmt::Display for DecisionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trading decision taken by one model on one stock
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub timestamp: DateTime<Utc>,
    pub ai_model_id: String,
    pub stock_code: String,
    pub action: DecisionAction,
    /// 0-100
    pub confidence: f64,
    pub reasoning: String,
    pub price: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTally {
    pub buy: usize,
    pub sell: usize,
    pub hold: usize,
}

impl ActionTally {
    pub fn total(&self) -> usize {
        self.buy + self.sell + self.hold
    }
}

/// Bounded feed of decisions. The front is the newest entry; pushing past
/// capacity drops from the back.
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionFeed {
    entries: VecDeque<Decision>,
    capacity: usize,
}

impl Default for DecisionFeed {
    fn default() -> Self {
        Self::with_capacity(DECISION_FEED_CAPACITY)
    }
}

impl DecisionFeed {
    /// A zero capacity is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Seed a feed from a batch, ordered newest first and trimmed to capacity.
    pub fn from_decisions(decisions: impl IntoIterator<Item = Decision>, capacity: usize) -> Self {
        let mut sorted: Vec<Decision> = decisions.into_iter().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let mut feed = Self::with_capacity(capacity);
        feed.entries.extend(sorted.into_iter().take(feed.capacity));
        feed
    }

    pub fn push(&mut self, decision: Decision) {
        self.entries.push_front(decision);
        self.entries.truncate(self.capacity);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&Decision> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decision> {
        self.entries.iter()
    }

    pub fn tally(&self) -> ActionTally {
        self.entries
            .iter()
            .fold(ActionTally::default(), |mut acc, d| {
                match d.action {
                    DecisionAction::Buy => acc.buy += 1,
                    DecisionAction::Sell => acc.sell += 1,
                    DecisionAction::Hold => acc.hold += 1,
                }
                acc
            })
    }
}

/// Coarse age of a feed entry: whole minutes under an hour, whole hours after.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeAgo {
    Minutes(i64),
    Hours(i64),
}

impl TimeAgo {
    /// Timestamps in the future read as zero minutes.
    pub fn between(at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let minutes = (now - at).num_minutes().max(0);
        if minutes < 60 {
            TimeAgo::Minutes(minutes)
        } else {
            TimeAgo::Hours(minutes / 60)
        }
    }
}

impl fmt::Display for TimeAgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeAgo::Minutes(m) => write!(f, "{}m ago", m),
            TimeAgo::Hours(h) => write!(f, "{}h ago", h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
    }

    fn decision(hours_ago: i64, action: DecisionAction) -> Decision {
        Decision {
            timestamp: base() - Duration::hours(hours_ago),
            ai_model_id: "ai-001".to_string(),
            stock_code: "SH688396".to_string(),
            action,
            confidence: 75.0,
            reasoning: "MACD golden cross".to_string(),
            price: 52.3,
        }
    }

    #[test]
    fn test_push_keeps_newest_first_and_caps() {
        let mut feed = DecisionFeed::with_capacity(3);
        for i in 0..5 {
            let mut d = decision(0, DecisionAction::Hold);
            d.stock_code = format!("SH68800{}", i);
            feed.push(d);
        }

        assert_eq!(feed.len(), 3);
        let codes: Vec<&str> = feed.iter().map(|d| d.stock_code.as_str()).collect();
        assert_eq!(codes, vec!["SH688004", "SH688003", "SH688002"]);
        assert_eq!(feed.latest().unwrap().stock_code, "SH688004");
    }

    #[test]
    fn test_from_decisions_sorts_and_trims() {
        let batch = (0..20).rev().map(|h| decision(h, DecisionAction::Buy));
        let feed = DecisionFeed::from_decisions(batch, DECISION_FEED_CAPACITY);

        assert_eq!(feed.len(), DECISION_FEED_CAPACITY);
        assert_eq!(feed.latest().unwrap().timestamp, base());
        let oldest = feed.iter().last().unwrap();
        assert_eq!(oldest.timestamp, base() - Duration::hours(14));
    }

    #[test]
    fn test_tally() {
        let feed = DecisionFeed::from_decisions(
            vec![
                decision(0, DecisionAction::Buy),
                decision(1, DecisionAction::Sell),
                decision(2, DecisionAction::Buy),
                decision(3, DecisionAction::Hold),
            ],
            DECISION_FEED_CAPACITY,
        );
        let tally = feed.tally();
        assert_eq!(tally, ActionTally { buy: 2, sell: 1, hold: 1 });
        assert_eq!(tally.total(), 4);

        assert_eq!(DecisionFeed::default().tally(), ActionTally::default());
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut feed = DecisionFeed::with_capacity(0);
        feed.push(decision(1, DecisionAction::Sell));
        feed.push(decision(0, DecisionAction::Buy));
        assert_eq!(feed.capacity(), 1);
        assert_eq!(feed.latest().unwrap().action, DecisionAction::Buy);
    }

    #[test]
    fn test_time_ago() {
        let now = base();
        assert_eq!(TimeAgo::between(now, now).to_string(), "0m ago");
        assert_eq!(
            TimeAgo::between(now - Duration::seconds(59 * 60 + 59), now),
            TimeAgo::Minutes(59)
        );
        assert_eq!(TimeAgo::between(now - Duration::minutes(60), now).to_string(), "1h ago");
        assert_eq!(TimeAgo::between(now - Duration::minutes(179), now), TimeAgo::Hours(2));
        assert_eq!(TimeAgo::between(now + Duration::minutes(5), now), TimeAgo::Minutes(0));
    }

    #[test]
    fn test_decision_json() {
        let json = r#"{
            "timestamp": "2024-03-15T10:00:00Z",
            "aiModelId": "ai-002",
            "stockCode": "SH688981",
            "action": "sell",
            "confidence": 81.5,
            "reasoning": "RSI overbought",
            "price": 42.18
        }"#;
        let d: Decision = serde_json::from_str(json).unwrap();
        assert_eq!(d.action, DecisionAction::Sell);
        assert_eq!(d.timestamp, base());
    }
}
