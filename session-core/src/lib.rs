//! AI Arena Session Core
//!
//! Decision-slot scheduling for the AI trading arena, plus the status and
//! statistics a dashboard derives around it: market phase, countdown to the
//! next decision, sector rotation, model leaderboards, open positions and
//! the recent decision feed.

pub mod analytics;
pub mod fixtures;
pub mod schedule;
pub mod session;

// Re-export main types for easy access
pub use analytics::{
    ActionTally, AiModel, ArenaSummary, Decision, DecisionAction, DecisionFeed, MarketBreadth,
    Position, PositionsSummary, RankBy, Sector, SectorSummary, StockQuote, TimeAgo,
};
pub use fixtures::{FixtureError, FixtureResult, FixtureSet};
pub use schedule::{Schedule, ScheduleError, ScheduleResult, TradingSlot};
pub use session::{
    Countdown, DecisionTracker, MarketPhase, SessionHours, StatusBoard, StatusSnapshot,
};

use serde::Serialize;

/// Everything the dashboard reports about the stock pool and model roster
#[derive(Clone, Debug, Serialize)]
pub struct ArenaOverview {
    pub arena: ArenaSummary,
    pub breadth: MarketBreadth,
    pub sectors: Vec<SectorSummary>,
    /// Model ids by total return, best first
    pub standings: Vec<String>,
    pub positions: PositionsSummary,
    /// Action counts over the capped decision feed
    pub decisions: ActionTally,
}

impl ArenaOverview {
    /// `None` only for an empty roster, which validated fixtures never have.
    pub fn from_fixtures(fixtures: &FixtureSet) -> Option<Self> {
        let arena = analytics::arena_summary(&fixtures.models)?;

        Some(Self {
            arena,
            breadth: analytics::market_breadth(&fixtures.stocks),
            sectors: analytics::sector_rotation(&fixtures.stocks),
            standings: analytics::leaderboard(&fixtures.models, RankBy::TotalReturn)
                .into_iter()
                .map(|m| m.id.clone())
                .collect(),
            positions: analytics::positions_summary(&fixtures.positions),
            decisions: fixtures.decision_feed().tally(),
        })
    }
}
