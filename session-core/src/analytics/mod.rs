//! Derived statistics over the stock pool and model roster

pub mod arena;
pub mod decisions;
pub mod positions;
pub mod sector;
pub mod types;

pub use arena::{arena_summary, leaderboard, ArenaSummary, RankBy};
pub use decisions::{
    ActionTally, Decision, DecisionAction, DecisionFeed, TimeAgo, DECISION_FEED_CAPACITY,
};
pub use positions::{positions_summary, Position, PositionsSummary};
pub use sector::{
    market_breadth, search_stocks, sector_rotation, stocks_in_sector, summarize_sector,
    MarketBreadth, SectorSummary,
};
pub use types::{AiModel, ModelConfig, ModelStatus, RiskLevel, Sector, StockQuote};
