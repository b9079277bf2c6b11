//! Session status: market phase, decision countdown and the polling-side cache

pub mod board;
pub mod countdown;
pub mod phase;
pub mod tracker;

pub use board::{StatusBoard, StatusSnapshot};
pub use countdown::Countdown;
pub use phase::{MarketPhase, SessionHours, TimeWindow};
pub use tracker::{DecisionTick, DecisionTracker};
