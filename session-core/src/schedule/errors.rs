//! Schedule construction errors

use thiserror::Error;

use super::slot::TradingSlot;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Schedule must contain at least one slot")]
    Empty,

    #[error("Invalid slot time {hour}:{minute:02}")]
    InvalidSlot { hour: u32, minute: u32 },

    #[error("Cannot parse slot '{0}', expected HH:MM")]
    Parse(String),

    #[error("Slot {current} at position {index} is not after {previous}")]
    OutOfOrder {
        index: usize,
        previous: TradingSlot,
        current: TradingSlot,
    },
}

/// Result type for schedule operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;
