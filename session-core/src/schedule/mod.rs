//! Trading-session scheduler

pub mod errors;
pub mod scheduler;
pub mod slot;

pub use errors::{ScheduleError, ScheduleResult};
pub use scheduler::Schedule;
pub use slot::TradingSlot;
