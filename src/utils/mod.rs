//! Utility Module
//!
//! - [`time`]: clocks, elapsed-time helpers and the frame [`Timer`](time::Timer)

pub mod time;

pub use time::{AnimationClock, ManualClock, SystemClock, Timer};
