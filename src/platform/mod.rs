//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall clock for race duration)
//! - Input (key names to lane commands)
//!
//! Storage lives in `crate::persistence`.

pub mod input;
pub mod time;

pub use input::lane_direction_for_key;
pub use time::{Clock, ManualClock, SystemClock};
