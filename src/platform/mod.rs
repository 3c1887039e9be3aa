//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic milliseconds)
//! - Input events (keys and pointer drags mapped to steering)
//!
//! Durable storage lives in [`crate::persistence`].

pub mod input;
pub mod time;

pub use input::{PointerDrag, key_direction, key_steer};
pub use time::{Clock, ManualClock, SystemClock};
