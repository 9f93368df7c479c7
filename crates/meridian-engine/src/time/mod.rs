//! Frame timing.
//!
//! One `FrameClock` per window; `tick()` once per presented frame. Wall-clock
//! time for the clock faces comes from the clock layer, not from here.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
