//! Animated analog clocks for several timezones.
//!
//! A [`ClockController`] owns the clocks, reads timezone-local time once per
//! second and queues the hands that moved into a [`HandAnimator`], which turns
//! each tick into a short per-frame sweep instead of a jump. [`Application`]
//! wires the controller to the engine's window loop.

pub mod angles;
pub mod animator;
pub mod app;
pub mod canvas;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod hand;
pub mod intro;
pub mod layout;
pub mod paint;
pub mod time_source;
pub mod timers;

pub use animator::{BatchMode, HandAnimator, HandRef, HandSet};
pub use app::Application;
pub use clock::{Clock, ClockId, ClockRegistry};
pub use config::{ClockConfig, ClockSpec, IntroTiming, LayoutConfig, WideScreen};
pub use controller::{ClockController, FramePacing};
pub use error::ConfigError;
pub use hand::{Hand, HandKind, HandsGroup};
pub use time_source::{ManualTimeSource, SystemTimeSource, TimeSource};
