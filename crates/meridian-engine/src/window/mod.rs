//! The winit event loop and the single clock window.
//!
//! Redraws run continuously while the app animates; between clock ticks the
//! loop sleeps until the deadline the app asks for with
//! [`RuntimeCtx::redraw_at`].

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
