//! Meridian engine crate.
//!
//! Owns the platform + GPU runtime pieces the clock layer draws through:
//! a winit window loop, a wgpu device, a retained draw list and the shape
//! renderers that consume it.

pub mod core;
pub mod device;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
