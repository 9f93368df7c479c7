//! Paint model shared between the clock layer and renderers.
//!
//! Colors are sRGB-encoded with premultiplied alpha.

mod color;

pub use color::Color;
