//! Font loading and text measurement.
//!
//! Glyph rasterization happens lazily inside `render::shapes::text::TextRenderer`;
//! this module only owns the parsed fonts.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
