use crate::scene::shapes::circle::CircleCmd;
use crate::scene::shapes::segment::SegmentCmd;
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic draw command stream.
///
/// Each variant has a push helper in `scene::shapes::*` and a matching
/// renderer under `render::shapes::*`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Circle(CircleCmd),
    Segment(SegmentCmd),
    Text(TextCmd),
}
