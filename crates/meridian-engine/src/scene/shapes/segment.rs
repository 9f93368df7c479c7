use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Straight stroked line from `from` to `to` with butt caps.
///
/// Clock hands are segments: the tail end sits behind the pivot and the tip
/// points at the current angle.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentCmd {
    pub from: Vec2,
    pub to: Vec2,
    /// Stroke width in logical pixels.
    pub width: f32,
    pub color: Color,
}

impl SegmentCmd {
    #[inline]
    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }
}

impl DrawList {
    /// Records a stroked segment.
    #[inline]
    pub fn push_segment(&mut self, z: ZIndex, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.push(z, DrawCmd::Segment(SegmentCmd { from, to, width, color }));
    }
}
