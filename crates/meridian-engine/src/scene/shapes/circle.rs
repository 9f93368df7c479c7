use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Border;

/// Disc of `fill` with an optional ring painted inside its edge.
///
/// Faces, the pivot dot and the logo are all circles; the logo ring is a
/// circle with a transparent fill.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub fill: Color,
    pub border: Option<Border>,
}

impl CircleCmd {
    /// Border that will actually be drawn, with its width capped at the radius.
    pub fn visible_border(&self) -> Option<Border> {
        self.border
            .filter(|b| b.width > 0.0 && b.color.is_visible())
            .map(|b| Border::new(b.width.min(self.radius), b.color))
    }

    pub fn is_drawable(&self) -> bool {
        self.radius > 0.0 && (self.fill.is_visible() || self.visible_border().is_some())
    }
}

impl DrawList {
    #[inline]
    pub fn push_circle(
        &mut self,
        z: ZIndex,
        center: Vec2,
        radius: f32,
        fill: Color,
        border: Option<Border>,
    ) {
        self.push(z, DrawCmd::Circle(CircleCmd { center, radius, fill, border }));
    }

    #[inline]
    pub fn push_solid_circle(&mut self, z: ZIndex, center: Vec2, radius: f32, fill: Color) {
        self.push_circle(z, center, radius, fill, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(radius: f32, fill: Color, border: Option<Border>) -> CircleCmd {
        CircleCmd { center: Vec2::new(0.0, 0.0), radius, fill, border }
    }

    #[test]
    fn ring_with_transparent_fill_is_drawable() {
        let ring = circle(10.0, Color::transparent(), Some(Border::new(2.0, Color::from_hex(0xf21416))));
        assert!(ring.is_drawable());
        assert!(!circle(10.0, Color::transparent(), None).is_drawable());
        assert!(!circle(0.0, Color::from_hex(0xffffff), None).is_drawable());
    }

    #[test]
    fn border_is_capped_at_radius() {
        let c = circle(3.0, Color::transparent(), Some(Border::new(8.0, Color::from_hex(0xffffff))));
        assert_eq!(c.visible_border().map(|b| b.width), Some(3.0));
    }
}
