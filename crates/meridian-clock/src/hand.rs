use meridian_engine::coords::Vec2;
use meridian_engine::paint::Color;

use crate::angles::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandKind {
    Hour,
    Minute,
    Second,
}

impl HandKind {
    pub const ALL: [HandKind; 3] = [HandKind::Hour, HandKind::Minute, HandKind::Second];

    /// Geometry and stroke of this hand at view scale 1.
    pub fn style(self) -> HandStyle {
        match self {
            HandKind::Hour => HandStyle { tail: 10.0, tip: 20.0, width: 3.0, color: 0xf0f0f0 },
            HandKind::Minute => HandStyle { tail: 10.0, tip: 35.0, width: 3.0, color: 0xf0f0f0 },
            HandKind::Second => HandStyle { tail: 10.0, tip: 40.0, width: 1.0, color: 0xf21416 },
        }
    }
}

/// Pixel offsets from the pivot, stroke width and `0xRRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandStyle {
    /// Length behind the pivot.
    pub tail: f32,
    /// Length in front of the pivot.
    pub tip: f32,
    pub width: f32,
    pub color: u32,
}

pub const CENTER_DOT_RADIUS: f32 = 1.0;
pub const CENTER_DOT_COLOR: u32 = 0x000000;

/// A rotatable segment pinned at the canvas view center.
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    kind: HandKind,
    /// Clockwise from 12 o'clock, in `[0, 360)`.
    angle: f32,
    /// Minute last shown by this hand; only tracked on the minute hand.
    last_minute: Option<u32>,
}

impl Hand {
    pub fn new(kind: HandKind) -> Self {
        Self { kind, angle: 0.0, last_minute: None }
    }

    pub fn kind(&self) -> HandKind {
        self.kind
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Relative rotation; positive is clockwise.
    pub fn rotate(&mut self, degrees: f32) {
        self.angle = normalize(self.angle + degrees);
    }

    pub fn last_minute(&self) -> Option<u32> {
        self.last_minute
    }

    pub fn set_last_minute(&mut self, minute: u32) {
        self.last_minute = Some(minute);
    }

    /// `(tail, tip)` endpoints around `pivot`, with offsets multiplied by `scale`.
    pub fn endpoints(&self, pivot: Vec2, scale: f32) -> (Vec2, Vec2) {
        let style = self.kind.style();
        let tail = Vec2::new(pivot.x, pivot.y + style.tail * scale);
        let tip = Vec2::new(pivot.x, pivot.y - style.tip * scale);
        (tail.rotated_about(pivot, self.angle), tip.rotated_about(pivot, self.angle))
    }
}

/// The three hands and the center dot of one clock, faded as one group.
#[derive(Debug, Clone, PartialEq)]
pub struct HandsGroup {
    hour: Hand,
    minute: Hand,
    second: Hand,
    opacity: f32,
}

impl Default for HandsGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl HandsGroup {
    /// All hands at 12 o'clock, fully transparent.
    pub fn new() -> Self {
        Self {
            hour: Hand::new(HandKind::Hour),
            minute: Hand::new(HandKind::Minute),
            second: Hand::new(HandKind::Second),
            opacity: 0.0,
        }
    }

    pub fn hand(&self, kind: HandKind) -> &Hand {
        match kind {
            HandKind::Hour => &self.hour,
            HandKind::Minute => &self.minute,
            HandKind::Second => &self.second,
        }
    }

    pub fn hand_mut(&mut self, kind: HandKind) -> &mut Hand {
        match kind {
            HandKind::Hour => &mut self.hour,
            HandKind::Minute => &mut self.minute,
            HandKind::Second => &mut self.second,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Color of `kind` with the group opacity folded in.
    pub fn color_of(&self, kind: HandKind) -> Color {
        Color::from_hex(kind.style().color).with_opacity(self.opacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < 1e-3
    }

    #[test]
    fn fresh_hand_points_up() {
        let pivot = Vec2::new(50.0, 50.0);
        let (tail, tip) = Hand::new(HandKind::Second).endpoints(pivot, 1.0);
        assert!(close(tail, Vec2::new(50.0, 60.0)));
        assert!(close(tip, Vec2::new(50.0, 10.0)));
    }

    #[test]
    fn rotation_is_cumulative() {
        let pivot = Vec2::new(0.0, 0.0);
        let mut stepped = Hand::new(HandKind::Minute);
        for _ in 0..90 {
            stepped.rotate(1.0);
        }
        let mut once = Hand::new(HandKind::Minute);
        once.rotate(90.0);

        assert_eq!(stepped.angle(), 90.0);
        let (_, tip) = stepped.endpoints(pivot, 1.0);
        assert!(close(tip, Vec2::new(35.0, 0.0)));
        assert!(close(tip, once.endpoints(pivot, 1.0).1));
    }

    #[test]
    fn angle_wraps_past_full_turn() {
        let mut h = Hand::new(HandKind::Second);
        h.rotate(354.0);
        h.rotate(6.0);
        assert_eq!(h.angle(), 0.0);
        h.rotate(-6.0);
        assert_eq!(h.angle(), 354.0);
    }

    #[test]
    fn scale_stretches_offsets() {
        let (tail, tip) = Hand::new(HandKind::Hour).endpoints(Vec2::new(0.0, 0.0), 1.4);
        assert!(close(tail, Vec2::new(0.0, 14.0)));
        assert!(close(tip, Vec2::new(0.0, -28.0)));
    }

    #[test]
    fn group_opacity_is_clamped_and_applied() {
        let mut g = HandsGroup::new();
        assert_eq!(g.opacity(), 0.0);
        assert!(!g.color_of(HandKind::Second).is_visible());
        g.set_opacity(1.7);
        assert_eq!(g.opacity(), 1.0);
        assert_eq!(g.color_of(HandKind::Second), Color::from_hex(0xf21416));
    }
}
