//! Builds the frame's draw list from clock state.

use meridian_engine::coords::Vec2;
use meridian_engine::paint::Color;
use meridian_engine::scene::{Border, DrawList, ZIndex};
use meridian_engine::text::{FontId, FontSystem};

use crate::canvas::Canvas;
use crate::hand::{CENTER_DOT_COLOR, CENTER_DOT_RADIUS, HandKind, HandsGroup};
use crate::intro::LogoVariant;

/// Colors of everything that is not a hand, as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub page: u32,
    pub face: u32,
    pub face_rim: u32,
    pub tick: u32,
    pub logo_primary: u32,
    pub logo_alternate: u32,
    pub label: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            page: 0x151517,
            face: 0x2a2a2e,
            face_rim: 0x3d3d42,
            tick: 0x8c8c92,
            logo_primary: 0xf21416,
            logo_alternate: 0xf0f0f0,
            label: 0xd8d8dc,
        }
    }
}

/// Logo: a ring with a dot; the blink swaps the two logo colors.
pub fn paint_logo(
    list: &mut DrawList,
    center: Vec2,
    radius: f32,
    opacity: f32,
    variant: LogoVariant,
    palette: &Palette,
) {
    if opacity <= 0.0 || radius <= 0.0 {
        return;
    }
    let (ring, dot) = match variant {
        LogoVariant::Primary => (palette.logo_primary, palette.logo_alternate),
        LogoVariant::Alternate => (palette.logo_alternate, palette.logo_primary),
    };
    let ring = Color::from_hex(ring).with_opacity(opacity);
    let dot = Color::from_hex(dot).with_opacity(opacity);

    list.push_circle(
        ZIndex::PAGE,
        center,
        radius,
        Color::transparent(),
        Some(Border::new((radius * 0.18).max(1.0), ring)),
    );
    list.push_solid_circle(ZIndex::PAGE, center, radius * 0.3, dot);
}

/// Face disc with twelve hour ticks, filling the canvas.
pub fn paint_face(list: &mut DrawList, canvas: &Canvas, opacity: f32, palette: &Palette) {
    if opacity <= 0.0 || canvas.side() <= 0.0 {
        return;
    }
    let center = canvas.view_center();
    let radius = canvas.side() * 0.5 - 1.0;
    if radius <= 0.0 {
        return;
    }

    list.push_circle(
        ZIndex::FACE,
        center,
        radius,
        Color::from_hex(palette.face).with_opacity(opacity),
        Some(Border::new(2.0, Color::from_hex(palette.face_rim).with_opacity(opacity))),
    );

    let tick = Color::from_hex(palette.tick).with_opacity(opacity);
    let outer = Vec2::new(center.x, center.y - (radius - 5.0));
    for hour in 0..12 {
        let long = hour % 3 == 0;
        let inner = Vec2::new(center.x, center.y - (radius - if long { 13.0 } else { 10.0 }));
        let deg = hour as f32 * 30.0;
        list.push_segment(
            ZIndex::FACE,
            inner.rotated_about(center, deg),
            outer.rotated_about(center, deg),
            if long { 2.0 } else { 1.0 },
            tick,
        );
    }
}

/// Hands in hour, minute, second order, then the center dot on top.
pub fn paint_hands(list: &mut DrawList, canvas: &Canvas, hands: &HandsGroup) {
    if hands.opacity() <= 0.0 {
        return;
    }
    let pivot = canvas.view_center();
    let scale = canvas.scale();

    for kind in HandKind::ALL {
        let hand = hands.hand(kind);
        let (tail, tip) = hand.endpoints(pivot, scale);
        list.push_segment(
            ZIndex::HANDS,
            tail,
            tip,
            kind.style().width * scale,
            hands.color_of(kind),
        );
    }

    list.push_solid_circle(
        ZIndex::PIVOT,
        pivot,
        CENTER_DOT_RADIUS * scale,
        Color::from_hex(CENTER_DOT_COLOR).with_opacity(hands.opacity()),
    );
}

/// Single-line label centered horizontally on `anchor`.
pub fn paint_label(
    list: &mut DrawList,
    fonts: &FontSystem,
    font: FontId,
    text: &str,
    anchor: Vec2,
    size: f32,
    color: Color,
) {
    if !color.is_visible() || text.is_empty() {
        return;
    }
    list.push_text_centered(ZIndex::PAGE, fonts, text, font, size, color, anchor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasHost;
    use meridian_engine::coords::Rect;
    use meridian_engine::scene::DrawCmd;

    fn canvas(host: &mut CanvasHost, scale: f32) -> Canvas {
        host.acquire("c", Rect::new(0.0, 0.0, 120.0, 120.0), scale)
    }

    #[test]
    fn face_has_disc_and_twelve_ticks() {
        let mut host = CanvasHost::new();
        let c = canvas(&mut host, 1.0);
        let mut list = DrawList::new();
        paint_face(&mut list, &c, 1.0, &Palette::default());

        let circles = list.items().iter().filter(|i| matches!(i.cmd, DrawCmd::Circle(_))).count();
        let ticks = list.items().iter().filter(|i| matches!(i.cmd, DrawCmd::Segment(_))).count();
        assert_eq!((circles, ticks), (1, 12));
    }

    #[test]
    fn transparent_groups_paint_nothing() {
        let mut host = CanvasHost::new();
        let c = canvas(&mut host, 1.0);
        let mut list = DrawList::new();
        paint_face(&mut list, &c, 0.0, &Palette::default());
        paint_hands(&mut list, &c, &HandsGroup::new());
        paint_logo(&mut list, Vec2::new(0.0, 0.0), 10.0, 0.0, LogoVariant::Primary, &Palette::default());
        assert!(list.is_empty());
    }

    #[test]
    fn hands_use_view_scale_and_pivot_on_top() {
        let mut host = CanvasHost::new();
        let c = canvas(&mut host, 1.4);
        let mut hands = HandsGroup::new();
        hands.set_opacity(1.0);

        let mut list = DrawList::new();
        paint_hands(&mut list, &c, &hands);
        assert_eq!(list.len(), 4);

        let DrawCmd::Segment(second) = &list.items()[2].cmd else { panic!("expected segment") };
        assert!((second.length() - 50.0 * 1.4).abs() < 1e-3);
        assert!((second.width - 1.4).abs() < 1e-6);

        let last = list.iter_in_paint_order().last().unwrap();
        assert_eq!(last.key.z, ZIndex::PIVOT);
    }

    #[test]
    fn logo_variant_swaps_colors() {
        let palette = Palette::default();
        let mut a = DrawList::new();
        let mut b = DrawList::new();
        paint_logo(&mut a, Vec2::new(0.0, 0.0), 20.0, 1.0, LogoVariant::Primary, &palette);
        paint_logo(&mut b, Vec2::new(0.0, 0.0), 20.0, 1.0, LogoVariant::Alternate, &palette);

        let dot = |l: &DrawList| match &l.items()[1].cmd {
            DrawCmd::Circle(c) => c.fill,
            _ => panic!("expected circle"),
        };
        assert_eq!(dot(&a), Color::from_hex(palette.logo_alternate));
        assert_eq!(dot(&b), Color::from_hex(palette.logo_primary));
    }
}
