use meridian_engine::coords::{Rect, Vec2, Viewport};

use crate::config::{LayoutConfig, WideScreen};

/// Placement of one clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockSlot {
    pub canvas: Rect,
    /// Top-center of the label under the canvas.
    pub label_anchor: Vec2,
}

/// Window layout: a logo band on top and a centered row of square canvases.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub slots: Vec<ClockSlot>,
    pub logo_center: Vec2,
    pub logo_radius: f32,
    /// View scale applied inside each canvas.
    pub view_scale: f32,
}

impl Layout {
    /// Lays out `count` clocks in `viewport`.
    ///
    /// Slot side is `min(max_side · scale, (width − gap·(count+1)) / count)`,
    /// never negative; the row is centered horizontally and the block of
    /// canvases plus labels is centered vertically below the logo band.
    pub fn compute(viewport: Viewport, count: usize, cfg: &LayoutConfig, wide: &WideScreen) -> Self {
        let view_scale = wide.scale_for(viewport.width);
        let logo_center = Vec2::new(viewport.width * 0.5, cfg.logo_band * 0.5);
        let logo_radius = cfg.logo_band * 0.2;

        if count == 0 {
            return Self { slots: Vec::new(), logo_center, logo_radius, view_scale };
        }

        let n = count as f32;
        let fit = (viewport.width - cfg.gap * (n + 1.0)) / n;
        let side = fit.min(cfg.max_side * view_scale).max(0.0);

        let row_width = side * n + cfg.gap * (n - 1.0);
        let left = (viewport.width - row_width) * 0.5;

        let block = side + cfg.label_gap + cfg.label_size;
        let free = (viewport.height - cfg.logo_band - block).max(0.0);
        let top = cfg.logo_band + free * 0.5;

        let slots = (0..count)
            .map(|i| {
                let x = left + i as f32 * (side + cfg.gap);
                let canvas = Rect::new(x, top, side, side);
                ClockSlot {
                    canvas,
                    label_anchor: Vec2::new(x + side * 0.5, top + side + cfg.label_gap),
                }
            })
            .collect();

        Self { slots, logo_center, logo_radius, view_scale }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_is_capped_by_max_side() {
        let l = Layout::compute(
            Viewport::new(1200.0, 600.0),
            3,
            &LayoutConfig::default(),
            &WideScreen::default(),
        );
        assert_eq!(l.view_scale, 1.0);
        assert!(l.slots.iter().all(|s| s.canvas.size.x == 120.0));

        // Row is centered: 3 * 120 + 2 * 40 = 440 wide.
        assert_eq!(l.slots[0].canvas.origin.x, (1200.0 - 440.0) / 2.0);
        assert_eq!(l.slots[1].canvas.origin.x - l.slots[0].canvas.origin.x, 160.0);
    }

    #[test]
    fn side_shrinks_to_fit_narrow_windows() {
        let l = Layout::compute(
            Viewport::new(400.0, 600.0),
            3,
            &LayoutConfig::default(),
            &WideScreen::default(),
        );
        // (400 - 4 * 40) / 3 = 80
        assert_eq!(l.slots[0].canvas.size.x, 80.0);
        assert_eq!(l.slots[0].canvas.origin.x, 40.0);
    }

    #[test]
    fn wide_windows_scale_up() {
        let l = Layout::compute(
            Viewport::new(1600.0, 900.0),
            3,
            &LayoutConfig::default(),
            &WideScreen::default(),
        );
        assert_eq!(l.view_scale, 1.4);
        assert!((l.slots[0].canvas.size.x - 168.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_windows_do_not_go_negative() {
        let l = Layout::compute(
            Viewport::new(50.0, 10.0),
            3,
            &LayoutConfig::default(),
            &WideScreen::default(),
        );
        assert!(l.slots.iter().all(|s| s.canvas.size.x == 0.0));
        assert!(l.slots[0].canvas.origin.y >= LayoutConfig::default().logo_band);
    }

    #[test]
    fn labels_sit_under_canvases() {
        let cfg = LayoutConfig::default();
        let l = Layout::compute(Viewport::new(1000.0, 500.0), 2, &cfg, &WideScreen::default());
        let s = l.slots[1];
        assert_eq!(s.label_anchor.x, s.canvas.center().x);
        assert_eq!(s.label_anchor.y, s.canvas.max().y + cfg.label_gap);
    }
}
