//! Square drawing regions handed out to clocks.
//!
//! A [`Canvas`] is an owned handle: the region is released when the handle is
//! dropped, so every canvas is released exactly once no matter how often the
//! window is resized. [`CanvasHost`] keeps the live count.

use std::cell::Cell;
use std::rc::Rc;

use meridian_engine::coords::{Rect, Vec2};

/// Issues canvases and counts the live ones.
#[derive(Debug, Default)]
pub struct CanvasHost {
    live: Rc<Cell<usize>>,
    issued: u64,
}

impl CanvasHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a square canvas at `rect` whose contents are drawn at `scale`.
    pub fn acquire(&mut self, key: &str, rect: Rect, scale: f32) -> Canvas {
        self.issued += 1;
        self.live.set(self.live.get() + 1);
        log::trace!("canvas '{key}' #{} acquired at {rect:?}", self.issued);
        Canvas {
            key: key.to_owned(),
            serial: self.issued,
            rect,
            scale,
            live: Rc::clone(&self.live),
        }
    }

    /// Canvases acquired and not yet dropped.
    pub fn live_count(&self) -> usize {
        self.live.get()
    }

    /// Total canvases ever acquired.
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

/// A square region of the window owned by one clock.
#[derive(Debug)]
pub struct Canvas {
    key: String,
    serial: u64,
    rect: Rect,
    /// View scale applied to everything drawn about the view center.
    scale: f32,
    live: Rc<Cell<usize>>,
}

impl Canvas {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn side(&self) -> f32 {
        self.rect.size.x
    }

    pub fn view_center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Releases the region now instead of at end of scope.
    pub fn release(self) {}
}

impl Drop for Canvas {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
        log::trace!("canvas '{}' #{} released", self.key, self.serial);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_releases_exactly_once() {
        let mut host = CanvasHost::new();
        let a = host.acquire("a", Rect::new(0.0, 0.0, 100.0, 100.0), 1.0);
        let b = host.acquire("b", Rect::new(120.0, 0.0, 100.0, 100.0), 1.0);
        assert_eq!(host.live_count(), 2);

        a.release();
        assert_eq!(host.live_count(), 1);
        drop(b);
        assert_eq!(host.live_count(), 0);
        assert_eq!(host.issued(), 2);
    }

    #[test]
    fn view_center_is_square_center() {
        let mut host = CanvasHost::new();
        let c = host.acquire("c", Rect::new(10.0, 20.0, 100.0, 100.0), 1.4);
        assert_eq!(c.view_center(), Vec2::new(60.0, 70.0));
        assert_eq!(c.side(), 100.0);
        assert_eq!(c.scale(), 1.4);
    }
}
