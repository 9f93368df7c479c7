use core::cmp::Ordering;

use crate::coords::Rect;

use super::{DrawCmd, ZIndex};

/// Stable sort key for draw items: z ascending, then insertion order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.z.cmp(&other.z).then(self.order.cmp(&other.order))
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A single draw item: sort key + command + clip rect.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Scissor rect in logical pixels. `None` = no clipping.
    pub clip_rect: Option<Rect>,
}

/// Recorded draw stream for a frame.
///
/// The clock layer rebuilds the list every frame: `clear()`, then each canvas
/// pushes its shapes inside a `push_clip` / `pop_clip` scope so nothing it draws
/// leaks outside its square.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,

    /// Top is the current effective clip, already intersected with all parents.
    clip_stack: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and the clip stack. Keeps allocated capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
        self.clip_stack.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command; it inherits the current clip rect.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey { z, order },
            cmd,
            clip_rect: self.clip_stack.last().copied(),
        });

        self.sorted_dirty = true;
    }

    /// Begins a scissor region clipped to `rect` (intersected with the parent).
    ///
    /// Calls must be balanced with [`pop_clip`](Self::pop_clip).
    #[inline]
    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip_stack.last() {
            None => rect,
            // No overlap: zero-area rect so renderers skip the draw.
            Some(&parent) => parent.intersect(rect).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0)),
        };
        self.clip_stack.push(effective);
    }

    /// Ends the most recent scissor region.
    #[inline]
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip called without matching push_clip");
        self.clip_stack.pop();
    }

    /// Iterates items back-to-front without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.sorted_indices.clear();
            self.sorted_indices.extend(0..self.items.len());
            let items = &self.items;
            self.sorted_indices.sort_by(|&a, &b| items[a].key.cmp(&items[b].key));
            self.sorted_dirty = false;
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn dot(list: &mut DrawList, z: ZIndex, x: f32) {
        list.push_solid_circle(z, Vec2::new(x, 0.0), 1.0, Color::from_hex(0xffffff));
    }

    fn xs(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Circle(c) => c.center.x,
                _ => f32::NAN,
            })
            .collect()
    }

    #[test]
    fn paint_order_is_z_then_insertion() {
        let mut list = DrawList::new();
        dot(&mut list, ZIndex::HANDS, 1.0);
        dot(&mut list, ZIndex::FACE, 2.0);
        dot(&mut list, ZIndex::HANDS, 3.0);
        dot(&mut list, ZIndex::PAGE, 4.0);
        assert_eq!(xs(&mut list), vec![4.0, 2.0, 1.0, 3.0]);
    }

    #[test]
    fn items_inherit_and_release_clip() {
        let mut list = DrawList::new();
        let canvas = Rect::new(10.0, 10.0, 100.0, 100.0);
        list.push_clip(canvas);
        dot(&mut list, ZIndex::FACE, 0.0);
        list.pop_clip();
        dot(&mut list, ZIndex::FACE, 0.0);

        assert_eq!(list.items()[0].clip_rect, Some(canvas));
        assert_eq!(list.items()[1].clip_rect, None);
    }

    #[test]
    fn nested_clip_is_intersected() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 50.0, 50.0));
        list.push_clip(Rect::new(25.0, 25.0, 50.0, 50.0));
        dot(&mut list, ZIndex::FACE, 0.0);
        assert_eq!(list.items()[0].clip_rect, Some(Rect::new(25.0, 25.0, 25.0, 25.0)));
    }

    #[test]
    fn clear_resets_everything() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 5.0, 5.0));
        dot(&mut list, ZIndex::FACE, 0.0);
        list.clear();
        assert!(list.is_empty());
        dot(&mut list, ZIndex::FACE, 0.0);
        assert_eq!(list.items()[0].clip_rect, None);
        assert_eq!(list.items()[0].key.order, 0);
    }
}
