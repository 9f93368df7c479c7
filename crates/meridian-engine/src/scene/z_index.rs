/// Z-ordering key for draw items.
///
/// Higher values appear on top of lower values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    /// Page-level decorations (logo, labels).
    pub const PAGE: ZIndex = ZIndex(0);
    /// Static clock face: disc and hour ticks.
    pub const FACE: ZIndex = ZIndex(10);
    /// Rotating hands.
    pub const HANDS: ZIndex = ZIndex(20);
    /// Pivot marker drawn over the hands.
    pub const PIVOT: ZIndex = ZIndex(30);

    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}
