/// sRGB-encoded RGBA with premultiplied alpha.
///
/// Channels are written to a non-sRGB surface as-is, so `from_hex(0xf21416)`
/// lands on screen as exactly `#f21416`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Creates an opaque color from a `0xRRGGBB` literal, e.g. `0xf21416`.
    #[inline]
    pub fn from_hex(rgb: u32) -> Self {
        let r = ((rgb >> 16) & 0xff) as u8;
        let g = ((rgb >> 8) & 0xff) as u8;
        let b = (rgb & 0xff) as u8;
        Self::from_srgb_u8(r, g, b, 255)
    }

    /// Creates a premultiplied color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Scales the whole color by a group opacity in `[0, 1]`.
    ///
    /// Premultiplied colors fade by scaling every channel, so this is how a
    /// group opacity is folded into its children.
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let o = opacity.clamp(0.0, 1.0);
        Self { r: self.r * o, g: self.g * o, b: self.b * o, a: self.a * o }
    }

    #[inline]
    pub fn is_visible(self) -> bool {
        self.a > 0.0
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_literal_is_opaque() {
        let c = Color::from_hex(0xff0000);
        assert_eq!(c, Color::from_straight(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn opacity_scales_premultiplied_channels() {
        let c = Color::from_straight(1.0, 0.5, 0.0, 1.0).with_opacity(0.5);
        assert_eq!(c.a, 0.5);
        assert_eq!(c.r, 0.5);
        assert_eq!(c.g, 0.25);
        assert!(!Color::from_hex(0xffffff).with_opacity(0.0).is_visible());
    }
}
