use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};
use crate::text::{FontId, FontSystem};

/// One line of label text laid out from its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Pixel height of the font, logical pixels.
    pub size: f32,
    pub color: Color,
    pub origin: Vec2,
}

impl TextCmd {
    /// False when nothing would reach the screen.
    #[inline]
    pub fn is_drawable(&self) -> bool {
        !self.text.is_empty() && self.size > 0.0 && self.color.is_visible()
    }
}

impl DrawList {
    pub fn push_text(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
    ) {
        self.push(z, DrawCmd::Text(TextCmd { text: text.into(), font, size, color, origin }));
    }

    /// Records `text` horizontally centered on `anchor.x`, top edge at `anchor.y`.
    #[allow(clippy::too_many_arguments)]
    pub fn push_text_centered(
        &mut self,
        z: ZIndex,
        fonts: &FontSystem,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        anchor: Vec2,
    ) {
        let text = text.into();
        let width = fonts.measure_text(&text, font, size).x;
        let origin = Vec2::new(anchor.x - width * 0.5, anchor.y);
        self.push_text(z, text, font, size, color, origin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_transparent_text_is_not_drawable() {
        let cmd = |text: &str, color: Color| TextCmd {
            text: text.to_string(),
            font: FontId(0),
            size: 16.0,
            color,
            origin: Vec2::new(0.0, 0.0),
        };
        assert!(cmd("Kyiv", Color::from_hex(0xffffff)).is_drawable());
        assert!(!cmd("", Color::from_hex(0xffffff)).is_drawable());
        assert!(!cmd("Kyiv", Color::transparent()).is_drawable());
    }
}
