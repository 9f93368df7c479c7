use std::fmt;

use crate::coords::Vec2;

/// A font file that `fontdue` could not parse.
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unusable font: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Handle to a font owned by a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Parsed label fonts, indexed by [`FontId`].
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        log::debug!("loaded {id:?} with {} glyphs", font.glyph_count());
        self.fonts.push(font);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Advance width and line height of one line of `text` at `size` pixels.
    ///
    /// Kerning is included, matching the glyph placement of the text renderer.
    /// An unknown font measures zero wide.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32) -> Vec2 {
        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, size);
        };

        let mut width = 0.0;
        let mut prev = None;
        for c in text.chars() {
            if let Some(p) = prev {
                width += font.horizontal_kern(p, c, size).unwrap_or(0.0);
            }
            width += font.metrics(c, size).advance_width;
            prev = Some(c);
        }

        let height = font.horizontal_line_metrics(size).map_or(size, |m| m.new_line_size);
        Vec2::new(width.max(0.0), height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        let mut fonts = FontSystem::new();
        assert!(fonts.load_font(b"definitely not a font").is_err());
        assert!(fonts.is_empty());
    }

    #[test]
    fn unknown_font_measures_zero_width() {
        let fonts = FontSystem::new();
        let size = fonts.measure_text("Moscow", FontId(3), 18.0);
        assert_eq!(size, Vec2::new(0.0, 18.0));
    }
}
