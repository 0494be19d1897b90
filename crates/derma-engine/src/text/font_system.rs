use crate::coords::Vec2;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("font load error: {0}")]
pub struct FontLoadError(pub String);

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(usize);

impl FontId {
    /// Builds a handle from a raw index, for custom [`TextMeasure`] backends.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Text metrics queried by widgets (caret placement, alignment, scrolling).
pub trait TextMeasure {
    /// Extent of a single line of `text` in pixels.
    fn measure(&self, text: &str, font: FontId, size: f32) -> Vec2;

    /// Width of `text`; the common case for caret math.
    fn text_width(&self, text: &str, font: FontId, size: f32) -> f32 {
        self.measure(text, font, size).x
    }
}

/// Owns a collection of loaded fonts. Fonts are immutable after loading.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        log::debug!("loaded font #{}", id.0);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// The underlying `fontdue::Font`, for host renderers that rasterize glyphs.
    pub fn font(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }
}

impl TextMeasure for FontSystem {
    /// Sums glyph advances; height is the line height at `size`.
    ///
    /// Unknown font ids measure as zero width so a bad handle degrades to
    /// invisible text rather than a failed frame.
    fn measure(&self, text: &str, id: FontId, size: f32) -> Vec2 {
        let Some(font) = self.font(id) else {
            return Vec2::new(0.0, size * 1.2);
        };
        let width = text
            .chars()
            .map(|c| font.metrics(c, size).advance_width)
            .sum::<f32>();
        let height = font
            .horizontal_line_metrics(size)
            .map(|m| m.new_line_size)
            .unwrap_or(size * 1.2);
        Vec2::new(width, height)
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}
