use unicode_width::UnicodeWidthChar;

/// Glyph measurement for the active font.
///
/// Widths are in the same units as [`crate::geometry::Bounds`]. Text fields project their caret
/// from these widths, so a field must be measured with the same metrics its surface renders with.
pub trait FontMetrics {
    fn glyph_width(&self, ch: char) -> f32;

    fn line_height(&self) -> f32;

    fn text_width(&self, text: &str) -> f32 {
        text.chars().map(|ch| self.glyph_width(ch)).sum()
    }
}

/// Terminal cell metrics: each glyph is as wide as its display column count, one row tall.
#[derive(Clone, Copy, Debug, Default)]
pub struct CellMetrics;

impl FontMetrics for CellMetrics {
    fn glyph_width(&self, ch: char) -> f32 {
        UnicodeWidthChar::width(ch).unwrap_or(0) as f32
    }

    fn line_height(&self) -> f32 {
        1.0
    }
}

/// Fixed-advance metrics for pixel hosts with a monospace font.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    pub advance: f32,
    pub line_height: f32,
}

impl MonospaceMetrics {
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl FontMetrics for MonospaceMetrics {
    fn glyph_width(&self, ch: char) -> f32 {
        if ch.is_control() { 0.0 } else { self.advance }
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}
